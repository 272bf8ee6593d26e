//! Testimonial record: a user-submitted quote with its author's name and title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TestimonialId;

/// Input to the create operation.
///
/// Carries only the user-supplied text; identity and timestamps are assigned
/// by whoever persists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub message: String,
    pub name: String,
    pub title: String,
}

impl NewTestimonial {
    pub fn new(message: impl Into<String>, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: name.into(),
            title: title.into(),
        }
    }
}

/// A stored testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    id: TestimonialId,
    message: String,
    name: String,
    title: String,
    created_at: DateTime<Utc>,
}

impl Testimonial {
    /// Assign identity to a new testimonial.
    pub fn create(new: NewTestimonial, created_at: DateTime<Utc>) -> Self {
        Self::from_parts(TestimonialId::new(), new, created_at)
    }

    /// Rehydrate a testimonial from storage.
    pub fn from_parts(id: TestimonialId, new: NewTestimonial, created_at: DateTime<Utc>) -> Self {
        let NewTestimonial { message, name, title } = new;
        Self {
            id,
            message,
            name,
            title,
            created_at,
        }
    }

    pub fn id_typed(&self) -> TestimonialId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Case-insensitive substring match over message, name and title.
    ///
    /// `needle` must already be lowercased.
    pub fn mentions(&self, needle: &str) -> bool {
        [&self.message, &self.name, &self.title]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Testimonial {
        Testimonial::create(NewTestimonial::new("Great product", "Ann", "CEO"), Utc::now())
    }

    #[test]
    fn create_keeps_user_text() {
        let t = sample();
        assert_eq!(t.message(), "Great product");
        assert_eq!(t.name(), "Ann");
        assert_eq!(t.title(), "CEO");
    }

    #[test]
    fn from_parts_preserves_identity() {
        let id = TestimonialId::new();
        let at = Utc::now();
        let t = Testimonial::from_parts(id, NewTestimonial::new("m", "n", "t"), at);
        assert_eq!(t.id_typed(), id);
        assert_eq!(t.created_at(), at);
    }

    #[test]
    fn mentions_searches_every_text_field() {
        let t = sample();
        assert!(t.mentions("great"));
        assert!(t.mentions("ann"));
        assert!(t.mentions("ceo"));
        assert!(!t.mentions("cto"));
    }

    #[test]
    fn empty_strings_are_accepted() {
        let t = Testimonial::create(NewTestimonial::new("", "", ""), Utc::now());
        assert_eq!(t.message(), "");
        assert!(t.mentions(""));
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let t = sample();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["name"], "Ann");
        assert!(json.get("created_at").is_some());
    }
}
