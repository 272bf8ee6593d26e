use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use testimonials_core::{NewTestimonial, Testimonial, TestimonialId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonialRequest {
    pub message: String,
    pub name: String,
    pub title: String,
}

impl From<CreateTestimonialRequest> for NewTestimonial {
    fn from(req: CreateTestimonialRequest) -> Self {
        NewTestimonial::new(req.message, req.name, req.title)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    #[serde(default)]
    pub query: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

/// Wire-format projection of a [`Testimonial`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialView {
    pub id: TestimonialId,
    pub message: String,
    pub name: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Testimonial> for TestimonialView {
    fn from(t: &Testimonial) -> Self {
        Self {
            id: t.id_typed(),
            message: t.message().to_string(),
            name: t.name().to_string(),
            title: t.title().to_string(),
            created_at: t.created_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn view_serializes_expected_fields() {
        let t = Testimonial::create(NewTestimonial::new("Great", "Ann", "CEO"), Utc::now());
        let json = serde_json::to_value(TestimonialView::from(&t)).unwrap();

        assert_eq!(json["message"], "Great");
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["title"], "CEO");
        assert_eq!(json["id"], t.id_typed().to_string());
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn count_params_query_is_optional() {
        let params: CountParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.query, None);
    }

    #[test]
    fn create_request_requires_every_field() {
        let err = serde_json::from_str::<CreateTestimonialRequest>(r#"{"message":"m","name":"n"}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<CreateTestimonialRequest>(
            r#"{"message":"m","name":"n","title":7}"#,
        );
        assert!(err.is_err());
    }

    proptest! {
        /// Property: a view carries exactly the request's text through the domain type.
        #[test]
        fn view_echoes_request_text(message in ".*", name in ".*", title in ".*") {
            let req = CreateTestimonialRequest {
                message: message.clone(),
                name: name.clone(),
                title: title.clone(),
            };
            let t = Testimonial::create(req.into(), Utc::now());
            let view = TestimonialView::from(&t);

            prop_assert_eq!(view.message, message);
            prop_assert_eq!(view.name, name);
            prop_assert_eq!(view.title, title);
            prop_assert_eq!(view.id, t.id_typed());
        }
    }
}
