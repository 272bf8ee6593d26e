use std::sync::RwLock;

use chrono::Utc;

use testimonials_core::{NewTestimonial, Testimonial};

use super::{CountQuery, ServiceError, TestimonialService};

/// In-memory testimonial service for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryTestimonialService {
    inner: RwLock<Vec<Testimonial>>,
}

impl InMemoryTestimonialService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records (kept in the given order).
    pub fn with_testimonials(testimonials: Vec<Testimonial>) -> Self {
        Self {
            inner: RwLock::new(testimonials),
        }
    }
}

fn poisoned() -> ServiceError {
    tracing::warn!("in-memory testimonial store lock poisoned");
    ServiceError::Storage("testimonial store lock poisoned".to_string())
}

#[async_trait::async_trait]
impl TestimonialService for InMemoryTestimonialService {
    async fn create(&self, new: NewTestimonial) -> Result<Testimonial, ServiceError> {
        let testimonial = Testimonial::create(new, Utc::now());
        self.inner
            .write()
            .map_err(|_| poisoned())?
            .push(testimonial.clone());
        Ok(testimonial)
    }

    async fn find_all(&self) -> Result<Vec<Testimonial>, ServiceError> {
        Ok(self.inner.read().map_err(|_| poisoned())?.clone())
    }

    async fn count(&self, query: &str) -> Result<String, ServiceError> {
        let query = CountQuery::parse(query)?;
        let all = self.inner.read().map_err(|_| poisoned())?;
        let n = match &query {
            CountQuery::All => all.len(),
            CountQuery::Contains(term) => all.iter().filter(|t| t.mentions(term)).count(),
        };
        Ok(n.to_string())
    }
}
