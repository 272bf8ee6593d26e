//! Testimonial service boundary.
//!
//! The HTTP layer only sees [`TestimonialService`]; which backing store is in
//! use is decided at wiring time.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query;

use thiserror::Error;

use testimonials_core::{NewTestimonial, Testimonial};

pub use in_memory::InMemoryTestimonialService;
#[cfg(feature = "postgres")]
pub use postgres::PostgresTestimonialService;
pub use query::{CountQuery, MAX_QUERY_LEN};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The count query could not be interpreted.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The backing store is not reachable right now.
    #[error("service unavailable")]
    Unavailable,
}

/// Create, list and count testimonials.
#[async_trait::async_trait]
pub trait TestimonialService: Send + Sync {
    /// Persist a new testimonial and return it with its assigned identity.
    async fn create(&self, new: NewTestimonial) -> Result<Testimonial, ServiceError>;

    /// All testimonials, oldest first.
    async fn find_all(&self) -> Result<Vec<Testimonial>, ServiceError>;

    /// Number of testimonials matching `query`, rendered as decimal text.
    ///
    /// See [`CountQuery`] for how the query is interpreted.
    async fn count(&self, query: &str) -> Result<String, ServiceError>;
}
