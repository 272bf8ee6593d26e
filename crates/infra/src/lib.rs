//! Infrastructure layer: the testimonial service and its backing stores.

pub mod testimonials;

pub use testimonials::{InMemoryTestimonialService, ServiceError, TestimonialService};
#[cfg(feature = "postgres")]
pub use testimonials::PostgresTestimonialService;
