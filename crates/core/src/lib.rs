//! `testimonials-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod id;
pub mod testimonial;

pub use id::TestimonialId;
pub use testimonial::{NewTestimonial, Testimonial};
