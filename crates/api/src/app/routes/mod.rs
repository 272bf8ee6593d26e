pub mod system;
pub mod testimonials;
