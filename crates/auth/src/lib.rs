//! `testimonials-auth`: credential verification boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it turns a
//! bearer token into verified claims, or rejects it.

pub mod claims;
pub mod principal;
pub mod validator;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use principal::PrincipalId;
pub use validator::{Hs256JwtValidator, JwtKeyError, JwtValidator, Rs256JwtValidator};
