//! Signed-token verification.
//!
//! Validators check the signature and algorithm with `jsonwebtoken`, then run
//! [`validate_claims`] against the caller-supplied clock so time checks stay
//! deterministic in tests.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use thiserror::Error;

use crate::{JwtClaims, TokenValidationError, validate_claims};

/// Verify a bearer token and return its claims, or reject it.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JwtKeyError {
    #[error("invalid RSA public key: {0}")]
    InvalidRsaKey(String),

    #[error("shared secret must not be empty")]
    EmptySecret,
}

/// Accepts RS256 tokens signed by the holder of the matching private key.
pub struct Rs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Rs256JwtValidator {
    /// Build from a PEM-encoded RSA public key (PKCS#1 or SPKI).
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, JwtKeyError> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| JwtKeyError::InvalidRsaKey(e.to_string()))?;
        Ok(Self {
            key,
            validation: signature_only(Algorithm::RS256),
        })
    }
}

impl JwtValidator for Rs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        decode_and_validate(token, &self.key, &self.validation, now)
    }
}

/// Accepts HS256 tokens signed with a shared secret.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, JwtKeyError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(JwtKeyError::EmptySecret);
        }
        Ok(Self {
            key: DecodingKey::from_secret(secret),
            validation: signature_only(Algorithm::HS256),
        })
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        decode_and_validate(token, &self.key, &self.validation, now)
    }
}

// Time-based claims are checked by `validate_claims`, not by jsonwebtoken.
fn signature_only(alg: Algorithm) -> Validation {
    let mut validation = Validation::new(alg);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.required_spec_claims.clear();
    validation.leeway = 0;
    validation
}

fn decode_and_validate(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
    now: DateTime<Utc>,
) -> Result<JwtClaims, TokenValidationError> {
    let data = jsonwebtoken::decode::<JwtClaims>(token, key, validation).map_err(|e| {
        tracing::debug!(error = %e, "jwt decode failed");
        match e.kind() {
            ErrorKind::InvalidSignature => TokenValidationError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenValidationError::InvalidAlgorithm,
            _ => TokenValidationError::Malformed(e.to_string()),
        }
    })?;

    validate_claims(&data.claims, now)?;
    Ok(data.claims)
}
