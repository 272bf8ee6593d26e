//! Process configuration, read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `JWT_ALGORITHM` | `RS256` | `RS256` or `HS256` |
//! | `JWT_PUBLIC_KEY` / `JWT_PUBLIC_KEY_FILE` | | RSA public key PEM (RS256) |
//! | `JWT_SECRET` | | shared secret (HS256) |
//! | `USE_PERSISTENT_STORES` | `false` | use the Postgres service |
//! | `DATABASE_URL` | | required with persistent stores |

use std::{net::SocketAddr, sync::Arc};

use thiserror::Error;

use testimonials_auth::{Hs256JwtValidator, JwtKeyError, JwtValidator, Rs256JwtValidator};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// How bearer tokens are verified.
#[derive(Clone, PartialEq, Eq)]
pub enum JwtConfig {
    Rs256 { public_key_pem: String },
    Hs256 { secret: String },
}

impl JwtConfig {
    pub fn build_validator(&self) -> Result<Arc<dyn JwtValidator>, JwtKeyError> {
        let validator: Arc<dyn JwtValidator> = match self {
            JwtConfig::Rs256 { public_key_pem } => {
                Arc::new(Rs256JwtValidator::from_rsa_pem(public_key_pem.as_bytes())?)
            }
            JwtConfig::Hs256 { secret } => Arc::new(Hs256JwtValidator::new(secret)?),
        };
        Ok(validator)
    }
}

// Key material stays out of logs.
impl core::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            JwtConfig::Rs256 { .. } => f.write_str("Rs256 { public_key_pem: <redacted> }"),
            JwtConfig::Hs256 { .. } => f.write_str("Hs256 { secret: <redacted> }"),
        }
    }
}

/// Which testimonial service backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    InMemory,
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt: JwtConfig,
    pub store: StoreConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (`None` = unset).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let algorithm = get("JWT_ALGORITHM").unwrap_or_else(|| "RS256".to_string());
        let jwt = match algorithm.trim().to_ascii_uppercase().as_str() {
            "RS256" => {
                let public_key_pem = match (get("JWT_PUBLIC_KEY"), get("JWT_PUBLIC_KEY_FILE")) {
                    // Single-line env values carry newlines as literal `\n`.
                    (Some(inline), _) => inline.replace("\\n", "\n"),
                    (None, Some(path)) => std::fs::read_to_string(&path)
                        .map_err(|source| ConfigError::Io { path, source })?,
                    (None, None) => return Err(ConfigError::Missing("JWT_PUBLIC_KEY or JWT_PUBLIC_KEY_FILE")),
                };
                JwtConfig::Rs256 { public_key_pem }
            }
            "HS256" => JwtConfig::Hs256 {
                secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    var: "JWT_ALGORITHM",
                    reason: format!("unsupported algorithm '{other}' (expected RS256 or HS256)"),
                });
            }
        };

        let use_persistent = match get("USE_PERSISTENT_STORES") {
            None => false,
            Some(v) => v.trim().parse::<bool>().map_err(|e| ConfigError::Invalid {
                var: "USE_PERSISTENT_STORES",
                reason: e.to_string(),
            })?,
        };

        let store = if use_persistent {
            StoreConfig::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            }
        } else {
            StoreConfig::InMemory
        };

        Ok(Self {
            bind_addr,
            jwt,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn hs256_with_defaults() {
        let cfg = config_from(&[("JWT_ALGORITHM", "hs256"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.jwt, JwtConfig::Hs256 { secret: "s3cret".to_string() });
        assert_eq!(cfg.store, StoreConfig::InMemory);
        assert!(cfg.jwt.build_validator().is_ok());
    }

    #[test]
    fn rs256_is_the_default_and_needs_a_key() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn rs256_inline_key_unescapes_newlines() {
        let pem = include_str!("../../auth/tests/fixtures/jwt_public.pem");
        let escaped = pem.replace('\n', "\\n");
        let cfg = config_from(&[("JWT_PUBLIC_KEY", &escaped)]).unwrap();
        assert_eq!(
            cfg.jwt,
            JwtConfig::Rs256 { public_key_pem: pem.to_string() }
        );
        assert!(cfg.jwt.build_validator().is_ok());
    }

    #[test]
    fn missing_key_file_is_an_io_error() {
        let err = config_from(&[("JWT_PUBLIC_KEY_FILE", "/definitely/not/here.pem")]).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = config_from(&[("JWT_ALGORITHM", "none")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "JWT_ALGORITHM", .. }));
    }

    #[test]
    fn persistent_stores_need_database_url() {
        let base = [("JWT_ALGORITHM", "HS256"), ("JWT_SECRET", "s")];

        let err = config_from(&[base[0], base[1], ("USE_PERSISTENT_STORES", "true")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));

        let cfg = config_from(&[
            base[0],
            base[1],
            ("USE_PERSISTENT_STORES", "true"),
            ("DATABASE_URL", "postgres://localhost/testimonials"),
        ])
        .unwrap();
        assert_eq!(
            cfg.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/testimonials".to_string()
            }
        );
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let err = config_from(&[("JWT_ALGORITHM", "HS256"), ("JWT_SECRET", "s"), ("BIND_ADDR", "nope")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));

        let err = config_from(&[
            ("JWT_ALGORITHM", "HS256"),
            ("JWT_SECRET", "s"),
            ("USE_PERSISTENT_STORES", "maybe"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "USE_PERSISTENT_STORES", .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let cfg = JwtConfig::Hs256 { secret: "s3cret".to_string() };
        assert!(!format!("{cfg:?}").contains("s3cret"));
    }
}
