//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: which testimonial service backs the API
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use testimonials_auth::JwtValidator;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub async fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    let jwt = config.jwt.build_validator()?;
    let services = services::build_services(&config.store).await?;
    Ok(build_router(services, jwt))
}

/// Build the HTTP router around already-constructed collaborators.
pub fn build_router(services: services::AppServices, jwt: Arc<dyn JwtValidator>) -> Router {
    let auth_state = middleware::AuthState { jwt };

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/testimonials", routes::testimonials::router(auth_state))
        .fallback(routes::system::not_found)
        .method_not_allowed_fallback(routes::system::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(Extension(Arc::new(services))),
        )
}
