//! `/api/testimonials`: create (guarded), list and count (public).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware::{AuthState, auth_middleware};

pub fn router(auth: AuthState) -> Router {
    Router::new()
        .route(
            "/",
            post(create_testimonial)
                .route_layer(axum::middleware::from_fn_with_state(auth, auth_middleware))
                .get(list_testimonials),
        )
        .route("/count", get(count_testimonials))
}

pub async fn create_testimonial(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::CreateTestimonialRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    tracing::debug!(caller = %principal.principal_id(), "create testimonial");

    match services.testimonials.create(body.into()).await {
        Ok(created) => (StatusCode::OK, Json(dto::TestimonialView::from(&created))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_testimonials(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    tracing::debug!("list testimonials");

    match services.testimonials.find_all().await {
        Ok(all) => {
            let items = all
                .iter()
                .map(dto::TestimonialView::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn count_testimonials(
    Extension(services): Extension<Arc<AppServices>>,
    params: Result<Query<dto::CountParams>, QueryRejection>,
) -> axum::response::Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let query = params.query.unwrap_or_default();

    tracing::debug!(%query, "count testimonials");

    match services.testimonials.count(&query).await {
        Ok(count) => (StatusCode::OK, count).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
