use axum::http::StatusCode;

use crate::app::errors::json_error;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "no route matches this path")
}

pub async fn method_not_allowed() -> axum::response::Response {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed on this path")
}
