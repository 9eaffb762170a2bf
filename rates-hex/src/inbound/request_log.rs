//! Request logging middleware.
//!
//! Records method, path, status and duration for every request, keyed by a
//! correlation id: the inbound `x-request-id` header is reused when present,
//! otherwise a fresh UUID is generated. The id is set on the response so
//! clients can quote it.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_log_middleware(request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    if status.is_server_error() {
        tracing::error!(%method, path, status = status.as_u16(), duration_ms, request_id, "request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, path, status = status.as_u16(), duration_ms, request_id, "client error");
    } else {
        tracing::info!(%method, path, status = status.as_u16(), duration_ms, request_id, "request completed");
    }

    response
}
