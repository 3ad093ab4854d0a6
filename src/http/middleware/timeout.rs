//! Inbound request deadline.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;

use crate::http::error::ApiError;

pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Abort the request once `deadline` elapses and answer 504 with the error
/// envelope. Dropping the handler future cancels any pending backoff.
pub async fn request_timeout(
    State(deadline): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(deadline_secs = deadline.as_secs(), "Request deadline exceeded");
            ApiError::new(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE).into_response()
        }
    }
}
