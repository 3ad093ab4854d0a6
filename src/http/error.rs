//! Mapping from service errors to HTTP error responses.
//!
//! Every error leaves the service as an [`Envelope`] with `status=error`:
//! - not found → 404 `"Employee not found"`
//! - invalid input → 400
//! - upstream HTTP error → upstream status and message (429 only once retries are spent)
//! - anything else → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::employees::EmployeeError;
use crate::envelope::Envelope;
use crate::upstream::UpstreamError;

pub const NOT_FOUND_MESSAGE: &str = "Employee not found";

/// Error returned by handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EmployeeError> for ApiError {
    fn from(error: EmployeeError) -> Self {
        if error.is_not_found() {
            tracing::warn!(error = %error, "Employee not found");
            return Self::not_found();
        }

        match error {
            EmployeeError::InvalidInput(_) => Self::bad_request(error.to_string()),
            EmployeeError::Upstream(UpstreamError::Status { status, message }) => {
                tracing::error!(status = %status, message = %message, "HTTP error from upstream");
                Self::new(status, message)
            }
            other => {
                tracing::error!(error = %other, "Unexpected error");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: Envelope<()> = Envelope::failure(self.message);
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resilience::UpstreamOperation;

    #[test]
    fn test_not_found_mapping() {
        assert_eq!(ApiError::from(EmployeeError::NotFound), ApiError::not_found());

        let upstream_404 = EmployeeError::Upstream(UpstreamError::from_status(StatusCode::NOT_FOUND));
        let err = ApiError::from(upstream_404);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Employee not found");
    }

    #[test]
    fn test_rate_limit_passthrough() {
        let err = ApiError::from(EmployeeError::Upstream(UpstreamError::from_status(
            StatusCode::TOO_MANY_REQUESTS,
        )));
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.message(), "429 Too Many Requests");
    }

    #[test]
    fn test_unexpected_errors_are_500() {
        let err = ApiError::from(EmployeeError::Upstream(UpstreamError::Transport(
            "Something went wrong".into(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("Something went wrong"));

        let err = ApiError::from(EmployeeError::EmptyResponse(UpstreamOperation::Create));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_input_is_400() {
        let err = ApiError::from(EmployeeError::InvalidInput(vec!["salary must be greater than zero".into()]));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().contains("salary"));
    }

    #[tokio::test]
    async fn test_response_body_is_error_envelope() {
        let response = ApiError::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "error", "error": "Employee not found" }));
    }
}
