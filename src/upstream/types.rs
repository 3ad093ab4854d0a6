//! Upstream error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the upstream employee store.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Upstream answered with a non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Request did not complete within the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Connection or protocol failure.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// Success response whose body could not be decoded.
    #[error("invalid upstream payload: {0}")]
    Decode(String),

    /// Client could not be built from configuration.
    #[error("invalid upstream configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    /// Status error carrying the canonical status line as its message.
    pub fn from_status(status: StatusCode) -> Self {
        Self::Status {
            status,
            message: status_line(status),
        }
    }

    /// HTTP status reported by upstream, if the failure was a status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upstream signalled too many requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Upstream does not know the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_status(status)
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// `"429 Too Many Requests"` style rendering of a status code.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
