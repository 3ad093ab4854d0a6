//! Response envelope shared by the upstream store and this service.
//!
//! Every upstream body and every error emitted by the proxy has the shape
//! `{ "data": ..., "status": "success" | "error", "error": ... }`.

use serde::{Deserialize, Serialize};

/// Outcome marker carried by an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(
        rename = "success",
        alias = "ok",
        alias = "Successfully processed request."
    )]
    Success,
    #[serde(rename = "error", alias = "Failed to process request.")]
    Error,
}

/// Generic `{data, status, error}` wrapper.
///
/// `data` is only set on success and `error` only on failure. Absent members
/// are omitted when serializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// serde's `default` on a generic Option would otherwise require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            status: Some(Status::Success),
            error: None,
        }
    }

    /// Failed envelope carrying a human-readable message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            status: Some(Status::Error),
            error: Some(message.into()),
        }
    }

    /// Consume the envelope, yielding its payload if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
