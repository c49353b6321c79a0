//! Structured error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{"error": <code>, "message": <text>}`
///
/// `error` is a stable machine-readable code; `message` is for humans and
/// may change wording between releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::new("invalid_identifier", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new("method_not_allowed", message)
    }

    pub fn store_unavailable() -> Self {
        Self::new("store_unavailable", "The post store is currently unavailable")
    }

    pub fn internal_error() -> Self {
        Self::new("internal_error", "Internal server error")
    }
}
