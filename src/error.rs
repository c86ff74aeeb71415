//! Structured error reporting shared by all service layers.
//!
//! DESIGN
//! ======
//! Every error type implements [`ErrorCode`] so failures carry a grepable
//! code and a retryable flag all the way to the API boundary. Route
//! handlers convert domain errors into an [`ApiError`], which serializes
//! as a flat JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag for structured error bodies.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Error body returned by route handlers.
///
/// Serializes as `{"error": {"code", "message", "retryable"}}` with the
/// HTTP status chosen by the constructor.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    /// Wrap a domain error with an explicit HTTP status.
    pub fn new<E: ErrorCode>(status: StatusCode, err: &E) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }

    /// The LLM client was not configured at startup.
    #[must_use]
    pub fn llm_not_configured() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            code: "E_LLM_NOT_CONFIGURED",
            message: "LLM client not configured".into(),
            retryable: false,
        }
    }

    /// The referenced chat session does not exist.
    #[must_use]
    pub fn session_not_found(id: uuid::Uuid) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "E_SESSION_NOT_FOUND",
            message: format!("unknown session: {id}"),
            retryable: false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
                "retryable": self.retryable,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
