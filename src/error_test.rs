use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::*;

struct FakeError;

impl std::fmt::Display for FakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "something broke")
    }
}

impl ErrorCode for FakeError {
    fn error_code(&self) -> &'static str {
        "E_FAKE"
    }
}

#[test]
fn retryable_defaults_to_false() {
    assert!(!FakeError.retryable());
}

#[test]
fn new_preserves_code_and_message() {
    let api = ApiError::new(StatusCode::BAD_GATEWAY, &FakeError);
    assert_eq!(api.status, StatusCode::BAD_GATEWAY);
    assert_eq!(api.code, "E_FAKE");
    assert_eq!(api.message, "something broke");
    assert!(!api.retryable);
}

#[test]
fn llm_not_configured_is_service_unavailable() {
    let api = ApiError::llm_not_configured();
    assert_eq!(api.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(api.code, "E_LLM_NOT_CONFIGURED");
}

#[test]
fn session_not_found_is_404() {
    let id = uuid::Uuid::new_v4();
    let api = ApiError::session_not_found(id);
    assert_eq!(api.status, StatusCode::NOT_FOUND);
    assert!(api.message.contains(&id.to_string()));
}

#[test]
fn into_response_uses_the_chosen_status() {
    let response = ApiError::llm_not_configured().into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
