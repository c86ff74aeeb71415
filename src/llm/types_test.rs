use super::*;

// =============================================================================
// LlmError::error_code — all 7 variants
// =============================================================================

#[test]
fn error_code_config_parse() {
    assert_eq!(LlmError::ConfigParse("bad".into()).error_code(), "E_CONFIG_PARSE");
}

#[test]
fn error_code_missing_api_key() {
    assert_eq!(LlmError::MissingApiKey { var: "KEY".into() }.error_code(), "E_MISSING_API_KEY");
}

#[test]
fn error_code_api_request() {
    assert_eq!(LlmError::ApiRequest("timeout".into()).error_code(), "E_API_REQUEST");
}

#[test]
fn error_code_rate_limited() {
    assert_eq!(LlmError::RateLimited { retry_after_secs: None }.error_code(), "E_RATE_LIMITED");
}

#[test]
fn error_code_api_response() {
    assert_eq!(LlmError::ApiResponse { status: 500, body: "oops".into() }.error_code(), "E_API_RESPONSE");
}

#[test]
fn error_code_api_parse() {
    assert_eq!(LlmError::ApiParse("json".into()).error_code(), "E_API_PARSE");
}

#[test]
fn error_code_http_client_build() {
    assert_eq!(LlmError::HttpClientBuild("tls".into()).error_code(), "E_HTTP_CLIENT_BUILD");
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_rate_limited() {
    assert!(LlmError::RateLimited { retry_after_secs: Some(30) }.retryable());
}

#[test]
fn retryable_api_response_5xx() {
    assert!(LlmError::ApiResponse { status: 500, body: "internal".into() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: "unavailable".into() }.retryable());
}

#[test]
fn not_retryable_api_response_4xx() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad request".into() }.retryable());
    assert!(!LlmError::ApiResponse { status: 401, body: "unauthorized".into() }.retryable());
}

#[test]
fn not_retryable_config_and_parse_errors() {
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::HttpClientBuild("tls".into()).retryable());
}

// =============================================================================
// RATE-LIMIT DISCRIMINATION
// =============================================================================

#[test]
fn only_rate_limited_is_the_rate_limit_signal() {
    assert!(LlmError::RateLimited { retry_after_secs: None }.is_rate_limited());
    assert!(!LlmError::ApiResponse { status: 429, body: String::new() }.is_rate_limited());
    assert!(!LlmError::ApiRequest("x".into()).is_rate_limited());
}

// =============================================================================
// MOCK
// =============================================================================

#[tokio::test]
async fn mock_replays_script_and_counts_calls() {
    let llm = mock::MockLlm::texts(&["one", "two"]);
    assert_eq!(llm.complete("s", "u", 0.0).await.unwrap().text, "one");
    assert_eq!(llm.complete("s", "u", 0.0).await.unwrap().text, "two");
    assert!(llm.complete("s", "u", 0.0).await.is_err());
    assert_eq!(llm.calls(), 3);
}
