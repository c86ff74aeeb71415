use super::*;

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parses_first_choice_content() {
    let json = r#"{
        "choices": [{ "message": { "content": "{\"optimized_prompt\": \"better\"}" } }],
        "model": "mixtral-8x7b-32768",
        "usage": { "prompt_tokens": 90, "completion_tokens": 12 }
    }"#;

    let completion = parse_response(json).unwrap();
    assert_eq!(completion.text, "{\"optimized_prompt\": \"better\"}");
    assert_eq!(completion.model, "mixtral-8x7b-32768");
    assert_eq!(completion.input_tokens, 90);
    assert_eq!(completion.output_tokens, 12);
}

#[test]
fn missing_usage_defaults_to_zero() {
    let json = r#"{
        "choices": [{ "message": { "content": "ok" } }],
        "model": "m"
    }"#;

    let completion = parse_response(json).unwrap();
    assert_eq!(completion.input_tokens, 0);
    assert_eq!(completion.output_tokens, 0);
}

#[test]
fn empty_choices_is_an_api_parse_error() {
    let json = r#"{ "choices": [], "model": "m" }"#;
    assert!(matches!(parse_response(json).unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn null_content_is_an_api_parse_error() {
    let json = r#"{ "choices": [{ "message": { "content": null } }], "model": "m" }"#;
    assert!(matches!(parse_response(json).unwrap_err(), LlmError::ApiParse(_)));
}

#[test]
fn malformed_body_is_an_api_parse_error() {
    assert!(matches!(parse_response("not json").unwrap_err(), LlmError::ApiParse(_)));
}
