use std::sync::Arc;

use super::*;
use crate::config::AppConfig;
use crate::error::ErrorCode;
use crate::rate_limit::RateLimitConfig;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm, text_response};

#[tokio::test]
async fn missing_llm_is_not_configured() {
    let state = test_app_state();
    let err = generate(&state, AiFeature::Search, &GenerateRequest::prompt("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::LlmNotConfigured));
    assert_eq!(err.error_code(), "E_LLM_NOT_CONFIGURED");
    assert_eq!(err.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn passes_request_through_once() {
    let mock = Arc::new(MockLlm::new(vec![Ok(text_response("hi"))]));
    let state = test_app_state_with_llm(mock.clone());
    let resp = generate(&state, AiFeature::Assistant, &GenerateRequest::prompt("hello"))
        .await
        .unwrap();
    assert_eq!(resp.text, "hi");
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn provider_error_is_wrapped_with_its_code() {
    let mock = Arc::new(MockLlm::new(vec![Err(LlmError::ApiResponse { status: 503, body: String::new() })]));
    let state = test_app_state_with_llm(mock);
    let err = generate(&state, AiFeature::Audit, &GenerateRequest::prompt("x"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "E_API_RESPONSE");
    assert!(err.retryable());
}

#[tokio::test]
async fn rate_limit_blocks_before_calling_provider() {
    let mock = Arc::new(MockLlm::new(vec![Ok(text_response("a")), Ok(text_response("b"))]));
    let config = AppConfig {
        rate_limits: RateLimitConfig { per_feature_limit: 1, ..RateLimitConfig::default() },
        ..AppConfig::default()
    };
    let state = crate::state::AppState::new(config, Some(mock.clone()));

    generate(&state, AiFeature::Search, &GenerateRequest::prompt("1"))
        .await
        .unwrap();
    let err = generate(&state, AiFeature::Search, &GenerateRequest::prompt("2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::RateLimited(_)));
    assert_eq!(err.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(mock.requests().len(), 1);
}

#[test]
fn schema_errors_become_llm_errors() {
    let err: AiError = SchemaError::InvalidJson("eof".into()).into();
    assert_eq!(err.error_code(), "E_SCHEMA");
}
