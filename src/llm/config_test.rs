use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_gemini_key_and_models() {
    let cfg = LlmConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.maps_model, DEFAULT_MAPS_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn parses_overrides() {
    let cfg = LlmConfig::from_lookup(lookup(&[
        ("LLM_API_KEY_ENV", "TEST_KEY"),
        ("TEST_KEY", "k"),
        ("LLM_MODEL", "gemini-x"),
        ("LLM_MAPS_MODEL", "gemini-maps"),
        ("LLM_BASE_URL", "https://example.test/v1/"),
        ("LLM_MAX_OUTPUT_TOKENS", "512"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.model, "gemini-x");
    assert_eq!(cfg.maps_model, "gemini-maps");
    assert_eq!(cfg.base_url, "https://example.test/v1");
    assert_eq!(cfg.max_output_tokens, 512);
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn missing_key_names_the_variable() {
    let err = LlmConfig::from_lookup(lookup(&[("LLM_API_KEY_ENV", "MY_KEY")])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "MY_KEY"));
}

#[test]
fn blank_key_counts_as_missing() {
    let err = LlmConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { .. }));
}

#[test]
fn malformed_number_is_config_error() {
    let err = LlmConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k"), ("LLM_REQUEST_TIMEOUT_SECS", "soon")]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("LLM_REQUEST_TIMEOUT_SECS"));
}
