use super::*;
use config::{LlmTimeouts, DEFAULT_BASE_URL};

fn client() -> LlmClient {
    LlmClient::from_config(LlmConfig {
        api_key: "k".into(),
        model: "text-model".into(),
        maps_model: "maps-model".into(),
        base_url: DEFAULT_BASE_URL.into(),
        max_output_tokens: 100,
        timeouts: LlmTimeouts { request_secs: 1, connect_secs: 1 },
    })
    .unwrap()
}

#[test]
fn model_reports_default() {
    assert_eq!(client().model(), "text-model");
}

#[test]
fn maps_grounding_routes_to_maps_model() {
    let c = client();
    let maps = GenerateRequest {
        grounding: Some(Grounding::Maps { latitude: 0.0, longitude: 0.0 }),
        ..GenerateRequest::prompt("x")
    };
    let search = GenerateRequest { grounding: Some(Grounding::Search), ..GenerateRequest::prompt("x") };
    assert_eq!(c.model_for(&maps), "maps-model");
    assert_eq!(c.model_for(&search), "text-model");
    assert_eq!(c.model_for(&GenerateRequest::prompt("x")), "text-model");
}
