use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use crate::config::AppConfig;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm, text_response};

async fn call(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, _) = call(app(test_app_state()), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn state_starts_on_dashboard() {
    let (status, body) = call(app(test_app_state()), Method::GET, "/api/state", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tab"], "dashboard");
    assert_eq!(body["language"], "pt-BR");
    assert_eq!(body["networks"].as_array().unwrap().len(), 8);
    assert_eq!(body["home"]["threatLevel"], 64);
}

#[tokio::test]
async fn navigate_resolves_unknown_tabs_to_dashboard() {
    let state = test_app_state();
    let (_, body) = call(app(state.clone()), Method::PUT, "/api/view", Some(json!({"tab": "map"}))).await;
    assert_eq!(body["tab"], "map");
    let (_, body) = call(app(state), Method::PUT, "/api/view", Some(json!({"tab": "settings"}))).await;
    assert_eq!(body["tab"], "dashboard");
}

#[tokio::test]
async fn language_switch_relabels_navigation() {
    let state = test_app_state();
    let (_, body) = call(app(state), Method::PUT, "/api/language", Some(json!({"language": "en-US"}))).await;
    assert_eq!(body["language"], "en-US");
    assert_eq!(body["nav"][0]["label"], "Home");
}

#[tokio::test]
async fn catalog_is_resolved_per_language() {
    let (_, body) = call(app(test_app_state()), Method::GET, "/api/i18n/de-DE", None).await;
    assert_eq!(body["nav.home"], "Startseite");
    let (_, body) = call(app(test_app_state()), Method::GET, "/api/i18n/xx", None).await;
    assert_eq!(body["nav.home"], "Início");
}

#[tokio::test]
async fn open_filter_keeps_table_order() {
    let (status, body) = call(app(test_app_state()), Method::GET, "/api/networks?filter=open", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|n| n["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["3", "6", "7", "8"]);
}

#[tokio::test]
async fn rescan_conflicts_while_window_is_open() {
    let state = test_app_state();
    let (first, _) = call(app(state.clone()), Method::POST, "/api/networks/rescan", None).await;
    assert_eq!(first, StatusCode::ACCEPTED);
    let (second, body) = call(app(state), Method::POST, "/api/networks/rescan", None).await;
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E_ALREADY_SCANNING");
    assert_eq!(body["retryable"], true);
}

#[tokio::test]
async fn select_and_audit_errors() {
    let state = test_app_state();
    let (status, body) = call(app(state.clone()), Method::POST, "/api/networks/99/select", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_UNKNOWN_NETWORK");

    let (status, body) = call(app(state), Method::POST, "/api/audit", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E_NO_SELECTION");
}

#[tokio::test]
async fn audit_without_model_is_service_unavailable() {
    let state = test_app_state();
    let (status, _) = call(app(state.clone()), Method::POST, "/api/networks/1/select", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, body) = call(app(state.clone()), Method::POST, "/api/audit", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "E_LLM_NOT_CONFIGURED");

    let (_, body) = call(app(state), Method::GET, "/api/audit", None).await;
    assert_eq!(body["selected"]["ssid"], "TP-Link_9A42");
    assert_eq!(body["audit"]["status"], "failed");
}

#[tokio::test]
async fn blank_search_is_bad_request() {
    let (status, body) = call(app(test_app_state()), Method::POST, "/api/search", Some(json!({"query": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_EMPTY_QUERY");
}

#[tokio::test]
async fn assistant_round_trip() {
    let mock = Arc::new(MockLlm::new(vec![Ok(text_response("Olá!"))]));
    let state = test_app_state_with_llm(mock);

    let (_, body) = call(app(state.clone()), Method::POST, "/api/assistant", None).await;
    assert_eq!(body["session"]["transcript"].as_array().unwrap().len(), 1);
    assert_eq!(body["quickQuestions"].as_array().unwrap().len(), 4);

    let (status, body) =
        call(app(state.clone()), Method::POST, "/api/assistant/messages", Some(json!({"text": "oi"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"role": "assistant", "text": "Olá!"}));

    let (status, _) = call(app(state.clone()), Method::DELETE, "/api/assistant", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(state.workspace.read().await.assistant.is_none());
}

#[tokio::test]
async fn simulator_start_validation() {
    let state = test_app_state();
    let (status, body) =
        call(app(state.clone()), Method::POST, "/api/simulators/zero-key", Some(json!({"network_id": "3"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E_UNSUPPORTED_TARGET");

    let (status, body) =
        call(app(state.clone()), Method::POST, "/api/simulators/download", Some(json!({"platform": "beos"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_UNKNOWN_PLATFORM");

    let (status, body) = call(app(state.clone()), Method::GET, "/api/simulators/teleport", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_UNKNOWN_SIMULATOR");

    let (status, body) = call(app(state), Method::GET, "/api/simulators/download", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_RUN_NOT_FOUND");
}

#[tokio::test(start_paused = true)]
async fn simulator_is_busy_until_cancelled() {
    let state = test_app_state();
    let (status, body) = call(app(state.clone()), Method::POST, "/api/simulators/key-extraction", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "running");

    let (status, body) = call(app(state.clone()), Method::POST, "/api/simulators/key-extraction", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E_SIMULATOR_BUSY");

    let (_, body) = call(app(state.clone()), Method::DELETE, "/api/simulators/key-extraction", None).await;
    assert_eq!(body["status"], "cancelled");

    let (status, _) = call(app(state), Method::POST, "/api/simulators/key-extraction", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn generator_clamps_length() {
    let (status, body) = call(
        app(test_app_state()),
        Method::POST,
        "/api/generator",
        Some(json!({"length": 4, "includeSymbols": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["password"].as_str().unwrap().len(), 8);
    assert_eq!(body["charsetSize"], 62);
}

#[tokio::test]
async fn map_and_analysis_use_fallbacks() {
    let state = test_app_state();
    let (_, body) = call(app(state.clone()), Method::GET, "/api/map?openOnly=true", None).await;
    assert_eq!(body["markers"].as_array().unwrap().len(), 4);
    assert_eq!(body["center"]["latitude"], -23.5505);

    let (status, body) = call(app(state), Method::POST, "/api/map/analysis", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback"], true);
}

#[tokio::test]
async fn downloads_guides_and_share() {
    let state = test_app_state();
    let (_, body) = call(app(state.clone()), Method::GET, "/api/downloads", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);

    let (status, _) = call(app(state.clone()), Method::GET, "/api/extractor/guides/android", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(app(state), Method::GET, "/api/share", None).await;
    assert_eq!(body["url"], "http://localhost:3000");
}

#[tokio::test]
async fn static_dir_is_served_as_fallback() {
    let config = AppConfig { static_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))), ..AppConfig::default() };
    let state = crate::state::AppState::new(config, None);
    let (status, _) = call(app(state), Method::GET, "/Cargo.toml", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(app(test_app_state()), Method::GET, "/Cargo.toml", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
