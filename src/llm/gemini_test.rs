use serde_json::{Value, json};

use super::*;

fn body_json(request: &GenerateRequest) -> Value {
    serde_json::to_value(build_body(request, 2048)).unwrap()
}

// =============================================================================
// build_body
// =============================================================================

#[test]
fn plain_prompt_body() {
    let body = body_json(&GenerateRequest::prompt("hi"));
    assert_eq!(body["contents"], json!([{ "role": "user", "parts": [{ "text": "hi" }] }]));
    assert_eq!(body["generationConfig"], json!({ "maxOutputTokens": 2048 }));
    assert!(body.get("systemInstruction").is_none());
    assert!(body.get("tools").is_none());
    assert!(body.get("toolConfig").is_none());
}

#[test]
fn system_history_and_temperature() {
    let request = GenerateRequest {
        system: Some("be brief".into()),
        messages: vec![Message::model("hello"), Message::user("how?")],
        temperature: Some(0.5),
        max_output_tokens: Some(64),
        ..GenerateRequest::default()
    };
    let body = body_json(&request);
    assert_eq!(body["systemInstruction"], json!({ "parts": [{ "text": "be brief" }] }));
    assert_eq!(body["contents"][0]["role"], "model");
    assert_eq!(body["contents"][1]["parts"][0]["text"], "how?");
    assert_eq!(body["generationConfig"]["temperature"], 0.5);
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 64);
}

#[test]
fn schema_sets_json_mime_type() {
    let request = GenerateRequest {
        response_schema: Some(Schema::object(vec![("ok", Schema::boolean())])),
        ..GenerateRequest::prompt("x")
    };
    let config = &body_json(&request)["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(config["responseSchema"]["properties"]["ok"]["type"], "BOOLEAN");
}

#[test]
fn search_grounding_adds_google_search_tool() {
    let request = GenerateRequest { grounding: Some(Grounding::Search), ..GenerateRequest::prompt("x") };
    let body = body_json(&request);
    assert_eq!(body["tools"], json!([{ "googleSearch": {} }]));
    assert!(body.get("toolConfig").is_none());
}

#[test]
fn maps_grounding_adds_tool_and_location() {
    let request = GenerateRequest {
        grounding: Some(Grounding::Maps { latitude: -23.5505, longitude: -46.6333 }),
        ..GenerateRequest::prompt("x")
    };
    let body = body_json(&request);
    assert_eq!(body["tools"], json!([{ "googleMaps": {} }]));
    assert_eq!(
        body["toolConfig"],
        json!({ "retrievalConfig": { "latLng": { "latitude": -23.5505, "longitude": -46.6333 } } })
    );
}

#[test]
fn endpoint_joins_model() {
    assert_eq!(
        endpoint("https://example.test/v1beta", "gemini-2.5-flash"),
        "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parses_text_usage_and_model() {
    let json = r#"{
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "world" }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 3, "totalTokenCount": 15 },
        "modelVersion": "gemini-3-flash-preview-001"
    }"#;
    let resp = parse_response(json, "gemini-3-flash-preview").unwrap();
    assert_eq!(resp.text, "Hello world");
    assert_eq!(resp.finish_reason, "STOP");
    assert_eq!(resp.model, "gemini-3-flash-preview-001");
    assert_eq!(resp.input_tokens, 12);
    assert_eq!(resp.output_tokens, 3);
    assert!(resp.citations.is_empty());
}

#[test]
fn skips_thought_parts() {
    let json = r#"{"candidates":[{"content":{"parts":[{"text":"thinking","thought":true},{"text":"answer"}]}}]}"#;
    let resp = parse_response(json, "m").unwrap();
    assert_eq!(resp.text, "answer");
    assert_eq!(resp.model, "m");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn collects_web_citations_only() {
    let json = r#"{
        "candidates": [{
            "content": { "parts": [{ "text": "grounded" }] },
            "groundingMetadata": { "groundingChunks": [
                { "web": { "uri": "https://a.test", "title": "A" } },
                { "retrievedContext": { "uri": "gs://x" } },
                { "web": { "uri": "https://b.test" } }
            ] }
        }]
    }"#;
    let resp = parse_response(json, "m").unwrap();
    assert_eq!(
        resp.citations,
        vec![
            Citation { title: Some("A".into()), uri: Some("https://a.test".into()) },
            Citation { title: None, uri: Some("https://b.test".into()) },
        ]
    );
}

#[test]
fn no_candidates_is_empty_response() {
    let err = parse_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#, "m").unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[test]
fn candidate_without_content_yields_empty_text() {
    let resp = parse_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#, "m").unwrap();
    assert_eq!(resp.text, "");
    assert_eq!(resp.finish_reason, "SAFETY");
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(parse_response("not json", "m"), Err(LlmError::ApiParse(_))));
}
