use super::*;
use serde::Deserialize;
use serde_json::json;

fn report_schema() -> Schema {
    Schema::object(vec![
        ("score", Schema::number()),
        ("vulnerabilities", Schema::array_of(Schema::string())),
        ("label", Schema::string().describe("short label")),
    ])
}

#[derive(Debug, Deserialize, PartialEq)]
struct Report {
    score: f64,
    vulnerabilities: Vec<String>,
    label: String,
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn serializes_in_response_schema_dialect() {
    let json = serde_json::to_value(report_schema()).unwrap();
    assert_eq!(json["type"], "OBJECT");
    assert_eq!(json["properties"]["score"]["type"], "NUMBER");
    assert_eq!(json["properties"]["vulnerabilities"]["items"]["type"], "STRING");
    assert_eq!(json["properties"]["label"]["description"], "short label");
    assert_eq!(json["required"], json!(["score", "vulnerabilities", "label"]));
    assert_eq!(json["propertyOrdering"], json!(["score", "vulnerabilities", "label"]));
}

#[test]
fn leaf_schema_omits_empty_fields() {
    let json = serde_json::to_value(Schema::boolean()).unwrap();
    assert_eq!(json, json!({ "type": "BOOLEAN" }));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn validate_accepts_matching_value() {
    let value = json!({ "score": 42, "vulnerabilities": ["wps"], "label": "x", "extra": true });
    assert!(report_schema().validate(&value).is_ok());
}

#[test]
fn validate_rejects_missing_required_field() {
    let value = json!({ "score": 42, "vulnerabilities": [] });
    let err = report_schema().validate(&value).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { ref path } if path == "$.label"));
}

#[test]
fn validate_treats_null_as_missing() {
    let value = json!({ "score": null, "vulnerabilities": [], "label": "x" });
    assert!(matches!(report_schema().validate(&value), Err(SchemaError::MissingField { .. })));
}

#[test]
fn validate_reports_path_of_nested_mismatch() {
    let value = json!({ "score": 1, "vulnerabilities": ["a", 7], "label": "x" });
    let err = report_schema().validate(&value).unwrap_err();
    match err {
        SchemaError::TypeMismatch { path, expected } => {
            assert_eq!(path, "$.vulnerabilities[1]");
            assert_eq!(expected, SchemaType::String);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn integer_accepts_whole_floats_only() {
    assert!(Schema::integer().validate(&json!(3)).is_ok());
    assert!(Schema::integer().validate(&json!(3.0)).is_ok());
    assert!(Schema::integer().validate(&json!(3.5)).is_err());
}

#[test]
fn top_level_type_mismatch() {
    let err = report_schema().validate(&json!([1, 2])).unwrap_err();
    assert!(matches!(err, SchemaError::TypeMismatch { expected: SchemaType::Object, .. }));
}

// =============================================================================
// DECODE
// =============================================================================

#[test]
fn decode_parses_validates_and_deserializes() {
    let text = r#"  {"score": 70.5, "vulnerabilities": ["a", "b"], "label": "ok"}  "#;
    let report: Report = report_schema().decode(text).unwrap();
    assert_eq!(
        report,
        Report { score: 70.5, vulnerabilities: vec!["a".into(), "b".into()], label: "ok".into() }
    );
}

#[test]
fn decode_rejects_non_json() {
    let err = report_schema().decode::<Report>("Sure! Here is the report").unwrap_err();
    assert!(matches!(err, SchemaError::InvalidJson(_)));
}

#[test]
fn decode_surfaces_target_type_errors() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Narrow {
        score: u8,
    }
    let err = Schema::object(vec![("score", Schema::number())])
        .decode::<Narrow>(r#"{"score": 300}"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::Decode(_)));
}
