//! Response schemas — typed declarations of structured model output.
//!
//! DESIGN
//! ======
//! A [`Schema`] is sent with the request (serialized in the provider's
//! `responseSchema` dialect) and then reused at the boundary to validate the
//! returned JSON before it is decoded into a Rust type. Any mismatch becomes
//! a [`SchemaError`]; callers never see a half-filled struct.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64() || value.as_f64().is_some_and(|f| f.fract() == 0.0),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("missing required field `{path}`")]
    MissingField { path: String },
    #[error("field `{path}` is not of type {expected:?}")]
    TypeMismatch { path: String, expected: SchemaType },
    #[error("field `{path}` is out of range: {detail}")]
    OutOfRange { path: String, detail: String },
    #[error("decode failed: {0}")]
    Decode(String),
}

/// Declared JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    fn leaf(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            items: None,
            properties: BTreeMap::new(),
            property_ordering: Vec::new(),
            required: Vec::new(),
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::leaf(SchemaType::String)
    }

    #[must_use]
    pub fn number() -> Self {
        Self::leaf(SchemaType::Number)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::leaf(SchemaType::Integer)
    }

    #[must_use]
    pub fn boolean() -> Self {
        Self::leaf(SchemaType::Boolean)
    }

    #[must_use]
    pub fn array_of(items: Schema) -> Self {
        Self { items: Some(Box::new(items)), ..Self::leaf(SchemaType::Array) }
    }

    /// Object with every listed property required, in declaration order.
    #[must_use]
    pub fn object(fields: Vec<(&str, Schema)>) -> Self {
        let property_ordering: Vec<String> = fields.iter().map(|(name, _)| (*name).to_owned()).collect();
        let properties = fields
            .into_iter()
            .map(|(name, schema)| (name.to_owned(), schema))
            .collect();
        Self {
            properties,
            required: property_ordering.clone(),
            property_ordering,
            ..Self::leaf(SchemaType::Object)
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check `value` against this schema.
    ///
    /// # Errors
    ///
    /// Returns the first missing required field or type mismatch found.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        self.validate_at(value, "$")
    }

    fn validate_at(&self, value: &Value, path: &str) -> Result<(), SchemaError> {
        if !self.kind.matches(value) {
            return Err(SchemaError::TypeMismatch { path: path.to_owned(), expected: self.kind });
        }
        match self.kind {
            SchemaType::Array => {
                if let (Some(items), Some(values)) = (&self.items, value.as_array()) {
                    for (i, item) in values.iter().enumerate() {
                        items.validate_at(item, &format!("{path}[{i}]"))?;
                    }
                }
            }
            SchemaType::Object => {
                let Some(map) = value.as_object() else {
                    return Err(SchemaError::TypeMismatch { path: path.to_owned(), expected: self.kind });
                };
                for name in &self.required {
                    if map.get(name).is_none_or(Value::is_null) {
                        return Err(SchemaError::MissingField { path: format!("{path}.{name}") });
                    }
                }
                for (name, schema) in &self.properties {
                    if let Some(field) = map.get(name).filter(|v| !v.is_null()) {
                        schema.validate_at(field, &format!("{path}.{name}"))?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Parse `text` as JSON, validate it, and decode it into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the text is not JSON, does not match the
    /// declared shape, or cannot be decoded into `T`.
    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, SchemaError> {
        let value: Value = serde_json::from_str(text.trim()).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|e| SchemaError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
