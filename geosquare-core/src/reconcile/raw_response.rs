use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ReconcileError;

/// an area response exactly as received from the remote service. newer
/// service revisions send the response object JSON-encoded inside a string,
/// older ones send the object itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawResponse {
    Encoded(String),
    Structured(Value),
}

impl RawResponse {
    /// decodes the payload into a structured value. a string payload, whether
    /// received as text or as a JSON string value, is decoded exactly once.
    pub fn decode(self) -> Result<Value, ReconcileError> {
        match self {
            RawResponse::Encoded(text) | RawResponse::Structured(Value::String(text)) => {
                serde_json::from_str(&text)
                    .map_err(|e| ReconcileError::MalformedPayload(e.to_string()))
            }
            RawResponse::Structured(value) => Ok(value),
        }
    }
}

impl From<String> for RawResponse {
    fn from(value: String) -> Self {
        RawResponse::Encoded(value)
    }
}

impl From<&str> for RawResponse {
    fn from(value: &str) -> Self {
        RawResponse::Encoded(value.to_string())
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        RawResponse::Structured(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_string_deserializes_as_encoded() {
        let raw: RawResponse =
            serde_json::from_str(r#""{\"lat_start\":1}""#).expect("test invariant failed");
        assert_eq!(raw, RawResponse::Encoded(r#"{"lat_start":1}"#.to_string()));
    }

    #[test]
    fn test_json_object_deserializes_as_structured() {
        let raw: RawResponse =
            serde_json::from_str(r#"{"lat_start":1}"#).expect("test invariant failed");
        assert_eq!(raw, RawResponse::Structured(json!({"lat_start": 1})));
    }

    #[test]
    fn test_string_value_is_decoded() {
        let raw = RawResponse::Structured(Value::String(r#"{"a":true}"#.to_string()));
        assert_eq!(raw.decode(), Ok(json!({"a": true})));
    }

    #[test]
    fn test_bad_text_is_malformed() {
        let raw = RawResponse::from("{not json");
        assert!(matches!(
            raw.decode(),
            Err(ReconcileError::MalformedPayload(_))
        ));
    }
}
