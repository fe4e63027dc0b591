//! Normalized response shapes.
//!
//! The service is not consistent: list endpoints answer with a bare JSON
//! array, detail endpoints with a JSON object, and a key without the right
//! permissions gets an HTML page. [`Envelope`] folds all three into one type.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Message returned when the response body is not a JSON document.
pub const UNAUTHORIZED_MESSAGE: &str = "Probably unauthorized key, enable debug if needed";

const DECODE_FAILURE_STATUS: u16 = 400;

/// A normalized response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    /// The body was a JSON array.
    List { results: Vec<Value>, count: usize },
    /// The body was a JSON object; its fields are kept as-is.
    Object(Map<String, Value>),
    /// The body could not be decoded. `details` (raw body) and `exception`
    /// (decoder message) are only filled in debug mode.
    Error {
        status: u16,
        message: String,
        details: Option<String>,
        exception: Option<String>,
    },
}

impl Envelope {
    /// Normalizes a raw response body.
    pub fn from_body(body: &str, debug: bool) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Array(results)) => {
                let count = results.len();
                Envelope::List { results, count }
            }
            Ok(Value::Object(fields)) => Envelope::Object(fields),
            Ok(other) => Self::decode_failure(
                body,
                format!("expected a JSON array or object, got {}", json_kind(&other)),
                debug,
            ),
            Err(e) => Self::decode_failure(body, e.to_string(), debug),
        }
    }

    fn decode_failure(body: &str, exception: String, debug: bool) -> Self {
        tracing::warn!("Response body is not usable JSON: {}", exception);
        Envelope::Error {
            status: DECODE_FAILURE_STATUS,
            message: UNAUTHORIZED_MESSAGE.to_string(),
            details: debug.then(|| body.to_string()),
            exception: debug.then_some(exception),
        }
    }

    /// Returns true for [`Envelope::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Error { .. })
    }

    /// Writes this envelope's fields into `map`, replacing existing keys.
    pub fn write_fields(&self, map: &mut Map<String, Value>) {
        match self {
            Envelope::List { results, count } => {
                map.insert("results".to_string(), Value::Array(results.clone()));
                map.insert("count".to_string(), Value::from(*count));
            }
            Envelope::Object(fields) => {
                for (key, value) in fields {
                    map.insert(key.clone(), value.clone());
                }
            }
            Envelope::Error {
                status,
                message,
                details,
                exception,
            } => {
                map.insert("status".to_string(), Value::from(*status));
                map.insert("message".to_string(), Value::from(message.as_str()));
                if let Some(details) = details {
                    map.insert("details".to_string(), Value::from(details.as_str()));
                }
                if let Some(exception) = exception {
                    map.insert("exception".to_string(), Value::from(exception.as_str()));
                }
            }
        }
    }

    /// Flat JSON mapping of this envelope.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        self.write_fields(&mut map);
        Value::Object(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Request details attached to a response when the client runs in debug mode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DebugInfo {
    /// Fully resolved request URL, query string included.
    pub url: String,
    /// JSON payload of a POST request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
}

/// What every operation returns: the normalized body plus optional debug
/// information.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub envelope: Envelope,
    pub debug: Option<DebugInfo>,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.envelope.is_error()
    }

    /// Flat JSON mapping: debug fields first, then the envelope fields.
    /// A response field with the same name as a debug field wins.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(debug) = &self.debug {
            map.insert("url".to_string(), Value::from(debug.url.as_str()));
            if let Some(query) = &debug.query {
                map.insert("query".to_string(), query.clone());
            }
        }
        self.envelope.write_fields(&mut map);
        Value::Object(map)
    }
}

impl Serialize for ApiResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalar_body_is_a_decode_failure() {
        let envelope = Envelope::from_body("\"ok\"", true);
        match envelope {
            Envelope::Error { exception, .. } => {
                assert_eq!(
                    exception.as_deref(),
                    Some("expected a JSON array or object, got a string")
                );
            }
            other => panic!("unexpected envelope: {:?}", other),
        }
    }

    #[test]
    fn empty_array_counts_zero() {
        assert_eq!(
            Envelope::from_body("[]", false).to_value(),
            json!({"results": [], "count": 0})
        );
    }

    #[test]
    fn response_field_overrides_debug_url() {
        let response = ApiResponse {
            envelope: Envelope::from_body(r#"{"id": 7, "url": "http://evil.example"}"#, true),
            debug: Some(DebugInfo {
                url: "https://phishing-initiative.eu/api/v1/urls/7/".to_string(),
                query: None,
            }),
        };
        assert_eq!(
            response.to_value(),
            json!({"id": 7, "url": "http://evil.example"})
        );
    }

    #[test]
    fn debug_fields_serialize_with_error() {
        let response = ApiResponse {
            envelope: Envelope::from_body("<html></html>", true),
            debug: Some(DebugInfo {
                url: "https://example.com/api/v1/submissions/".to_string(),
                query: Some(json!({"url": "http://evil.example"})),
            }),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["url"], "https://example.com/api/v1/submissions/");
        assert_eq!(value["query"]["url"], "http://evil.example");
        assert_eq!(value["status"], 400);
        assert_eq!(value["details"], "<html></html>");
        assert!(value["exception"].is_string());
    }
}
