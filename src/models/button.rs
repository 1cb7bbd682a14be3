use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored, declarative description of one invokable outbound call.
///
/// `headers` and `payload_parameters` are persisted as compact JSON object
/// text; an empty mapping is stored as `{}`. The execution path never
/// mutates a button except for `last_executed_at`.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ControlButton {
    pub id: i64,
    pub label: String,
    pub icon: Option<String>,
    pub kind: ActionKind,
    pub target_endpoint: String,
    pub http_method: HttpMethod,
    pub headers: String,
    pub payload_parameters: String,
    pub output_format: OutputFormat,
    pub validation_enabled: bool,
    pub validation_schema: Option<String>,
    pub preview_enabled: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_executed_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub active: bool,
}

impl ControlButton {
    /// Declared header set. Malformed stored text degrades to an empty map
    /// rather than failing the caller.
    pub fn header_map(&self) -> HashMap<String, String> {
        if self.headers.is_empty() || self.headers == "{}" {
            return HashMap::new();
        }
        match serde_json::from_str(&self.headers) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Button {} has malformed headers, ignoring: {e}", self.id);
                HashMap::new()
            }
        }
    }

    /// Declared payload-parameter template. Same degrade-to-empty contract
    /// as `header_map`.
    pub fn payload_map(&self) -> Map<String, Value> {
        if self.payload_parameters.is_empty() || self.payload_parameters == "{}" {
            return Map::new();
        }
        match serde_json::from_str(&self.payload_parameters) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(
                    "Button {} has malformed payload parameters, ignoring: {e}",
                    self.id
                );
                Map::new()
            }
        }
    }

    /// Human-readable descriptor captured into the execution log,
    /// e.g. `GET https://example.test/ping`.
    pub fn action_descriptor(&self) -> String {
        format!("{} {}", self.http_method, self.target_endpoint)
    }
}

/// Serialize a mapping for storage. Empty or unserializable input encodes
/// as the empty-object literal.
pub fn encode_map<M: Serialize>(map: &M) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| String::from("{}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ActionKind {
    #[serde(rename = "REST_API_CALL")]
    #[sqlx(rename = "REST_API_CALL")]
    RestApiCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum OutputFormat {
    #[serde(rename = "JSON")]
    #[sqlx(rename = "JSON")]
    Json,
    #[serde(rename = "PLAIN_TEXT")]
    #[sqlx(rename = "PLAIN_TEXT")]
    PlainText,
    #[serde(rename = "XML")]
    #[sqlx(rename = "XML")]
    Xml,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(headers: &str) -> ControlButton {
        ControlButton {
            id: 1,
            label: "Ping".to_string(),
            icon: None,
            kind: ActionKind::RestApiCall,
            target_endpoint: "https://example.test/ping".to_string(),
            http_method: HttpMethod::Get,
            headers: headers.to_string(),
            payload_parameters: "{}".to_string(),
            output_format: OutputFormat::Json,
            validation_enabled: true,
            validation_schema: None,
            preview_enabled: true,
            created_by: "system".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_executed_at: None,
            category: None,
            active: true,
        }
    }

    #[test]
    fn header_map_round_trips() {
        let b = button(r#"{"X-Key":"v","Accept":"application/json"}"#);
        let map = b.header_map();
        assert_eq!(map.get("X-Key").map(String::as_str), Some("v"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn malformed_headers_degrade_to_empty() {
        let b = button("{not json");
        assert!(b.header_map().is_empty());
    }

    #[test]
    fn empty_object_literal_is_empty_map() {
        let b = button("{}");
        assert!(b.header_map().is_empty());
    }

    #[test]
    fn action_descriptor_pairs_method_and_endpoint() {
        assert_eq!(button("{}").action_descriptor(), "GET https://example.test/ping");
    }

    #[test]
    fn enums_use_stored_spellings() {
        assert_eq!(
            serde_json::to_string(&HttpMethod::Delete).unwrap(),
            "\"DELETE\""
        );
        assert_eq!(
            serde_json::to_string(&OutputFormat::PlainText).unwrap(),
            "\"PLAIN_TEXT\""
        );
        assert_eq!(
            serde_json::to_string(&ActionKind::RestApiCall).unwrap(),
            "\"REST_API_CALL\""
        );
    }
}
