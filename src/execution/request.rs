use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::models::{ControlButton, HttpMethod};

/// Fully-specified outbound request, derived from a button definition plus
/// the run-time input parameters.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Translate a definition and input parameters into a concrete request.
///
/// GET and DELETE never carry a body. POST and PUT always carry the runtime
/// input as a JSON body — the stored payload-parameter template is a
/// documentation/default set and is not merged in here. Malformed declared
/// headers degrade to none (see `ControlButton::header_map`).
pub fn build(button: &ControlButton, input: &Map<String, Value>) -> OutboundRequest {
    let body = match button.http_method {
        HttpMethod::Post | HttpMethod::Put => Some(Value::Object(input.clone())),
        HttpMethod::Get | HttpMethod::Delete => None,
    };

    OutboundRequest {
        method: button.http_method,
        url: button.target_endpoint.clone(),
        headers: button.header_map(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActionKind, OutputFormat};
    use chrono::Utc;
    use serde_json::json;

    fn button(method: HttpMethod, headers: &str) -> ControlButton {
        ControlButton {
            id: 7,
            label: "Restart cache".to_string(),
            icon: None,
            kind: ActionKind::RestApiCall,
            target_endpoint: "https://ops.example.test/cache/restart".to_string(),
            http_method: method,
            headers: headers.to_string(),
            payload_parameters: "{}".to_string(),
            output_format: OutputFormat::Json,
            validation_enabled: true,
            validation_schema: None,
            preview_enabled: true,
            created_by: "ops".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_executed_at: None,
            category: None,
            active: true,
        }
    }

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn get_and_delete_never_carry_a_body() {
        let input = params(json!({"force": true}));
        assert!(build(&button(HttpMethod::Get, "{}"), &input).body.is_none());
        assert!(build(&button(HttpMethod::Delete, "{}"), &input).body.is_none());
    }

    #[test]
    fn post_and_put_carry_input_parameters() {
        let input = params(json!({"name": "cache-a"}));
        let req = build(&button(HttpMethod::Post, "{}"), &input);
        assert_eq!(req.body, Some(json!({"name": "cache-a"})));

        let req = build(&button(HttpMethod::Put, "{}"), &input);
        assert_eq!(req.body, Some(json!({"name": "cache-a"})));
    }

    #[test]
    fn post_with_no_input_sends_empty_object() {
        let req = build(&button(HttpMethod::Post, "{}"), &Map::new());
        assert_eq!(req.body, Some(json!({})));
    }

    #[test]
    fn declared_headers_are_attached() {
        let req = build(
            &button(HttpMethod::Get, r#"{"X-Key":"v"}"#),
            &Map::new(),
        );
        assert_eq!(req.headers.get("X-Key").map(String::as_str), Some("v"));
    }

    #[test]
    fn malformed_declared_headers_degrade_to_none() {
        let req = build(&button(HttpMethod::Get, "not-a-mapping"), &Map::new());
        assert!(req.headers.is_empty());
    }
}
