use serde_json::Value;

use crate::models::OutputFormat;

/// Convert a raw response body into the button's declared output
/// representation. Best-effort: a body that fails to parse as JSON comes
/// back as the raw string, never as an error.
pub fn normalize(format: OutputFormat, raw: &str) -> Value {
    match format {
        OutputFormat::Json if !raw.is_empty() => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
        }
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_parses_to_structured_value() {
        assert_eq!(
            normalize(OutputFormat::Json, r#"{"ok":true}"#),
            json!({"ok": true})
        );
    }

    #[test]
    fn invalid_json_falls_back_to_raw_string() {
        assert_eq!(
            normalize(OutputFormat::Json, "<html>oops</html>"),
            json!("<html>oops</html>")
        );
    }

    #[test]
    fn empty_body_stays_a_string() {
        assert_eq!(normalize(OutputFormat::Json, ""), json!(""));
    }

    #[test]
    fn plain_text_and_markup_pass_through() {
        assert_eq!(
            normalize(OutputFormat::PlainText, r#"{"ok":true}"#),
            json!(r#"{"ok":true}"#)
        );
        assert_eq!(
            normalize(OutputFormat::Xml, "<status>up</status>"),
            json!("<status>up</status>")
        );
    }
}
