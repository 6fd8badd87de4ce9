// crates/hardness-engines/src/extract.rs
//! Heuristic text extraction from heterogeneous reasoning-endpoint JSON.

use serde_json::Value;

/// Keys probed in priority order when the response is an object.
const PRIORITY_KEYS: [&str; 7] = [
    "result", "output", "content", "text", "answer", "response", "data",
];

/// Extract human-readable text from an arbitrary JSON response body.
///
/// Probes the priority keys first (recursing into nested values), then
/// falls back to the first string value longer than 10 characters, then to
/// a `key: value` dump of all non-empty fields.
pub fn json_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter(|v| !is_empty_value(v))
            .map(json_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => {
            for key in PRIORITY_KEYS {
                if let Some(nested) = map.get(key) {
                    if !is_empty_value(nested) {
                        return json_to_text(nested);
                    }
                }
            }
            for nested in map.values() {
                if let Value::String(s) = nested {
                    if s.len() > 10 {
                        return s.clone();
                    }
                }
            }
            map.iter()
                .filter(|(_, v)| !is_empty_value(v))
                .map(|(k, v)| format!("{}: {}", k, json_to_text(v)))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_string_passes_through() {
        assert_eq!(json_to_text(&json!("analysis text")), "analysis text");
    }

    #[test]
    fn test_priority_key_order() {
        let body = json!({"response": "lower priority", "result": "highest priority"});
        assert_eq!(json_to_text(&body), "highest priority");
    }

    #[test]
    fn test_recurses_into_nested_objects() {
        let body = json!({"data": {"output": {"text": "deeply nested"}}});
        assert_eq!(json_to_text(&body), "deeply nested");
    }

    #[test]
    fn test_recurses_into_arrays() {
        let body = json!({"result": ["first line", "second line"]});
        assert_eq!(json_to_text(&body), "first line\nsecond line");
    }

    #[test]
    fn test_empty_priority_value_is_skipped() {
        let body = json!({"result": "", "output": "fallback text"});
        assert_eq!(json_to_text(&body), "fallback text");
    }

    #[test]
    fn test_long_string_heuristic() {
        let body = json!({"unexpected_key": "a string longer than ten chars"});
        assert_eq!(json_to_text(&body), "a string longer than ten chars");
    }

    #[test]
    fn test_key_value_dump_fallback() {
        let body = json!({"code": 7, "state": "ok"});
        let text = json_to_text(&body);
        assert!(text.contains("code: 7"), "{}", text);
        assert!(text.contains("state: ok"), "{}", text);
    }

    #[test]
    fn test_null_is_empty() {
        assert_eq!(json_to_text(&Value::Null), "");
    }

    #[test]
    fn test_extracted_vocabulary_renders_with_bold_term() {
        let body = json!({"result": "**Term**: definition"});
        let text = json_to_text(&body);
        let html = hardness_core::renderer::render(&text, &[]);
        assert!(html.contains("<strong>Term:</strong> definition"), "{}", html);
    }
}
