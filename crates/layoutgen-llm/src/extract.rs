//! JSON extraction from free-form model output.
//!
//! Models often wrap JSON in a fenced code block. The first fenced block
//! wins; without a fence the whole response is parsed.

use std::sync::LazyLock;

use layoutgen_core::{Layout, LayoutError};
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(?i:json)?[ \t]*\r?\n?([\s\S]*?)\s*```").expect("fenced block pattern is valid")
});

/// Returns the contents of the first fenced block, or the whole text.
fn json_candidate(text: &str) -> &str {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Parses the JSON carried by a model response.
pub fn extract_json(text: &str) -> Result<Value, LayoutError> {
    Ok(serde_json::from_str(json_candidate(text).trim())?)
}

/// Parses the JSON carried by a model response and requires an object.
pub fn extract_object(text: &str) -> Result<Layout, LayoutError> {
    match extract_json(text)? {
        Value::Object(map) => Ok(map),
        other => Err(LayoutError::Parse(format!(
            "expected a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let fenced = "Here you go:\n```json\n{\"a\":1}\n```\nAnything else?";
        let bare = "{\"a\":1}";
        assert_eq!(extract_json(fenced).unwrap(), extract_json(bare).unwrap());
        assert_eq!(extract_json(bare).unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn test_first_fence_wins() {
        let text = "```json\n{\"first\":true}\n```\n\n```json\n{\"second\":true}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({ "first": true }));
    }

    #[test]
    fn test_untagged_fence() {
        let text = "```\n{\"b\": [1, 2]}\n```";
        assert_eq!(extract_json(text).unwrap(), json!({ "b": [1, 2] }));
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(extract_json("```json {\"c\":3} ```").unwrap(), json!({ "c": 3 }));
    }

    #[test]
    fn test_bare_response_with_whitespace() {
        assert_eq!(extract_json("\n  {\"a\": 1}  \n").unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn test_prose_is_a_parse_error() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_invalid_json_inside_fence() {
        let err = extract_json("```json\n{not json}\n```").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_extract_object_rejects_arrays() {
        let err = extract_object("[1, 2, 3]").unwrap_err();
        assert_eq!(err, LayoutError::Parse("expected a JSON object, got an array".into()));

        let map = extract_object("```json\n{\"layout\": \"form\"}\n```").unwrap();
        assert_eq!(map.get("layout"), Some(&json!("form")));
    }
}
