//! Turning raw model text into JSON.

use serde_json::Value;

use crate::ports::AIError;

/// Removes a Markdown code fence wrapped around the reply, if any.
pub(super) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Parses a model reply as JSON.
pub(super) fn parse_reply(text: &str) -> Result<Value, AIError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AIError::parse(format!("model returned malformed JSON: {}", e)))
}

/// Trims surrounding whitespace from every string in the document.
pub(super) fn trim_strings(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(trim_strings),
        Value::Object(map) => map.values_mut().for_each(trim_strings),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strips_json_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn strips_bare_fence_and_whitespace() {
        assert_eq!(strip_code_fence("  ```\n[1]\n```  \n"), "[1]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence(" {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn parse_reply_reports_malformed_output() {
        let err = parse_reply("Sure! Here is your course").unwrap_err();
        assert!(matches!(err, AIError::Parse(ref msg) if msg.starts_with("model returned malformed JSON")));
    }

    #[test]
    fn trim_strings_walks_nested_values() {
        let mut doc = json!({"title": "  Hola ", "quiz": {"questions": [{"options": [" a", "b "]}]}, "n": 1});
        trim_strings(&mut doc);
        assert_eq!(doc, json!({"title": "Hola", "quiz": {"questions": [{"options": ["a", "b"]}]}, "n": 1}));
    }
}
