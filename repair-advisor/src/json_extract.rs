//! Tolerant recovery of a JSON object from LLM text.
//!
//! Models asked to "return only JSON" still wrap it in code fences or add
//! prose around it. Recovery is two-stage: parse the fence-stripped text as a
//! whole, and failing that parse the span between the first `{` and the last
//! `}`. No attempt is made to repair broken JSON inside that span.

use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{AdviceError, AdviceResult};

const FENCE: &str = "```";

/// Removes every markdown code-fence marker from `text`.
///
/// Opening fences lose their language tag too (```` ```json ````, ```` ```JSON ````).
/// Closing fences are removed on their own so prose glued to them survives.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut opening = true;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        if opening {
            let tag_len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
                .unwrap_or(rest.len());
            rest = &rest[tag_len..];
        }
        opening = !opening;
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Recovers a single JSON object from `raw`.
///
/// The result is loosely typed and NOT yet validated against any shape.
///
/// # Errors
/// - [`AdviceError::MalformedResponse`] (carrying `raw`) when no `{ … }` span
///   exists, when `}` does not come after `{`, or when the span is not valid JSON
/// - [`AdviceError::UnexpectedShape`] (carrying `raw`) when the whole reply is
///   valid JSON but not an object (an array, a string, a number)
pub fn extract_json_object(raw: &str) -> AdviceResult<Map<String, Value>> {
    let cleaned = strip_code_fences(raw);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => return Ok(map),
        Ok(other) => {
            return Err(AdviceError::UnexpectedShape {
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
                raw: raw.to_string(),
            });
        }
        Err(_) => {}
    }

    let (start, end) = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => {
            return Err(AdviceError::MalformedResponse {
                reason: "response did not contain a JSON object".into(),
                raw: raw.to_string(),
            });
        }
    };

    debug!(
        start,
        end,
        cleaned_len = cleaned.len(),
        "direct parse failed, retrying on brace-delimited slice"
    );

    match serde_json::from_str::<Value>(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AdviceError::MalformedResponse {
            reason: "brace-delimited slice is not a JSON object".into(),
            raw: raw.to_string(),
        }),
        Err(e) => Err(AdviceError::MalformedResponse {
            reason: e.to_string(),
            raw: raw.to_string(),
        }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
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

    fn malformed_raw(err: AdviceError) -> String {
        match err {
            AdviceError::MalformedResponse { raw, .. } => raw,
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn strips_fences_with_language_tags() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```JSON\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn closing_fence_keeps_trailing_prose() {
        assert_eq!(strip_code_fences("```json\n{}\n```Done"), "{}\nDone");
    }

    #[test]
    fn parses_plain_json() {
        let m = extract_json_object(r#"{"a": 1, "b": [true]}"#).unwrap();
        assert_eq!(m.get("a"), Some(&json!(1)));
    }

    #[test]
    fn recovers_object_surrounded_by_commentary() {
        let raw = "Sure! Here is the advice:\n{\"repairable\": true, \"notes\": [\"x\"]}\nLet me know if you need more.";
        let m = extract_json_object(raw).unwrap();
        assert_eq!(m.get("repairable"), Some(&json!(true)));
        assert_eq!(m.get("notes"), Some(&json!(["x"])));
    }

    #[test]
    fn recovers_fenced_object_with_prose() {
        let raw = "Here you go:\n```json\n{\"k\": \"v\"}\n```\nThanks";
        let m = extract_json_object(raw).unwrap();
        assert_eq!(m.get("k"), Some(&json!("v")));
    }

    #[test]
    fn fails_without_braces() {
        let raw = "I cannot help with that.";
        assert_eq!(malformed_raw(extract_json_object(raw).unwrap_err()), raw);
    }

    #[test]
    fn fails_with_only_one_brace_kind() {
        assert!(matches!(
            extract_json_object("value: {"),
            Err(AdviceError::MalformedResponse { .. })
        ));
        assert!(matches!(
            extract_json_object("value: }"),
            Err(AdviceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn fails_when_closing_brace_precedes_opening() {
        let raw = "} nothing here {";
        assert_eq!(malformed_raw(extract_json_object(raw).unwrap_err()), raw);
    }

    #[test]
    fn fails_when_slice_is_not_json() {
        let raw = "prefix {not: json} suffix";
        let err = extract_json_object(raw).unwrap_err();
        assert!(matches!(err, AdviceError::MalformedResponse { .. }));
        assert_eq!(err.raw_text(), Some(raw));
    }

    #[test]
    fn valid_non_object_json_is_a_shape_error() {
        for raw in [r#"[{"a": 2}]"#, "```json\n\"advice\"\n```", "42"] {
            match extract_json_object(raw) {
                Err(AdviceError::UnexpectedShape { raw: attached, .. }) => assert_eq!(attached, raw),
                other => panic!("expected UnexpectedShape for {raw}, got {other:?}"),
            }
        }
    }
}
