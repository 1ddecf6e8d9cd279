//! Extraction of JSON payloads from free-form provider replies.
//!
//! Providers are asked for bare JSON but often wrap it in prose or markdown
//! fences. The outermost bracket pair is cut out and parsed; records that do
//! not have the expected shape are dropped individually.

use reelfx_timeline::OverlayProps;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{AiError, AiResult};

/// One placement as returned by a provider, not yet validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestionRecord {
    #[serde(rename = "segmentId", default)]
    pub segment_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "props_or_empty")]
    pub props: OverlayProps,
}

/// A single overlay object, not yet validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawOverlay {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "props_or_empty")]
    pub props: OverlayProps,
}

fn props_or_empty<'de, D>(deserializer: D) -> Result<OverlayProps, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => OverlayProps::new(),
    })
}

/// Slice from the first `open` to the last `close`, inclusive.
fn outermost(content: &str, open: char, close: char) -> Option<&str> {
    let start = content.find(open)?;
    let end = content.rfind(close)?;
    (end > start).then(|| &content[start..=end])
}

pub fn extract_json_array(content: &str) -> Option<&str> {
    outermost(content, '[', ']')
}

pub fn extract_json_object(content: &str) -> Option<&str> {
    outermost(content, '{', '}')
}

/// Parse a batch reply into records. Individual malformed entries are skipped.
pub fn parse_batch(content: &str) -> AiResult<Vec<SuggestionRecord>> {
    let json = extract_json_array(content).unwrap_or(content);
    let items = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items,
        other => {
            return Err(AiError::Malformed(format!(
                "expected a JSON array, got {}",
                type_name(&other)
            )))
        }
    };

    let total = items.len();
    let records: Vec<SuggestionRecord> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if records.len() < total {
        debug!(total, kept = records.len(), "dropped malformed suggestion entries");
    }
    Ok(records)
}

/// Parse a single-overlay reply.
pub fn parse_single(content: &str) -> AiResult<RawOverlay> {
    let json = extract_json_object(content).unwrap_or(content);
    match serde_json::from_str::<Value>(json)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value)?),
        other => Err(AiError::Malformed(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_array_from_markdown() {
        let reply = "Sure! Here you go:\n```json\n[{\"segmentId\":\"s1\"}]\n```\nEnjoy.";
        assert_eq!(extract_json_array(reply), Some("[{\"segmentId\":\"s1\"}]"));
        assert_eq!(extract_json_array("no json here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_parse_batch_skips_bad_entries() {
        let reply = r#"[
            {"segmentId": "s1", "type": "visual-illustration", "props": {"scene": "globe"}},
            42,
            {"segmentId": "s2", "type": "emoji-reaction", "props": "oops"}
        ]"#;
        let records = parse_batch(reply).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].segment_id, "s1");
        assert_eq!(records[0].props.get("scene").and_then(Value::as_str), Some("globe"));
        assert!(records[1].props.is_empty());
    }

    #[test]
    fn test_parse_batch_rejects_non_json() {
        assert!(matches!(parse_batch("I cannot help with that"), Err(AiError::Json(_))));
        assert!(matches!(parse_batch("[1, 2"), Err(AiError::Json(_))));
        assert_eq!(parse_batch("[]").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_single() {
        let reply = "Result: {\"type\": \"emoji-reaction\", \"props\": {\"emoji\": \"🔥\"}}";
        let raw = parse_single(reply).unwrap();
        assert_eq!(raw.kind, "emoji-reaction");
        assert!(parse_single("\"just a string\"").is_err());
    }
}
