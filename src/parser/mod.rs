//! Response parser
//!
//! Model replies are free text that usually embeds a JSON object, sometimes
//! wrapped in prose or markdown fences. The outermost `{ ... }` span is
//! decoded as-is, without schema checks.

use crate::error::CaptionError;
use crate::fallback::fallback_analysis;
use crate::types::Analysis;

/// Decode the outermost JSON object in `raw`.
///
/// `source` names the backend in error messages.
pub fn try_parse_analysis(raw: &str, source: &str) -> Result<Analysis, CaptionError> {
    let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) else {
        return Err(CaptionError::Parse(format!("No JSON found in {source} response")));
    };
    if end < start {
        return Err(CaptionError::Parse(format!(
            "JSON parse error from {source}: closing brace before opening brace"
        )));
    }

    let value: serde_json::Value = serde_json::from_str(&raw[start..=end])
        .map_err(|e| CaptionError::Parse(format!("JSON parse error from {source}: {e}")))?;
    match value {
        serde_json::Value::Object(map) => Ok(Analysis::from_map(map)),
        other => Err(CaptionError::Parse(format!(
            "JSON parse error from {source}: expected an object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Like [`try_parse_analysis`], but never fails: undecodable replies become
/// a fallback analysis whose `error` explains what went wrong.
pub fn parse_analysis(raw: &str, source: &str) -> Analysis {
    try_parse_analysis(raw, source).unwrap_or_else(|err| {
        tracing::warn!(source, error = %err, "analysis reply could not be decoded");
        fallback_analysis(reason(err))
    })
}

/// Message of an error without its variant prefix
pub(crate) fn reason(err: CaptionError) -> String {
    match err {
        CaptionError::Parse(message) | CaptionError::Timeout(message) => message,
        other => other.to_string(),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
