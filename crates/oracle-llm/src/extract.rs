//! Tolerant JSON extraction from free-form model output

use serde_json::Value;

use crate::error::OracleError;

/// Parse a model's raw text as JSON, tolerating surrounding prose
///
/// A strict parse of the whole text is tried first. Failing that, the span
/// from the first `{` to the last `}` is parsed.
pub fn extract_json(text: &str) -> Result<Value, OracleError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let span = braced_span(text).ok_or(OracleError::Extraction)?;

    serde_json::from_str(span).map_err(|e| {
        tracing::debug!(error = %e, "brace-delimited span is not valid JSON");
        OracleError::Extraction
    })
}

/// Greedy `{ ... }` span of `text`
fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
