//! JSON text formatting for the editor panes.

use serde_json::Value;

/// Re-serialize JSON text with 2-space indentation.
///
/// Errors when the input is not valid JSON; callers keep the original text
/// in that case.
pub fn prettify(input: &str) -> Result<String, serde_json::Error> {
    let parsed: Value = serde_json::from_str(input)?;
    serde_json::to_string_pretty(&parsed)
}
