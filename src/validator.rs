//! Instance validation: compile the generated schema, collect every
//! violation in one pass, and map each error back to a 1-based line in the
//! original instance text.

use jsonschema::error::ValidationErrorKind;
use log::warn;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};

/// One structured violation, shaped for direct rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Instance pointer (`/users/0/email`) or `"(root)"`.
    pub path: String,
    pub message: String,
    pub keyword: String,
    pub params: Value,
    /// Best-effort 1-based line in the source text; `None` when no text was
    /// supplied or the error is not tied to the instance.
    pub line: Option<usize>,
}

/// Result of one validation run. Errors are never persisted across runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }
}

/// Validate a JSON instance against a schema document.
///
/// Compilation failure (e.g. an invalid regex in `pattern`) is fatal for the
/// call and reported as a single `keyword: "schema"` issue. Instance
/// violations are always fully enumerated, never cut short at the first.
pub fn validate(
    schema_doc: &Value,
    instance: &Value,
    instance_text: Option<&str>,
) -> ValidationOutcome {
    let validator = match jsonschema::validator_for(schema_doc) {
        Ok(v) => v,
        Err(e) => {
            warn!("Schema failed to compile: {e}");
            return ValidationOutcome {
                valid: false,
                errors: vec![ValidationIssue {
                    path: String::new(),
                    message: format!("Schema error: {e}"),
                    keyword: "schema".into(),
                    params: json!({}),
                    line: None,
                }],
            };
        }
    };

    let errors: Vec<ValidationIssue> = validator
        .iter_errors(instance)
        .map(|error| {
            let pointer = error.instance_path().to_string();
            let path = if pointer.is_empty() {
                "(root)".to_string()
            } else {
                pointer.clone()
            };
            let message = if pointer.is_empty() {
                format!("root {error}")
            } else {
                format!("{pointer} {error}")
            };
            let line = instance_text.map(|text| line_for_pointer(text, &pointer));

            ValidationIssue {
                path,
                message,
                keyword: keyword_for(&error.schema_path().to_string()),
                params: params_for(error.kind()),
                line,
            }
        })
        .collect();

    if errors.is_empty() {
        ValidationOutcome::ok()
    } else {
        ValidationOutcome {
            valid: false,
            errors,
        }
    }
}

/// Validate raw instance text: the upstream step the editor performs before
/// handing a parsed value to [`validate`].
///
/// Text that is not valid JSON yields a single `keyword: "json"` issue with
/// no line; otherwise the text is kept for line mapping.
pub fn check_instance_text(schema_doc: &Value, instance_text: &str) -> ValidationOutcome {
    match serde_json::from_str::<Value>(instance_text) {
        Ok(instance) => validate(schema_doc, &instance, Some(instance_text)),
        Err(e) => ValidationOutcome {
            valid: false,
            errors: vec![ValidationIssue {
                path: String::new(),
                message: format!("Invalid JSON: {e}"),
                keyword: "json".into(),
                params: json!({}),
                line: None,
            }],
        },
    }
}

/// The violated keyword, taken from the last non-index segment of the
/// error's schema path (`/properties/age/minimum` → `minimum`).
fn keyword_for(schema_path: &str) -> String {
    schema_path
        .split('/')
        .filter(|s| !s.is_empty())
        .rev()
        .find(|s| !s.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or("unknown")
        .to_string()
}

/// Per-keyword payload, mirroring what the engine knows about the failure.
fn params_for(kind: &ValidationErrorKind) -> Value {
    match kind {
        ValidationErrorKind::Minimum { limit } | ValidationErrorKind::Maximum { limit } => {
            json!({ "limit": limit })
        }
        ValidationErrorKind::MinLength { limit } | ValidationErrorKind::MaxLength { limit } => {
            json!({ "limit": limit })
        }
        ValidationErrorKind::MinItems { limit } | ValidationErrorKind::MaxItems { limit } => {
            json!({ "limit": limit })
        }
        ValidationErrorKind::MinProperties { limit }
        | ValidationErrorKind::MaxProperties { limit } => json!({ "limit": limit }),
        ValidationErrorKind::MultipleOf { multiple_of } => {
            json!({ "multipleOf": multiple_of })
        }
        ValidationErrorKind::Required { property } => {
            json!({ "missingProperty": property })
        }
        ValidationErrorKind::Pattern { pattern } => json!({ "pattern": pattern }),
        ValidationErrorKind::Enum { options } => json!({ "allowedValues": options }),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            json!({ "unexpected": unexpected })
        }
        _ => json!({}),
    }
}

/// Heuristic line lookup for an instance pointer.
///
/// Uses the last pointer segment as the key to search for, or the enclosing
/// key when the last segment is an array index. The first line matching
/// `"<key>"\s*:` wins, which can mis-locate when the same key occurs earlier
/// at a different nesting level; that imprecision is a documented limitation.
fn line_for_pointer(text: &str, pointer: &str) -> usize {
    let segments: Vec<String> = pointer
        .split('/')
        .filter(|s| !s.is_empty())
        .map(unescape_pointer_segment)
        .collect();

    let Some(last) = segments.last() else {
        return 1;
    };

    let key = if last.chars().all(|c| c.is_ascii_digit()) {
        match segments.len().checked_sub(2).and_then(|i| segments.get(i)) {
            Some(parent) => parent,
            None => return 1,
        }
    } else {
        last
    };

    let Ok(pattern) = Regex::new(&format!("\"{}\"\\s*:", regex::escape(key))) else {
        return 1;
    };

    for (index, line) in text.lines().enumerate() {
        if pattern.is_match(line) {
            return index + 1;
        }
    }
    1
}

/// JSON Pointer unescaping: `~1` → `/`, `~0` → `~`.
fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
