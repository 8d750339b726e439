use serde::{Deserialize, Serialize};

/// `$schema` URI stamped onto every generated document.
pub const DRAFT7_SCHEMA_URI: &str = "http://json-schema.org/draft-07/schema#";

/// The editor's semantic property types.
///
/// This is a closed vocabulary: one level of JSON Schema `type` keywords,
/// no unions, no draft negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Text,
    Number,
    Boolean,
    Object,
    Array,
    Null,
}

impl PropertyType {
    /// The JSON Schema `type` keyword for this semantic type.
    pub fn schema_type(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Reverse map from a JSON Schema `type` keyword.
    ///
    /// `integer` collapses to [`PropertyType::Number`], so round trips of
    /// integer-typed schemas are lossy by design. Unknown keywords return
    /// `None`; callers decide the fallback (the parser defaults to text).
    pub fn from_schema_type(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::Text),
            "number" | "integer" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}
