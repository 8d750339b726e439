//! Validation-rule model: the per-type keyword records attached to every
//! property, their defaults, and the descriptor table a rule-editing surface
//! uses to know which inputs to offer.

use serde::{Deserialize, Serialize};

use crate::vocabulary::PropertyType;

/// Rules for text properties (`minLength` / `maxLength` / `pattern` / `enum`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    #[serde(rename = "enum", default)]
    pub allowed_values: Vec<String>,
}

/// Rules for number properties (`minimum` / `maximum` / `multipleOf`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberRules {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiple_of: Option<f64>,
}

/// Rules for boolean properties: which of the two values the instance may take.
///
/// Restricting to exactly one value generates `enum: [true]` or
/// `enum: [false]`. Restricting to neither is unsatisfiable; the store
/// rejects it, and the generator emits `enum: []` if handed one anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanRules {
    pub allow_true: bool,
    pub allow_false: bool,
}

impl Default for BooleanRules {
    fn default() -> Self {
        Self {
            allow_true: true,
            allow_false: true,
        }
    }
}

impl BooleanRules {
    /// False iff the rules admit no value at all.
    pub fn is_satisfiable(&self) -> bool {
        self.allow_true || self.allow_false
    }
}

/// Rules for array properties (`minItems` / `maxItems` / `uniqueItems`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayRules {
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    #[serde(default)]
    pub unique_items: bool,
}

/// Rules for object properties (`minProperties` / `maxProperties` /
/// `additionalProperties`).
///
/// `additional_properties` defaults to `true`, the JSON Schema default, and
/// is only emitted into generated output when `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRules {
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
    pub additional_properties: bool,
}

impl Default for ObjectRules {
    fn default() -> Self {
        Self {
            min_properties: None,
            max_properties: None,
            additional_properties: true,
        }
    }
}

/// A complete rule record for any property type.
///
/// Used by the store's `set_rules` operation so a rule editor can hand back
/// one value regardless of the node's type; the variant must match the
/// node's type or the store rejects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Rules {
    Text(TextRules),
    Number(NumberRules),
    Boolean(BooleanRules),
    Object(ObjectRules),
    Array(ArrayRules),
    Null,
}

impl Rules {
    /// The all-default rule record for a freshly created or type-switched
    /// property.
    pub fn default_for(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Text => Self::Text(TextRules::default()),
            PropertyType::Number => Self::Number(NumberRules::default()),
            PropertyType::Boolean => Self::Boolean(BooleanRules::default()),
            PropertyType::Object => Self::Object(ObjectRules::default()),
            PropertyType::Array => Self::Array(ArrayRules::default()),
            PropertyType::Null => Self::Null,
        }
    }

    /// The property type this rule record belongs to.
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Text(_) => PropertyType::Text,
            Self::Number(_) => PropertyType::Number,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::Object(_) => PropertyType::Object,
            Self::Array(_) => PropertyType::Array,
            Self::Null => PropertyType::Null,
        }
    }
}

/// Value shape of a single rule field, for rule-editing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Integer,
    Float,
    StringOrNull,
    StringList,
    Bool,
}

/// One editable rule field: serialized name plus value shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub field: &'static str,
    pub kind: ValueKind,
}

const TEXT_DESCRIPTORS: &[RuleDescriptor] = &[
    RuleDescriptor { field: "minLength", kind: ValueKind::Integer },
    RuleDescriptor { field: "maxLength", kind: ValueKind::Integer },
    RuleDescriptor { field: "pattern", kind: ValueKind::StringOrNull },
    RuleDescriptor { field: "enum", kind: ValueKind::StringList },
];

const NUMBER_DESCRIPTORS: &[RuleDescriptor] = &[
    RuleDescriptor { field: "minimum", kind: ValueKind::Float },
    RuleDescriptor { field: "maximum", kind: ValueKind::Float },
    RuleDescriptor { field: "multipleOf", kind: ValueKind::Float },
];

const BOOLEAN_DESCRIPTORS: &[RuleDescriptor] = &[
    RuleDescriptor { field: "allowTrue", kind: ValueKind::Bool },
    RuleDescriptor { field: "allowFalse", kind: ValueKind::Bool },
];

const OBJECT_DESCRIPTORS: &[RuleDescriptor] = &[
    RuleDescriptor { field: "minProperties", kind: ValueKind::Integer },
    RuleDescriptor { field: "maxProperties", kind: ValueKind::Integer },
    RuleDescriptor { field: "additionalProperties", kind: ValueKind::Bool },
];

const ARRAY_DESCRIPTORS: &[RuleDescriptor] = &[
    RuleDescriptor { field: "minItems", kind: ValueKind::Integer },
    RuleDescriptor { field: "maxItems", kind: ValueKind::Integer },
    RuleDescriptor { field: "uniqueItems", kind: ValueKind::Bool },
];

/// The editable rule fields for a property type, in display order.
pub fn descriptors(property_type: PropertyType) -> &'static [RuleDescriptor] {
    match property_type {
        PropertyType::Text => TEXT_DESCRIPTORS,
        PropertyType::Number => NUMBER_DESCRIPTORS,
        PropertyType::Boolean => BOOLEAN_DESCRIPTORS,
        PropertyType::Object => OBJECT_DESCRIPTORS,
        PropertyType::Array => ARRAY_DESCRIPTORS,
        PropertyType::Null => &[],
    }
}
