//! Inverse transform: JSON Schema document → internal property tree.
//!
//! Intentionally lossy: `integer` collapses to number, unknown keywords and
//! composition keywords are dropped, and missing optional fields become
//! explicit defaults. Only structurally impossible input errors; anything
//! merely odd defaults gracefully so hand-edited schema text keeps parsing.

use log::debug;
use serde_json::Value;

use crate::model::{ArrayItems, Property, PropertyId, PropertyKind, Schema};
use crate::rules::{ArrayRules, BooleanRules, NumberRules, ObjectRules, TextRules};
use crate::vocabulary::PropertyType;

/// Fatal parse failures. Everything else defaults rather than errors, so a
/// caller never applies a partial tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Schema document is not a JSON object")]
    NotAnObject,
    #[error("Schema `properties` is not a JSON object")]
    MalformedProperties,
}

/// Parse a JSON Schema document into the internal tree.
///
/// Fresh node ids are assigned throughout; parsing the generator's own
/// output reconstructs the same tree shape and values modulo ids.
pub fn parse(doc: &Value) -> Result<Schema, ParseError> {
    let root = doc.as_object().ok_or(ParseError::NotAnObject)?;

    let title = string_or_empty(root.get("title"));
    let description = string_or_empty(root.get("description"));
    let required = required_names(root.get("required"));

    let properties = match root.get("properties") {
        None => Vec::new(),
        Some(value) => {
            let entries = value.as_object().ok_or(ParseError::MalformedProperties)?;
            entries
                .iter()
                .map(|(name, sub)| parse_property(name, sub, &required))
                .collect()
        }
    };

    Ok(Schema {
        title,
        description,
        properties,
    })
}

fn parse_property(name: &str, sub_schema: &Value, required: &[String]) -> Property {
    // Boolean and other non-object subschemas carry nothing we can edit;
    // treat them as empty, which defaults the type to text below.
    let empty = serde_json::Map::new();
    let sub = sub_schema.as_object().unwrap_or(&empty);

    let property_type = match sub.get("type").and_then(Value::as_str) {
        Some(keyword) => PropertyType::from_schema_type(keyword).unwrap_or_else(|| {
            debug!("Unknown schema type {keyword:?} for {name:?}, defaulting to text");
            PropertyType::Text
        }),
        None => PropertyType::Text,
    };

    let kind = match property_type {
        PropertyType::Text => PropertyKind::Text {
            validation: text_rules(sub),
        },
        PropertyType::Number => PropertyKind::Number {
            validation: number_rules(sub),
        },
        PropertyType::Boolean => PropertyKind::Boolean {
            validation: boolean_rules(sub),
        },
        PropertyType::Object => PropertyKind::Object {
            validation: object_rules(sub),
            properties: nested_properties(sub),
        },
        PropertyType::Array => PropertyKind::Array {
            validation: array_rules(sub),
            items: parse_array_items(sub.get("items")),
        },
        PropertyType::Null => PropertyKind::Null,
    };

    Property {
        id: PropertyId::new(),
        name: name.to_string(),
        description: string_or_empty(sub.get("description")),
        required: required.iter().any(|r| r == name),
        kind,
    }
}

/// Nested `properties` of an object subschema, parsed against that
/// subschema's own `required` list.
fn nested_properties(sub: &serde_json::Map<String, Value>) -> Vec<Property> {
    let required = required_names(sub.get("required"));
    match sub.get("properties").and_then(Value::as_object) {
        Some(entries) => entries
            .iter()
            .map(|(name, nested)| parse_property(name, nested, &required))
            .collect(),
        None => Vec::new(),
    }
}

fn parse_array_items(items: Option<&Value>) -> ArrayItems {
    let Some(items) = items.and_then(Value::as_object) else {
        return ArrayItems::Text;
    };

    let item_type = items
        .get("type")
        .and_then(Value::as_str)
        .and_then(PropertyType::from_schema_type)
        .unwrap_or(PropertyType::Text);

    match item_type {
        PropertyType::Object => ArrayItems::Object {
            object_properties: nested_properties(items),
        },
        PropertyType::Number => ArrayItems::Number,
        PropertyType::Boolean => ArrayItems::Boolean,
        PropertyType::Null => ArrayItems::Null,
        // Array-of-array is outside the item vocabulary.
        PropertyType::Text | PropertyType::Array => ArrayItems::Text,
    }
}

fn text_rules(sub: &serde_json::Map<String, Value>) -> TextRules {
    TextRules {
        min_length: sub.get("minLength").and_then(Value::as_u64),
        max_length: sub.get("maxLength").and_then(Value::as_u64),
        pattern: sub
            .get("pattern")
            .and_then(Value::as_str)
            .map(str::to_string),
        allowed_values: sub
            .get("enum")
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn number_rules(sub: &serde_json::Map<String, Value>) -> NumberRules {
    NumberRules {
        minimum: sub.get("minimum").and_then(Value::as_f64),
        maximum: sub.get("maximum").and_then(Value::as_f64),
        multiple_of: sub.get("multipleOf").and_then(Value::as_f64),
    }
}

/// A single-entry `enum` restricts a boolean to one value; anything else
/// leaves both allowed.
fn boolean_rules(sub: &serde_json::Map<String, Value>) -> BooleanRules {
    match sub.get("enum").and_then(Value::as_array) {
        Some(values) if values.len() == 1 => BooleanRules {
            allow_true: values.contains(&Value::Bool(true)),
            allow_false: values.contains(&Value::Bool(false)),
        },
        _ => BooleanRules::default(),
    }
}

fn object_rules(sub: &serde_json::Map<String, Value>) -> ObjectRules {
    ObjectRules {
        min_properties: sub.get("minProperties").and_then(Value::as_u64),
        max_properties: sub.get("maxProperties").and_then(Value::as_u64),
        additional_properties: sub
            .get("additionalProperties")
            .and_then(Value::as_bool)
            .unwrap_or(true),
    }
}

fn array_rules(sub: &serde_json::Map<String, Value>) -> ArrayRules {
    ArrayRules {
        min_items: sub.get("minItems").and_then(Value::as_u64),
        max_items: sub.get("maxItems").and_then(Value::as_u64),
        unique_items: sub
            .get("uniqueItems")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    }
}

fn string_or_empty(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

/// `required` list with non-string entries ignored; absent or malformed
/// lists are empty.
fn required_names(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
