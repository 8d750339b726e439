//! Forward transform: internal property tree → draft-07 JSON Schema document.
//!
//! Pure and deterministic. Output key order follows tree insertion order
//! (`serde_json` is built with `preserve_order`), and `required: []` is
//! never emitted anywhere in the document.

use serde_json::{json, Map, Value};

use crate::model::{ArrayItems, Property, PropertyKind, Schema};
use crate::rules::{ArrayRules, BooleanRules, NumberRules, ObjectRules, TextRules};
use crate::vocabulary::DRAFT7_SCHEMA_URI;

/// Generate a JSON Schema document from the internal tree.
pub fn generate(schema: &Schema) -> Value {
    let mut root = Map::new();
    root.insert("$schema".into(), json!(DRAFT7_SCHEMA_URI));
    root.insert("type".into(), json!("object"));

    if !schema.title.is_empty() {
        root.insert("title".into(), json!(schema.title));
    }
    if !schema.description.is_empty() {
        root.insert("description".into(), json!(schema.description));
    }

    let (properties, required) = property_block(&schema.properties);
    root.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        root.insert("required".into(), json!(required));
    }

    Value::Object(root)
}

/// Generate and serialize with the editor pane's 2-space indentation.
pub fn generate_pretty(schema: &Schema) -> String {
    // Value -> pretty string cannot fail.
    serde_json::to_string_pretty(&generate(schema)).unwrap_or_default()
}

/// A `properties` map plus the sibling `required` list, in tree order.
fn property_block(properties: &[Property]) -> (Map<String, Value>, Vec<String>) {
    let mut map = Map::new();
    let mut required = Vec::new();
    for prop in properties {
        map.insert(prop.name.clone(), property_schema(prop));
        if prop.required {
            required.push(prop.name.clone());
        }
    }
    (map, required)
}

fn property_schema(prop: &Property) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), json!(prop.property_type().schema_type()));

    if !prop.description.is_empty() {
        schema.insert("description".into(), json!(prop.description));
    }

    match &prop.kind {
        PropertyKind::Text { validation } => attach_text(&mut schema, validation),
        PropertyKind::Number { validation } => attach_number(&mut schema, validation),
        PropertyKind::Boolean { validation } => attach_boolean(&mut schema, validation),
        PropertyKind::Array { validation, items } => {
            attach_array(&mut schema, validation, items)
        }
        PropertyKind::Object {
            validation,
            properties,
        } => attach_object(&mut schema, validation, properties),
        PropertyKind::Null => {}
    }

    Value::Object(schema)
}

fn attach_text(schema: &mut Map<String, Value>, rules: &TextRules) {
    if let Some(min) = rules.min_length {
        schema.insert("minLength".into(), json!(min));
    }
    if let Some(max) = rules.max_length {
        schema.insert("maxLength".into(), json!(max));
    }
    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        schema.insert("pattern".into(), json!(pattern));
    }
    if !rules.allowed_values.is_empty() {
        schema.insert("enum".into(), json!(rules.allowed_values));
    }
}

fn attach_number(schema: &mut Map<String, Value>, rules: &NumberRules) {
    if let Some(min) = rules.minimum {
        schema.insert("minimum".into(), json!(min));
    }
    if let Some(max) = rules.maximum {
        schema.insert("maximum".into(), json!(max));
    }
    if let Some(step) = rules.multiple_of {
        schema.insert("multipleOf".into(), json!(step));
    }
}

fn attach_boolean(schema: &mut Map<String, Value>, rules: &BooleanRules) {
    match (rules.allow_true, rules.allow_false) {
        // Both values allowed: plain boolean, no restriction.
        (true, true) => {}
        (true, false) => {
            schema.insert("enum".into(), json!([true]));
        }
        (false, true) => {
            schema.insert("enum".into(), json!([false]));
        }
        // Unsatisfiable rules are rejected at edit time; emit the
        // contradiction verbatim instead of picking a side.
        (false, false) => {
            schema.insert("enum".into(), json!([]));
        }
    }
}

fn attach_array(schema: &mut Map<String, Value>, rules: &ArrayRules, items: &ArrayItems) {
    if let Some(min) = rules.min_items {
        schema.insert("minItems".into(), json!(min));
    }
    if let Some(max) = rules.max_items {
        schema.insert("maxItems".into(), json!(max));
    }
    if rules.unique_items {
        schema.insert("uniqueItems".into(), json!(true));
    }
    schema.insert("items".into(), items_schema(items));
}

fn items_schema(items: &ArrayItems) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), json!(items.property_type().schema_type()));

    if let ArrayItems::Object { object_properties } = items {
        if !object_properties.is_empty() {
            let (properties, required) = property_block(object_properties);
            schema.insert("properties".into(), Value::Object(properties));
            if !required.is_empty() {
                schema.insert("required".into(), json!(required));
            }
        }
    }

    Value::Object(schema)
}

fn attach_object(
    schema: &mut Map<String, Value>,
    rules: &ObjectRules,
    properties: &[Property],
) {
    if let Some(min) = rules.min_properties {
        schema.insert("minProperties".into(), json!(min));
    }
    if let Some(max) = rules.max_properties {
        schema.insert("maxProperties".into(), json!(max));
    }
    // `true` is the JSON Schema default; only a closed object is worth a keyword.
    if !rules.additional_properties {
        schema.insert("additionalProperties".into(), json!(false));
    }
    if !properties.is_empty() {
        let (nested, required) = property_block(properties);
        schema.insert("properties".into(), Value::Object(nested));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
    }
}
