//! Forward-transform tests: internal trees to draft-07 documents.

use pretty_assertions::assert_eq;
use serde_json::json;

use schema_studio::model::{ArrayItems, Property, PropertyKind, Schema};
use schema_studio::rules::{
    ArrayRules, BooleanRules, NumberRules, ObjectRules, TextRules,
};
use schema_studio::vocabulary::PropertyType;
use schema_studio::{generate, generate_pretty};

fn schema_with(properties: Vec<Property>) -> Schema {
    Schema {
        title: String::new(),
        description: String::new(),
        properties,
    }
}

// ---------------------------------------------------------------------------
// Root document shape
// ---------------------------------------------------------------------------

#[test]
fn empty_tree_emits_bare_root() {
    let doc = generate(&Schema::new());
    assert_eq!(
        doc,
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {}
        }),
        "No properties means no required array and no title/description"
    );
}

#[test]
fn root_title_and_description_emitted_when_non_empty() {
    let mut schema = Schema::new();
    schema.title = "User".into();
    schema.description = "A user record".into();

    let doc = generate(&schema);
    assert_eq!(doc["title"], json!("User"));
    assert_eq!(doc["description"], json!("A user record"));
}

#[test]
fn number_property_with_range_and_required() {
    let mut prop = Property::new("age", PropertyType::Number);
    prop.required = true;
    prop.kind = PropertyKind::Number {
        validation: NumberRules {
            minimum: Some(0.0),
            maximum: Some(120.0),
            multiple_of: None,
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc,
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "age": { "type": "number", "minimum": 0.0, "maximum": 120.0 }
            },
            "required": ["age"]
        })
    );
}

#[test]
fn required_array_absent_when_no_property_is_required() {
    let doc = generate(&schema_with(vec![Property::new("name", PropertyType::Text)]));
    assert!(
        doc.get("required").is_none(),
        "required: [] must never be emitted"
    );
}

#[test]
fn properties_keep_tree_insertion_order() {
    let schema = schema_with(vec![
        Property::new("zeta", PropertyType::Text),
        Property::new("alpha", PropertyType::Number),
        Property::new("mid", PropertyType::Boolean),
    ]);

    let text = generate_pretty(&schema);
    let zeta = text.find("\"zeta\"").expect("zeta present");
    let alpha = text.find("\"alpha\"").expect("alpha present");
    let mid = text.find("\"mid\"").expect("mid present");
    assert!(
        zeta < alpha && alpha < mid,
        "Serialized key order must match tree order, not be sorted"
    );
}

// ---------------------------------------------------------------------------
// Per-type keyword attachment
// ---------------------------------------------------------------------------

#[test]
fn text_rules_attach_only_when_set() {
    let mut prop = Property::new("code", PropertyType::Text);
    prop.kind = PropertyKind::Text {
        validation: TextRules {
            min_length: Some(2),
            max_length: Some(8),
            pattern: Some("^[A-Z]+$".into()),
            allowed_values: vec![],
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    let code = &doc["properties"]["code"];
    assert_eq!(
        code,
        &json!({
            "type": "string",
            "minLength": 2,
            "maxLength": 8,
            "pattern": "^[A-Z]+$"
        }),
        "Empty enum list must not emit an enum keyword"
    );
}

#[test]
fn text_enum_emitted_when_non_empty() {
    let mut prop = Property::new("status", PropertyType::Text);
    prop.kind = PropertyKind::Text {
        validation: TextRules {
            allowed_values: vec!["draft".into(), "live".into()],
            ..TextRules::default()
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(doc["properties"]["status"]["enum"], json!(["draft", "live"]));
}

#[test]
fn bare_property_emits_only_type_and_description() {
    let mut prop = Property::new("note", PropertyType::Text);
    prop.description = "free text".into();

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["note"],
        json!({ "type": "string", "description": "free text" })
    );
}

#[test]
fn boolean_restricted_to_false() {
    let mut prop = Property::new("archived", PropertyType::Boolean);
    prop.kind = PropertyKind::Boolean {
        validation: BooleanRules {
            allow_true: false,
            allow_false: true,
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["archived"],
        json!({ "type": "boolean", "enum": [false] })
    );
}

#[test]
fn boolean_restricted_to_true() {
    let mut prop = Property::new("accepted", PropertyType::Boolean);
    prop.kind = PropertyKind::Boolean {
        validation: BooleanRules {
            allow_true: true,
            allow_false: false,
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["accepted"],
        json!({ "type": "boolean", "enum": [true] })
    );
}

#[test]
fn boolean_unrestricted_emits_no_enum() {
    let doc = generate(&schema_with(vec![Property::new("flag", PropertyType::Boolean)]));
    assert_eq!(doc["properties"]["flag"], json!({ "type": "boolean" }));
}

#[test]
fn boolean_unsatisfiable_emits_empty_enum() {
    let mut prop = Property::new("broken", PropertyType::Boolean);
    prop.kind = PropertyKind::Boolean {
        validation: BooleanRules {
            allow_true: false,
            allow_false: false,
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["broken"]["enum"],
        json!([]),
        "The contradiction is emitted verbatim, not silently resolved"
    );
}

// ---------------------------------------------------------------------------
// Arrays and nesting
// ---------------------------------------------------------------------------

#[test]
fn array_always_emits_items() {
    let doc = generate(&schema_with(vec![Property::new("tags", PropertyType::Array)]));
    assert_eq!(
        doc["properties"]["tags"],
        json!({ "type": "array", "items": { "type": "string" } })
    );
}

#[test]
fn array_size_rules_and_uniqueness() {
    let mut prop = Property::new("tags", PropertyType::Array);
    prop.kind = PropertyKind::Array {
        validation: ArrayRules {
            min_items: Some(1),
            max_items: Some(5),
            unique_items: true,
        },
        items: ArrayItems::Number,
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["tags"],
        json!({
            "type": "array",
            "minItems": 1,
            "maxItems": 5,
            "uniqueItems": true,
            "items": { "type": "number" }
        })
    );
}

#[test]
fn array_of_objects_with_no_declared_properties() {
    let mut prop = Property::new("entries", PropertyType::Array);
    prop.kind = PropertyKind::Array {
        validation: ArrayRules::default(),
        items: ArrayItems::Object {
            object_properties: vec![],
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["entries"]["items"],
        json!({ "type": "object" }),
        "Empty object items must not emit a properties key"
    );
}

#[test]
fn array_of_objects_emits_nested_required() {
    let mut sku = Property::new("sku", PropertyType::Text);
    sku.required = true;
    let mut prop = Property::new("items", PropertyType::Array);
    prop.kind = PropertyKind::Array {
        validation: ArrayRules::default(),
        items: ArrayItems::Object {
            object_properties: vec![sku],
        },
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["items"]["items"],
        json!({
            "type": "object",
            "properties": { "sku": { "type": "string" } },
            "required": ["sku"]
        })
    );
}

#[test]
fn nested_objects_recurse_with_own_required_block() {
    let mut street = Property::new("street", PropertyType::Text);
    street.required = true;
    let city = Property::new("city", PropertyType::Text);

    let mut address = Property::new("address", PropertyType::Object);
    address.kind = PropertyKind::Object {
        validation: ObjectRules::default(),
        properties: vec![street, city],
    };

    let doc = generate(&schema_with(vec![address]));
    assert_eq!(
        doc["properties"]["address"],
        json!({
            "type": "object",
            "properties": {
                "street": { "type": "string" },
                "city": { "type": "string" }
            },
            "required": ["street"]
        })
    );
}

#[test]
fn object_rules_attach_and_closed_objects_emit_additional_properties() {
    let mut prop = Property::new("meta", PropertyType::Object);
    prop.kind = PropertyKind::Object {
        validation: ObjectRules {
            min_properties: Some(1),
            max_properties: Some(4),
            additional_properties: false,
        },
        properties: vec![],
    };

    let doc = generate(&schema_with(vec![prop]));
    assert_eq!(
        doc["properties"]["meta"],
        json!({
            "type": "object",
            "minProperties": 1,
            "maxProperties": 4,
            "additionalProperties": false
        })
    );
}

#[test]
fn open_objects_omit_additional_properties() {
    let doc = generate(&schema_with(vec![Property::new("meta", PropertyType::Object)]));
    assert!(
        doc["properties"]["meta"].get("additionalProperties").is_none(),
        "true is the JSON Schema default and must not be emitted"
    );
}

#[test]
fn root_never_emits_additional_properties() {
    let doc = generate(&Schema::with_examples());
    assert!(doc.get("additionalProperties").is_none());
}

#[test]
fn null_property_emits_only_type() {
    let doc = generate(&schema_with(vec![Property::new("nothing", PropertyType::Null)]));
    assert_eq!(doc["properties"]["nothing"], json!({ "type": "null" }));
}
