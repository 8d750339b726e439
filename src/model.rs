//! The internal property tree: the editor's source of truth, independent of
//! JSON Schema syntax.
//!
//! A node's shape is carried by [`PropertyKind`], a tagged union, so object
//! children and array item descriptions exist exactly when the type says
//! they should. Trees are top-down owned (no parent links, no sharing);
//! lookups by id are plain recursive walks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rules::{
    ArrayRules, BooleanRules, NumberRules, ObjectRules, Rules, TextRules,
};
use crate::vocabulary::PropertyType;

/// Opaque node identifier, stable for the node's lifetime and never reused.
///
/// Ids address nodes during tree mutation only; they never appear in
/// generated JSON Schema output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(Uuid);

impl PropertyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// What an array's elements look like.
///
/// Item types are a reduced vocabulary: no array-of-array. Object items may
/// carry their own nested property list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ArrayItems {
    Text,
    Number,
    Boolean,
    Null,
    Object {
        #[serde(rename = "objectProperties", default)]
        object_properties: Vec<Property>,
    },
}

impl ArrayItems {
    /// The item type as a semantic [`PropertyType`].
    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Text => PropertyType::Text,
            Self::Number => PropertyType::Number,
            Self::Boolean => PropertyType::Boolean,
            Self::Null => PropertyType::Null,
            Self::Object { .. } => PropertyType::Object,
        }
    }
}

impl Default for ArrayItems {
    fn default() -> Self {
        Self::Text
    }
}

/// Type-dependent payload of a property node.
///
/// Exactly one of nested `properties` (object) or `items` (array) exists,
/// enforced structurally. Swapping the kind is how a type change discards
/// stale validation keywords and incompatible children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PropertyKind {
    Text {
        validation: TextRules,
    },
    Number {
        validation: NumberRules,
    },
    Boolean {
        validation: BooleanRules,
    },
    Object {
        validation: ObjectRules,
        properties: Vec<Property>,
    },
    Array {
        validation: ArrayRules,
        items: ArrayItems,
    },
    Null,
}

impl PropertyKind {
    /// Default-shaped kind for a type: default rules, no children, text
    /// items for arrays.
    pub fn with_defaults(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::Text => Self::Text {
                validation: TextRules::default(),
            },
            PropertyType::Number => Self::Number {
                validation: NumberRules::default(),
            },
            PropertyType::Boolean => Self::Boolean {
                validation: BooleanRules::default(),
            },
            PropertyType::Object => Self::Object {
                validation: ObjectRules::default(),
                properties: Vec::new(),
            },
            PropertyType::Array => Self::Array {
                validation: ArrayRules::default(),
                items: ArrayItems::default(),
            },
            PropertyType::Null => Self::Null,
        }
    }

    pub fn property_type(&self) -> PropertyType {
        match self {
            Self::Text { .. } => PropertyType::Text,
            Self::Number { .. } => PropertyType::Number,
            Self::Boolean { .. } => PropertyType::Boolean,
            Self::Object { .. } => PropertyType::Object,
            Self::Array { .. } => PropertyType::Array,
            Self::Null => PropertyType::Null,
        }
    }

    /// The current rule record, detached from any children.
    pub fn rules(&self) -> Rules {
        match self {
            Self::Text { validation } => Rules::Text(validation.clone()),
            Self::Number { validation } => Rules::Number(validation.clone()),
            Self::Boolean { validation } => Rules::Boolean(validation.clone()),
            Self::Object { validation, .. } => Rules::Object(validation.clone()),
            Self::Array { validation, .. } => Rules::Array(validation.clone()),
            Self::Null => Rules::Null,
        }
    }

    /// Replace this kind's rules in place, keeping children/items.
    ///
    /// Returns `false` when the rule variant does not match the kind.
    pub fn set_rules(&mut self, rules: Rules) -> bool {
        match (self, rules) {
            (Self::Text { validation }, Rules::Text(r)) => {
                *validation = r;
                true
            }
            (Self::Number { validation }, Rules::Number(r)) => {
                *validation = r;
                true
            }
            (Self::Boolean { validation }, Rules::Boolean(r)) => {
                *validation = r;
                true
            }
            (Self::Object { validation, .. }, Rules::Object(r)) => {
                *validation = r;
                true
            }
            (Self::Array { validation, .. }, Rules::Array(r)) => {
                *validation = r;
                true
            }
            (Self::Null, Rules::Null) => true,
            _ => false,
        }
    }
}

/// One node in the internal tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

impl Property {
    /// A node with a fresh id and all-default rules for the given type.
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            id: PropertyId::new(),
            name: name.into(),
            description: String::new(),
            required: false,
            kind: PropertyKind::with_defaults(property_type),
        }
    }

    pub fn property_type(&self) -> PropertyType {
        self.kind.property_type()
    }

    /// Immediate children this node owns, whether through an object's
    /// `properties` or an array-of-object's item properties.
    pub fn children(&self) -> Option<&Vec<Property>> {
        match &self.kind {
            PropertyKind::Object { properties, .. } => Some(properties),
            PropertyKind::Array {
                items: ArrayItems::Object { object_properties },
                ..
            } => Some(object_properties),
            _ => None,
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Property>> {
        match &mut self.kind {
            PropertyKind::Object { properties, .. } => Some(properties),
            PropertyKind::Array {
                items: ArrayItems::Object { object_properties },
                ..
            } => Some(object_properties),
            _ => None,
        }
    }
}

/// Top-level schema document: title, description, and the property tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Schema {
    /// Empty schema with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// The two starter properties the editor seeds at process start.
    pub fn with_examples() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            properties: vec![
                Property::new("Name", PropertyType::Text),
                Property::new("Phone", PropertyType::Number),
            ],
        }
    }

    /// Find a node anywhere in the tree.
    pub fn find(&self, id: PropertyId) -> Option<&Property> {
        find_in(&self.properties, id)
    }

    /// Find a node anywhere in the tree, mutably.
    pub fn find_mut(&mut self, id: PropertyId) -> Option<&mut Property> {
        find_in_mut(&mut self.properties, id)
    }

    /// Remove a node (and all its descendants) anywhere in the tree.
    ///
    /// Returns `false` when no node has the id.
    pub fn remove(&mut self, id: PropertyId) -> bool {
        remove_in(&mut self.properties, id)
    }

    /// Append a child under `parent`: an object's `properties` or an
    /// array-of-object's `objectProperties`. `None` targets the root list.
    ///
    /// Returns the child back when the parent is missing or cannot hold
    /// children.
    pub fn insert_under(
        &mut self,
        parent: Option<PropertyId>,
        child: Property,
    ) -> Result<(), Property> {
        match parent {
            None => {
                self.properties.push(child);
                Ok(())
            }
            Some(id) => match self.find_mut(id).and_then(Property::children_mut) {
                Some(siblings) => {
                    siblings.push(child);
                    Ok(())
                }
                None => Err(child),
            },
        }
    }

    /// The sibling list a node with `parent` would join.
    pub fn siblings(&self, parent: Option<PropertyId>) -> Option<&Vec<Property>> {
        match parent {
            None => Some(&self.properties),
            Some(id) => self.find(id).and_then(Property::children),
        }
    }
}

fn find_in(properties: &[Property], id: PropertyId) -> Option<&Property> {
    for prop in properties {
        if prop.id == id {
            return Some(prop);
        }
        if let Some(children) = prop.children() {
            if let Some(found) = find_in(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_in_mut(properties: &mut [Property], id: PropertyId) -> Option<&mut Property> {
    for prop in properties {
        if prop.id == id {
            return Some(prop);
        }
        if let Some(children) = prop.children_mut() {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_in(properties: &mut Vec<Property>, id: PropertyId) -> bool {
    let before = properties.len();
    properties.retain(|p| p.id != id);
    if properties.len() != before {
        return true;
    }
    for prop in properties {
        if let Some(children) = prop.children_mut() {
            if remove_in(children, id) {
                return true;
            }
        }
    }
    false
}
