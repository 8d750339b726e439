//! Owned state container for the property tree.
//!
//! One logical writer at a time: every mutation runs to completion on the
//! owned tree, then subscribers observe the fully-updated schema. Nothing
//! here is global; the composition root owns the store and injects it where
//! read/write access is needed.

use crate::model::{ArrayItems, Property, PropertyId, PropertyKind, Schema};
use crate::rules::Rules;
use crate::vocabulary::PropertyType;

/// Mutation failures. The tree is untouched whenever one is returned.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("No property with id {0}")]
    UnknownProperty(PropertyId),
    #[error("Property {0} cannot hold child properties")]
    InvalidParent(PropertyId),
    #[error("A sibling property is already named {0:?}")]
    DuplicateName(String),
    #[error("Property name must not be empty")]
    EmptyName,
    #[error("Rules are for {supplied} but the property is {actual}")]
    TypeMismatch {
        supplied: PropertyType,
        actual: PropertyType,
    },
    #[error("Boolean rules must allow at least one value")]
    UnsatisfiableBoolean,
    #[error("Reorder index out of bounds")]
    IndexOutOfBounds,
}

/// Input for [`SchemaStore::add_property`].
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub name: String,
    pub property_type: PropertyType,
    pub description: String,
    pub required: bool,
    /// Item shape for array properties; ignored otherwise. `None` means
    /// text items.
    pub items: Option<ArrayItems>,
}

impl NewProperty {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
            description: String::new(),
            required: false,
            items: None,
        }
    }
}

/// Shallow-merge update for the type-independent fields of a node.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub required: Option<bool>,
}

/// Subscription handle returned by [`SchemaStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(&Schema)>;

/// The single owning context through which all tree mutations flow.
pub struct SchemaStore {
    schema: Schema,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl SchemaStore {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Store seeded with the editor's starter properties.
    pub fn with_examples() -> Self {
        Self::new(Schema::with_examples())
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Replace the whole tree, e.g. after a successful parse of hand-edited
    /// schema text.
    pub fn replace(&mut self, schema: Schema) {
        self.schema = schema;
        self.notify();
    }

    /// Back to the seeded starter schema.
    pub fn reset(&mut self) {
        self.replace(Schema::with_examples());
    }

    /// Register a callback invoked after every completed mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&Schema) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Add a property at the root (`parent: None`) or under a parent that
    /// can hold children: an object, or an array of objects.
    pub fn add_property(
        &mut self,
        parent: Option<PropertyId>,
        new: NewProperty,
    ) -> Result<PropertyId, StoreError> {
        if new.name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if let Some(parent_id) = parent {
            let parent_prop = self
                .schema
                .find(parent_id)
                .ok_or(StoreError::UnknownProperty(parent_id))?;
            if parent_prop.children().is_none() {
                return Err(StoreError::InvalidParent(parent_id));
            }
        }
        self.check_sibling_name(parent, &new.name, None)?;

        let mut property = Property::new(new.name, new.property_type);
        property.description = new.description;
        property.required = new.required;
        if let PropertyKind::Array { items, .. } = &mut property.kind {
            if let Some(shape) = new.items {
                *items = shape;
            }
        }

        let id = property.id;
        // Parent existence and shape were checked above.
        let _ = self.schema.insert_under(parent, property);
        self.notify();
        Ok(id)
    }

    /// Shallow-merge `name`/`description`/`required` into a node.
    pub fn update_property(
        &mut self,
        id: PropertyId,
        patch: PropertyPatch,
    ) -> Result<(), StoreError> {
        if self.schema.find(id).is_none() {
            return Err(StoreError::UnknownProperty(id));
        }
        if let Some(name) = &patch.name {
            if name.is_empty() {
                return Err(StoreError::EmptyName);
            }
            let parent = self.parent_of(id);
            self.check_sibling_name(parent, name, Some(id))?;
        }

        let property = self
            .schema
            .find_mut(id)
            .ok_or(StoreError::UnknownProperty(id))?;
        if let Some(name) = patch.name {
            property.name = name;
        }
        if let Some(description) = patch.description {
            property.description = description;
        }
        if let Some(required) = patch.required {
            property.required = required;
        }
        self.notify();
        Ok(())
    }

    /// Switch a node's type, re-deriving default rules and dropping children
    /// or items that no longer apply.
    pub fn change_type(
        &mut self,
        id: PropertyId,
        property_type: PropertyType,
    ) -> Result<(), StoreError> {
        let property = self
            .schema
            .find_mut(id)
            .ok_or(StoreError::UnknownProperty(id))?;
        if property.property_type() != property_type {
            property.kind = PropertyKind::with_defaults(property_type);
            self.notify();
        }
        Ok(())
    }

    /// Replace a node's validation rules. The rule variant must match the
    /// node's current type, and boolean rules must admit at least one value.
    pub fn set_rules(&mut self, id: PropertyId, rules: Rules) -> Result<(), StoreError> {
        if let Rules::Boolean(boolean) = &rules {
            if !boolean.is_satisfiable() {
                return Err(StoreError::UnsatisfiableBoolean);
            }
        }

        let property = self
            .schema
            .find_mut(id)
            .ok_or(StoreError::UnknownProperty(id))?;
        let supplied = rules.property_type();
        if !property.kind.set_rules(rules) {
            return Err(StoreError::TypeMismatch {
                supplied,
                actual: property.property_type(),
            });
        }
        self.notify();
        Ok(())
    }

    /// Remove a node and all its descendants.
    pub fn delete_property(&mut self, id: PropertyId) -> Result<(), StoreError> {
        if !self.schema.remove(id) {
            return Err(StoreError::UnknownProperty(id));
        }
        self.notify();
        Ok(())
    }

    /// Move a root-level property from one position to another.
    pub fn reorder_properties(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        let len = self.schema.properties.len();
        if from >= len || to >= len {
            return Err(StoreError::IndexOutOfBounds);
        }
        let property = self.schema.properties.remove(from);
        self.schema.properties.insert(to, property);
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback(&self.schema);
        }
    }

    /// Reject a name already taken by a sibling, skipping the node being
    /// renamed.
    fn check_sibling_name(
        &self,
        parent: Option<PropertyId>,
        name: &str,
        renaming: Option<PropertyId>,
    ) -> Result<(), StoreError> {
        let Some(siblings) = self.schema.siblings(parent) else {
            return Ok(());
        };
        let taken = siblings
            .iter()
            .any(|p| p.name == name && Some(p.id) != renaming);
        if taken {
            return Err(StoreError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Id of the node whose child list contains `id`, or `None` for a
    /// root-level node (or an unknown id).
    fn parent_of(&self, id: PropertyId) -> Option<PropertyId> {
        fn walk(properties: &[Property], id: PropertyId) -> Option<PropertyId> {
            for prop in properties {
                if let Some(children) = prop.children() {
                    if children.iter().any(|c| c.id == id) {
                        return Some(prop.id);
                    }
                    if let Some(found) = walk(children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.schema.properties, id)
    }
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("schema", &self.schema)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
