//! Core engine for a visual JSON Schema editor.
//!
//! Keeps three representations in sync: an internal editable property tree
//! ([`model`] + [`store`]), a generated draft-07 JSON Schema document
//! ([`generator`], with [`parser`] as the inverse transform for hand-edited
//! schema text), and a live-validated sample JSON instance ([`validator`],
//! which maps violations back to source line numbers).
//!
//! All operations are synchronous pure functions over their arguments; the
//! only mutable state is the tree owned by [`store::SchemaStore`].

pub mod format;
pub mod generator;
pub mod model;
pub mod parser;
pub mod rules;
pub mod store;
pub mod validator;
pub mod vocabulary;

pub use generator::{generate, generate_pretty};
pub use model::{ArrayItems, Property, PropertyId, PropertyKind, Schema};
pub use parser::{parse, ParseError};
pub use rules::Rules;
pub use store::{NewProperty, PropertyPatch, SchemaStore, StoreError};
pub use validator::{check_instance_text, validate, ValidationIssue, ValidationOutcome};
pub use vocabulary::{PropertyType, DRAFT7_SCHEMA_URI};
