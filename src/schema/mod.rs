//! Per-type declaration schemas
//!
//! This module holds the declaration-time half of the engine: the builder
//! that accumulates attribute/object/collection declarations, the
//! immutable schema it produces, and the registry that resolves target
//! type names during materialization.

pub mod builder;
pub mod registry;
pub mod types;

pub use builder::{Attribute, Nested, SchemaBuilder};
pub use registry::TypeRegistry;
pub use types::{AttributeDecl, CollectionDecl, Inflection, ObjectDecl, Schema};
