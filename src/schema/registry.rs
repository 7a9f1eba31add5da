use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;

use super::types::Schema;

/// Maps logical type names to their schemas.
///
/// The registry is the resolver consulted when a nested object or
/// collection declaration names (or infers) a target type; nothing is
/// ever looked up ambiently. Registered schemas are shared read-only, so
/// concurrent materializations against one registry need no locking.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    schemas: HashMap<String, Arc<Schema>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry::default()
    }

    /// Register a schema under its own type name. A later registration
    /// under the same name replaces the earlier one.
    pub fn register(&mut self, schema: Schema) -> &mut Self {
        self.schemas
            .insert(schema.type_name().to_string(), Arc::new(schema));
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    pub(crate) fn resolve(&self, type_name: &str) -> Result<&Arc<Schema>, Error> {
        self.get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }
}
