use std::collections::BTreeMap;

use crate::cast::CastValue;

/// Attribute defaults merged beneath resolved values during
/// materialization; resolved values always win.
pub type Defaults = BTreeMap<String, CastValue>;

/// One materialized, typed instance: a named attribute map plus nested
/// object and collection fields.
///
/// Declared collection fields are always present, holding an empty
/// sequence when their source path resolved to nothing. The instance owns
/// all of its data; nothing borrows from the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    attributes: BTreeMap<String, CastValue>,
    objects: BTreeMap<String, Instance>,
    collections: BTreeMap<String, Vec<Instance>>,
}

impl Instance {
    pub(crate) fn new(type_name: String, attributes: BTreeMap<String, CastValue>) -> Self {
        Instance {
            type_name,
            attributes,
            objects: BTreeMap::new(),
            collections: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up an attribute. Absent attributes (path missed, null, or a
    /// blank-string cast) are simply not present.
    pub fn get(&self, name: &str) -> Option<&CastValue> {
        self.attributes.get(name)
    }

    /// Look up a nested object field.
    pub fn object(&self, name: &str) -> Option<&Instance> {
        self.objects.get(name)
    }

    /// Look up a nested collection field. Declared collections are never
    /// absent; an unknown name also reads as empty.
    pub fn collection(&self, name: &str) -> &[Instance] {
        self.collections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &CastValue)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &Instance)> {
        self.objects.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn collections(&self) -> impl Iterator<Item = (&str, &[Instance])> {
        self.collections
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub(crate) fn set_object(&mut self, name: String, instance: Instance) {
        self.objects.insert(name, instance);
    }

    pub(crate) fn set_collection(&mut self, name: String, instances: Vec<Instance>) {
        self.collections.insert(name, instances);
    }
}
