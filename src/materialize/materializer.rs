//! The materialization walk.
//!
//! Given a registered schema and a parsed JSON region, produces one typed
//! instance (or a sequence of them), recursing through nested object and
//! collection declarations. Absence at any path is a first-class outcome:
//! attributes are omitted, objects left unset, collections left empty.

use log::{debug, trace};
use serde_json::Value;

use crate::cast::{self, CastValue};
use crate::error::Result;
use crate::path::Path;
use crate::schema::{Schema, TypeRegistry};

use super::instance::{Defaults, Instance};
use super::source::Source;

/// Materializes instances against the schemas held by a [`TypeRegistry`].
///
/// The materializer borrows the registry read-only; it is cheap to
/// construct and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct Materializer<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> Materializer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Materializer { registry }
    }

    /// Materialize one instance of `type_name` from `source`.
    ///
    /// Returns `Ok(None)` when the effective root path resolves to
    /// nothing, or when the addressed region is not a container.
    pub fn from_json<'a>(
        &self,
        type_name: &str,
        source: impl Into<Source<'a>>,
    ) -> Result<Option<Instance>> {
        self.from_json_with(type_name, source, &Defaults::new(), None)
    }

    /// Like [`from_json`](Self::from_json), with attribute defaults and an
    /// optional root path. An explicit root replaces the schema's declared
    /// root; an explicit empty path suppresses root extraction entirely.
    pub fn from_json_with<'a>(
        &self,
        type_name: &str,
        source: impl Into<Source<'a>>,
        defaults: &Defaults,
        root: Option<&Path>,
    ) -> Result<Option<Instance>> {
        let schema = self.registry.resolve(type_name)?;
        let source: Source<'a> = source.into();
        let value = source.into_value()?;
        match root {
            Some(path) => {
                let Some(region) = path.resolve(&value) else {
                    return Ok(None);
                };
                self.materialize_region(schema, region, defaults)
            }
            None => self.materialize_one(schema, &value, defaults),
        }
    }

    /// Materialize a sequence of `type_name` instances from an array
    /// source, preserving order.
    pub fn collection_from_json<'a>(
        &self,
        type_name: &str,
        source: impl Into<Source<'a>>,
    ) -> Result<Vec<Instance>> {
        self.collection_from_json_with(type_name, source, &Defaults::new(), None)
    }

    /// Like [`collection_from_json`](Self::collection_from_json), with
    /// attribute defaults applied to every element and an optional root
    /// path locating the array (index segments may address a nested
    /// array). The schema's own declared root is applied per element, so
    /// elements whose root extraction fails are discarded.
    pub fn collection_from_json_with<'a>(
        &self,
        type_name: &str,
        source: impl Into<Source<'a>>,
        defaults: &Defaults,
        root: Option<&Path>,
    ) -> Result<Vec<Instance>> {
        let schema = self.registry.resolve(type_name)?;
        let source: Source<'a> = source.into();
        let value = source.into_value()?;
        let region = match root {
            Some(path) => match path.resolve(&value) {
                Some(region) => region,
                None => return Ok(Vec::new()),
            },
            None => &*value,
        };
        let Value::Array(elements) = region else {
            return Ok(Vec::new());
        };
        let mut instances = Vec::new();
        for element in elements {
            if let Some(instance) = self.materialize_one(schema, element, defaults)? {
                instances.push(instance);
            }
        }
        debug!(
            "materialized {} `{type_name}` instances from {} elements",
            instances.len(),
            elements.len()
        );
        Ok(instances)
    }

    /// Apply the schema's declared root, then materialize the region.
    fn materialize_one(
        &self,
        schema: &Schema,
        value: &Value,
        defaults: &Defaults,
    ) -> Result<Option<Instance>> {
        let region = match schema.root() {
            Some(path) => match path.resolve(value) {
                Some(region) => region,
                None => return Ok(None),
            },
            None => value,
        };
        self.materialize_region(schema, region, defaults)
    }

    /// Materialize an already-extracted region. Only containers
    /// materialize; a null or scalar region yields no instance.
    fn materialize_region(
        &self,
        schema: &Schema,
        region: &Value,
        defaults: &Defaults,
    ) -> Result<Option<Instance>> {
        if !region.is_object() && !region.is_array() {
            return Ok(None);
        }
        trace!("materializing `{}`", schema.type_name());

        let mut attributes = defaults.clone();
        for decl in schema.attributes() {
            let Some(raw) = decl.path.resolve(region) else {
                continue;
            };
            if raw.is_null() {
                continue;
            }
            let value = match decl.cast {
                Some(kind) => match cast::cast(kind, raw, &decl.options)? {
                    Some(value) => value,
                    // blank-string casts fall back to absence
                    None => continue,
                },
                None => CastValue::Raw(raw.clone()),
            };
            attributes.insert(decl.name.clone(), value);
        }

        let mut instance = Instance::new(schema.type_name().to_string(), attributes);

        for decl in schema.objects() {
            let Some(found) = decl.path.resolve(region) else {
                continue;
            };
            if !found.is_object() {
                continue;
            }
            let child = self.registry.resolve(&decl.class_name)?;
            if let Some(nested) = self.materialize_one(child, found, &Defaults::new())? {
                instance.set_object(decl.name.clone(), nested);
            }
        }

        for decl in schema.collections() {
            let mut items = Vec::new();
            if let Some(Value::Array(elements)) = decl.path.resolve(region) {
                let child = self.registry.resolve(&decl.class_name)?;
                for element in elements {
                    if let Some(nested) = self.materialize_one(child, element, &Defaults::new())? {
                        items.push(nested);
                    }
                }
            }
            // declared collections are always set, empty on absence
            instance.set_collection(decl.name.clone(), items);
        }

        Ok(Some(instance))
    }
}
