//! Declaration-time schema construction.
//!
//! A builder accumulates attribute, object, and collection declarations
//! and produces one immutable [`Schema`]. Effective paths and default
//! target type names are resolved here, at declaration time; only the
//! type-name-to-schema lookup is deferred to materialization.

use std::collections::HashSet;

use crate::cast::{CastKind, CastOptions};
use crate::inflect::{classify, singularize};
use crate::path::Path;

use super::types::{AttributeDecl, CollectionDecl, Inflection, ObjectDecl, Schema};

/// Options for one attribute declaration.
#[derive(Debug, Clone, Default)]
pub struct Attribute {
    path: Option<Path>,
    cast: Option<CastKind>,
    scale: Option<i64>,
    precision: Option<u64>,
}

impl Attribute {
    /// An attribute with no declared cast: the raw value is assigned
    /// unchanged.
    pub fn new() -> Self {
        Attribute::default()
    }

    pub fn of(kind: CastKind) -> Self {
        Attribute {
            cast: Some(kind),
            ..Default::default()
        }
    }

    /// Explicit path overriding the inflected default.
    pub fn path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path = Some(Path::from_segments(segments));
        self
    }

    pub fn scale(mut self, digits: i64) -> Self {
        self.scale = Some(digits);
        self
    }

    pub fn precision(mut self, digits: u64) -> Self {
        self.precision = Some(digits);
        self
    }
}

impl From<CastKind> for Attribute {
    fn from(kind: CastKind) -> Self {
        Attribute::of(kind)
    }
}

/// Options for a nested object or collection declaration.
#[derive(Debug, Clone, Default)]
pub struct Nested {
    path: Option<Path>,
    class_name: Option<String>,
}

impl Nested {
    /// Path and target type both inferred from the field name.
    pub fn new() -> Self {
        Nested::default()
    }

    /// Explicit target type name.
    pub fn of(class_name: impl Into<String>) -> Self {
        Nested {
            class_name: Some(class_name.into()),
            ..Default::default()
        }
    }

    /// Explicit path overriding the inflected default.
    pub fn path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path = Some(Path::from_segments(segments));
        self
    }
}

impl From<&str> for Nested {
    fn from(class_name: &str) -> Self {
        Nested::of(class_name)
    }
}

impl From<String> for Nested {
    fn from(class_name: String) -> Self {
        Nested::of(class_name)
    }
}

/// Accumulates declarations for one target type and finalizes them into
/// an immutable [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    type_name: String,
    root: Option<Path>,
    inflection: Inflection,
    attributes: Vec<(String, Attribute)>,
    objects: Vec<(String, Nested)>,
    collections: Vec<(String, Nested)>,
}

impl SchemaBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        SchemaBuilder {
            type_name: type_name.into(),
            root: None,
            inflection: Inflection::default(),
            attributes: Vec::new(),
            objects: Vec::new(),
            collections: Vec::new(),
        }
    }

    /// Select the casing strategy for default paths.
    pub fn inflection(mut self, strategy: Inflection) -> Self {
        self.inflection = strategy;
        self
    }

    /// Declare a root extraction path applied before any per-field path.
    /// Segments of the form `[N]` address array indices.
    pub fn root<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.root = Some(Path::from_segments(segments));
        self
    }

    /// Declare a scalar attribute.
    pub fn attribute(mut self, name: impl Into<String>, options: impl Into<Attribute>) -> Self {
        self.attributes.push((name.into(), options.into()));
        self
    }

    /// Declare several attributes sharing the same options.
    pub fn attributes<I, S>(mut self, names: I, options: impl Into<Attribute>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into();
        for name in names {
            self.attributes.push((name.into(), options.clone()));
        }
        self
    }

    /// Declare a nested object field.
    pub fn object(mut self, name: impl Into<String>, options: impl Into<Nested>) -> Self {
        self.objects.push((name.into(), options.into()));
        self
    }

    /// Declare a nested collection field.
    pub fn collection(mut self, name: impl Into<String>, options: impl Into<Nested>) -> Self {
        self.collections.push((name.into(), options.into()));
        self
    }

    /// Finalize the declarations.
    ///
    /// # Panics
    ///
    /// Panics when the same field name is declared more than once across
    /// attributes, objects, and collections: that is a static
    /// configuration mistake, caught at declaration time.
    pub fn build(self) -> Schema {
        let mut seen = HashSet::new();
        let names = self
            .attributes
            .iter()
            .map(|(name, _)| name)
            .chain(self.objects.iter().map(|(name, _)| name))
            .chain(self.collections.iter().map(|(name, _)| name));
        for name in names {
            assert!(
                seen.insert(name.clone()),
                "duplicate declaration `{name}` on type `{}`",
                self.type_name
            );
        }

        let inflection = self.inflection;
        let default_path = |name: &str| Path::from_segments([inflection.apply(name)]);

        let attributes = self
            .attributes
            .into_iter()
            .map(|(name, options)| AttributeDecl {
                path: options.path.unwrap_or_else(|| default_path(&name)),
                cast: options.cast,
                options: CastOptions {
                    scale: options.scale,
                    precision: options.precision,
                },
                name,
            })
            .collect();

        let objects = self
            .objects
            .into_iter()
            .map(|(name, options)| ObjectDecl {
                path: options.path.unwrap_or_else(|| default_path(&name)),
                class_name: options.class_name.unwrap_or_else(|| classify(&name)),
                name,
            })
            .collect();

        let collections = self
            .collections
            .into_iter()
            .map(|(name, options)| CollectionDecl {
                path: options.path.unwrap_or_else(|| default_path(&name)),
                class_name: options
                    .class_name
                    .unwrap_or_else(|| classify(&singularize(&name))),
                name,
            })
            .collect();

        Schema {
            type_name: self.type_name,
            root: self.root,
            inflection: self.inflection,
            attributes,
            objects,
            collections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    #[test]
    fn test_default_path_is_lower_camelcased_name() {
        let schema = Schema::builder("Event")
            .attribute("status_code", CastKind::Integer)
            .build();
        let decl = schema.attribute("status_code").unwrap();
        assert_eq!(
            decl.path.segments(),
            &[PathSegment::Key("statusCode".into())]
        );
    }

    #[test]
    fn test_default_path_per_strategy() {
        for (strategy, expected) in [
            (Inflection::LowerCamel, "statusCode"),
            (Inflection::UpperCamel, "StatusCode"),
            (Inflection::Dash, "status-code"),
            (Inflection::Snake, "status_code"),
        ] {
            let schema = Schema::builder("Event")
                .inflection(strategy)
                .attribute("status_code", CastKind::Integer)
                .build();
            let decl = schema.attribute("status_code").unwrap();
            assert_eq!(decl.path.segments(), &[PathSegment::Key(expected.into())]);
        }
    }

    #[test]
    fn test_custom_inflection() {
        fn shout(name: &str) -> String {
            name.to_uppercase()
        }
        let schema = Schema::builder("Event")
            .inflection(Inflection::Custom(shout))
            .attribute("status", CastKind::String)
            .build();
        let decl = schema.attribute("status").unwrap();
        assert_eq!(decl.path.segments(), &[PathSegment::Key("STATUS".into())]);
    }

    #[test]
    fn test_explicit_path_wins() {
        let schema = Schema::builder("Shipment")
            .attribute(
                "status",
                Attribute::of(CastKind::String).path(["status", "statusCode"]),
            )
            .build();
        let decl = schema.attribute("status").unwrap();
        assert_eq!(decl.path.segments().len(), 2);
    }

    #[test]
    fn test_collection_class_defaults_to_singularized_classified_name() {
        let schema = Schema::builder("Shipment")
            .collection("events", Nested::new())
            .collection("addresses", Nested::new())
            .build();
        assert_eq!(schema.collection("events").unwrap().class_name, "Event");
        assert_eq!(schema.collection("addresses").unwrap().class_name, "Address");
    }

    #[test]
    fn test_object_class_defaults_to_classified_name() {
        let schema = Schema::builder("Shipment")
            .object("status_info", Nested::new())
            .build();
        assert_eq!(schema.object("status_info").unwrap().class_name, "StatusInfo");
    }

    #[test]
    fn test_explicit_class_name() {
        let schema = Schema::builder("Post")
            .collection("comments", Nested::of("Remark").path(["replies"]))
            .build();
        let decl = schema.collection("comments").unwrap();
        assert_eq!(decl.class_name, "Remark");
        assert_eq!(decl.path.segments(), &[PathSegment::Key("replies".into())]);
    }

    #[test]
    fn test_bulk_attributes_share_options() {
        let schema = Schema::builder("Comment")
            .attributes(["author", "text"], CastKind::String)
            .build();
        assert_eq!(schema.attribute_names().collect::<Vec<_>>(), ["author", "text"]);
        assert_eq!(schema.attribute("text").unwrap().cast, Some(CastKind::String));
    }

    #[test]
    fn test_root_with_index_segment() {
        let schema = Schema::builder("Shipment")
            .root(["shipments", "[0]"])
            .build();
        assert_eq!(
            schema.root().unwrap().segments(),
            &[
                PathSegment::Key("shipments".into()),
                PathSegment::Index(0)
            ]
        );
    }

    #[test]
    #[should_panic(expected = "duplicate declaration")]
    fn test_duplicate_names_panic() {
        Schema::builder("Shipment")
            .attribute("events", Attribute::new())
            .collection("events", Nested::new())
            .build();
    }
}
