use crate::cast::{CastKind, CastOptions};
use crate::inflect::{self, FirstLetter};
use crate::path::Path;

/// Casing strategy used to derive default member paths from declared
/// field names. `Custom` injects the caller's own transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inflection {
    LowerCamel,
    UpperCamel,
    Dash,
    Snake,
    Custom(fn(&str) -> String),
}

impl Inflection {
    pub fn apply(&self, name: &str) -> String {
        match self {
            Inflection::LowerCamel => inflect::camelcase(name, FirstLetter::Lower),
            Inflection::UpperCamel => inflect::camelcase(name, FirstLetter::Upper),
            Inflection::Dash => inflect::dasherize(name),
            Inflection::Snake => inflect::underscore(name),
            Inflection::Custom(transform) => transform(name),
        }
    }
}

impl Default for Inflection {
    fn default() -> Self {
        Inflection::LowerCamel
    }
}

/// A declared scalar attribute with its effective path and cast.
#[derive(Debug, Clone)]
pub struct AttributeDecl {
    pub name: String,
    pub path: Path,
    pub cast: Option<CastKind>,
    pub options: CastOptions,
}

/// A declared nested object field.
#[derive(Debug, Clone)]
pub struct ObjectDecl {
    pub name: String,
    pub path: Path,
    pub class_name: String,
}

/// A declared nested collection field.
#[derive(Debug, Clone)]
pub struct CollectionDecl {
    pub name: String,
    pub path: Path,
    pub class_name: String,
}

/// The immutable declaration set for one target type: built once by
/// [`SchemaBuilder`](crate::schema::SchemaBuilder), then shared read-only
/// by every materialization of that type.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) type_name: String,
    pub(crate) root: Option<Path>,
    pub(crate) inflection: Inflection,
    pub(crate) attributes: Vec<AttributeDecl>,
    pub(crate) objects: Vec<ObjectDecl>,
    pub(crate) collections: Vec<CollectionDecl>,
}

impl Schema {
    /// Start declaring a new target type.
    pub fn builder(type_name: impl Into<String>) -> super::SchemaBuilder {
        super::SchemaBuilder::new(type_name)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_ref()
    }

    pub fn inflection(&self) -> Inflection {
        self.inflection
    }

    pub fn attributes(&self) -> &[AttributeDecl] {
        &self.attributes
    }

    pub fn objects(&self) -> &[ObjectDecl] {
        &self.objects
    }

    pub fn collections(&self) -> &[CollectionDecl] {
        &self.collections
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDecl> {
        self.attributes.iter().find(|decl| decl.name == name)
    }

    pub fn object(&self, name: &str) -> Option<&ObjectDecl> {
        self.objects.iter().find(|decl| decl.name == name)
    }

    pub fn collection(&self, name: &str) -> Option<&CollectionDecl> {
        self.collections.iter().find(|decl| decl.name == name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|decl| decl.name.as_str())
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|decl| decl.name.as_str())
    }

    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.iter().map(|decl| decl.name.as_str())
    }
}
