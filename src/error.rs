use thiserror::Error;

use crate::cast::CastKind;

/// Errors surfaced by parsing, casting, and type resolution.
///
/// Absence of a value at a path is never an error: the resolver reports it
/// as `None` and materialization turns it into omitted attributes, unset
/// nested objects, or empty nested collections.
#[derive(Debug, Error)]
pub enum Error {
    /// The top-level input was malformed JSON text, or not a JSON
    /// object/array/string at all.
    #[error("cannot parse {0}")]
    Parse(String),

    /// A declared cast has no defined conversion for the raw value.
    #[error("don't know how to cast {value} to {kind}")]
    TypeCast { kind: CastKind, value: String },

    /// A declared or inferred target type name has no registered schema.
    #[error("no schema registered for type `{0}`")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, Error>;
