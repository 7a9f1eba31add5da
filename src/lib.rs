//! # Diecast - Declarative JSON Mapping
//!
//! A library for mapping loosely-structured JSON documents onto
//! strongly-typed, composable instances. Callers declare, per target
//! type, a set of attributes, nested objects, and nested collections -
//! each with an optional path, a type cast, and composition rules - and
//! the engine walks a parsed document to produce an immutable instance
//! graph.
//!
//! ## Modules
//!
//! - **schema**: declaration builders, immutable schemas, the type registry
//! - **materialize**: the materialization walk producing instance graphs
//! - **cast**: scalar conversions to declared semantic types
//! - **path**: keyed/indexed addressing into parsed JSON
//! - **inflect**: casing and pluralization used for inferred defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use diecast::{Attribute, CastKind, Materializer, Schema, TypeRegistry};
//!
//! # fn main() -> Result<(), diecast::Error> {
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     Schema::builder("Shipment")
//!         .attribute(
//!             "status",
//!             Attribute::of(CastKind::String).path(["status", "statusCode"]),
//!         )
//!         .collection("events", "Event")
//!         .build(),
//! );
//! registry.register(
//!     Schema::builder("Event")
//!         .attribute(
//!             "locality",
//!             Attribute::of(CastKind::String).path(["location", "address", "addressLocality"]),
//!         )
//!         .build(),
//! );
//!
//! let mapper = Materializer::new(&registry);
//! let shipment = mapper
//!     .from_json(
//!         "Shipment",
//!         r#"{"status": {"statusCode": "transit"},
//!             "events": [{"location": {"address": {"addressLocality": "Berlin"}}}]}"#,
//!     )?
//!     .expect("document has no root path, so an instance is always produced");
//!
//! assert_eq!(shipment.get("status").unwrap().as_str(), Some("transit"));
//! assert_eq!(shipment.collection("events").len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! Paths default to the declared name run through the type's inflection
//! strategy (lower camelcase unless configured otherwise), and nested
//! target types default to the classified field name, so the common case
//! needs no explicit configuration at all:
//!
//! ```rust
//! use diecast::{CastKind, Materializer, Schema, TypeRegistry};
//! use serde_json::json;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(
//!     Schema::builder("Post")
//!         .attribute("status_code", CastKind::Integer) // reads "statusCode"
//!         .collection("comments", diecast::Nested::new()) // element type "Comment"
//!         .build(),
//! );
//! registry.register(
//!     Schema::builder("Comment")
//!         .attribute("author", CastKind::String)
//!         .build(),
//! );
//!
//! let mapper = Materializer::new(&registry);
//! let post = mapper
//!     .from_json("Post", &json!({"statusCode": 200, "comments": [{"author": "jo"}]}))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(post.get("status_code").unwrap().as_i64(), Some(200));
//! assert_eq!(post.collection("comments").len(), 1);
//! ```

pub mod cast;
pub mod error;
pub mod inflect;
pub mod materialize;
pub mod path;
pub mod schema;

// Re-export the full declaration and materialization surface
pub use cast::{cast, CastKind, CastOptions, CastValue};
pub use error::{Error, Result};
pub use materialize::{Defaults, Instance, Materializer, Source};
pub use path::{Path, PathSegment};
pub use schema::{Attribute, Inflection, Nested, Schema, SchemaBuilder, TypeRegistry};
