//! JSON-to-instance materialization
//!
//! This module handles the runtime half of the engine: walking a parsed
//! JSON region against a registered schema and assembling typed instance
//! graphs, with nested objects and collections recursively materialized.

pub mod instance;
pub mod materializer;
pub mod source;

pub use instance::{Defaults, Instance};
pub use materializer::Materializer;
pub use source::Source;
