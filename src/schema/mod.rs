//! Stream schema subsystem
//!
//! A `StreamSchema` is the canonical in-memory record of one stream's
//! identity, source bindings, and processing rules. Every other subsystem
//! either reads it (ingestion binds to its token) or writes a snapshot of it
//! (the schema store).
//!
//! # Design Principles
//!
//! - The stream token is set exactly once, at construction, and is never
//!   overwritten by any later operation, merges included
//! - Version only moves forward, by exactly 1 per publish
//! - Filter and derived-parameter lists are append-only and keep insertion
//!   order
//! - Bulk loads are partial merges: keys absent from the input keep their
//!   prior values

mod errors;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use types::{Measure, SourceLocation, StreamSchema};
