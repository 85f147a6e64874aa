//! Schema store boundary
//!
//! Persists `StreamSchema` snapshots into one of three logical partitions
//! and resolves them by a store-generated id. The partitions are
//! independent: the same token may legitimately appear in one document per
//! partition, and any cross-partition correlation by token is a caller
//! convention, not something enforced here.
//!
//! The store id and the stream token are unrelated identifiers; this layer
//! enforces no relationship between them.

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::StreamSchema;

/// Logical partition a snapshot lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorePartition {
    /// Client-defined templates
    Template,
    /// Derived-parameter outputs
    Derived,
    /// Event outputs
    Event,
}

impl StorePartition {
    /// All partitions, for iteration in callers and tests.
    pub const ALL: [StorePartition; 3] = [
        StorePartition::Template,
        StorePartition::Derived,
        StorePartition::Event,
    ];

    /// Returns the partition name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorePartition::Template => "template",
            StorePartition::Derived => "derived",
            StorePartition::Event => "event",
        }
    }
}

impl fmt::Display for StorePartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque store-generated document id. Only equality is guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(Uuid);

impl StoreId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Document-store boundary for schema snapshots.
pub trait SchemaStore {
    /// Persists an immutable snapshot of `schema` into `partition`.
    fn insert(&mut self, schema: &StreamSchema, partition: StorePartition)
        -> StoreResult<StoreId>;

    /// Resolves a snapshot by id within `partition`.
    fn get_by_id(&self, id: &StoreId, partition: StorePartition) -> StoreResult<StreamSchema>;
}
