//! In-memory schema store
//!
//! Snapshot semantics match the document-store contract: insert serializes
//! the schema at that moment, get deserializes a field-equal copy. Later
//! mutation of the original never leaks into a stored snapshot. Used by
//! tests and as the default backing until a driver is bound.

use std::collections::HashMap;

use serde_json::Value;

use super::{SchemaStore, StoreError, StoreId, StorePartition, StoreResult};
use crate::schema::StreamSchema;

/// Three independent partition maps of serialized snapshots.
#[derive(Debug, Default)]
pub struct MemoryStore {
    templates: HashMap<StoreId, Value>,
    derived: HashMap<StoreId, Value>,
    events: HashMap<StoreId, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a partition.
    pub fn len(&self, partition: StorePartition) -> usize {
        self.partition(partition).len()
    }

    /// True when a partition holds no documents.
    pub fn is_empty(&self, partition: StorePartition) -> bool {
        self.partition(partition).is_empty()
    }

    fn partition(&self, partition: StorePartition) -> &HashMap<StoreId, Value> {
        match partition {
            StorePartition::Template => &self.templates,
            StorePartition::Derived => &self.derived,
            StorePartition::Event => &self.events,
        }
    }

    fn partition_mut(&mut self, partition: StorePartition) -> &mut HashMap<StoreId, Value> {
        match partition {
            StorePartition::Template => &mut self.templates,
            StorePartition::Derived => &mut self.derived,
            StorePartition::Event => &mut self.events,
        }
    }
}

impl SchemaStore for MemoryStore {
    fn insert(
        &mut self,
        schema: &StreamSchema,
        partition: StorePartition,
    ) -> StoreResult<StoreId> {
        let snapshot = serde_json::to_value(schema)?;
        let id = StoreId::generate();
        self.partition_mut(partition).insert(id, snapshot);
        Ok(id)
    }

    fn get_by_id(&self, id: &StoreId, partition: StorePartition) -> StoreResult<StreamSchema> {
        let snapshot = self
            .partition(partition)
            .get(id)
            .ok_or(StoreError::NotFound {
                id: *id,
                partition,
            })?;
        Ok(serde_json::from_value(snapshot.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_immutable() {
        let mut store = MemoryStore::new();
        let mut schema = StreamSchema::new();
        schema.add_field("lat");
        let id = store.insert(&schema, StorePartition::Template).unwrap();

        // Mutating the live schema must not change the stored snapshot.
        schema.add_field("lon");
        let stored = store.get_by_id(&id, StorePartition::Template).unwrap();
        assert!(stored.fields.contains_key("lat"));
        assert!(!stored.fields.contains_key("lon"));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut store = MemoryStore::new();
        let schema = StreamSchema::new();
        let id = store.insert(&schema, StorePartition::Derived).unwrap();
        let err = store.get_by_id(&id, StorePartition::Event).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                partition: StorePartition::Event,
                ..
            }
        ));
    }
}
