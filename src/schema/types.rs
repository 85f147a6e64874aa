//! Stream schema record types
//!
//! The schema used to live as a free-form mapping; it is an explicit record
//! type here so field access is typed and serialization is a derive, not a
//! convention.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::{json_type_name, SchemaError, SchemaResult};

/// Where a stream's records come from.
///
/// A source is either a file on disk or a broker topic; broker-bound sources
/// carry the topic name the ingestion side subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceLocation {
    /// Records read from a file
    File {
        /// Path to the source file
        path: String,
    },
    /// Records consumed from a broker topic
    BrokerTopic {
        /// Topic name to subscribe to
        topic: String,
    },
}

/// A declared measure: a value slot plus its declared type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Current value; null until a record fills it
    pub val: Value,
    /// Declared data type name
    pub dtype: String,
}

/// Canonical definition of one data stream.
///
/// Created empty with a fresh token and version 0, populated through the
/// `add_*` operations or a bulk [`load_from_json`](StreamSchema::load_from_json)
/// merge, published zero or more times, then persisted as an immutable
/// snapshot by the schema store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSchema {
    /// Opaque stream identity, generated once at construction.
    ///
    /// Never reassigned: bulk merges skip this key even when the input
    /// document carries one.
    stream_token: Uuid,
    /// Publish counter; starts at 0 and only ever increments
    pub version: u64,
    /// Human-readable stream name
    pub stream_name: Option<String>,
    /// Wall-clock stamp of the last definition change, if the client set one
    pub timestamp: Option<DateTime<Utc>>,
    /// Source bindings by source name
    pub sources: HashMap<String, SourceLocation>,
    /// Opaque storage rule bag
    pub storage_rules: Map<String, Value>,
    /// Opaque ingestion rule bag
    pub ingest_rules: Map<String, Value>,
    /// Opaque engine rule bag
    pub engine_rules: Map<String, Value>,
    /// Declared measures by name
    pub measures: HashMap<String, Measure>,
    /// Free-form field attribute bags by field name
    pub fields: HashMap<String, Map<String, Value>>,
    /// Free-form user-id attribute bags by id name
    pub user_ids: HashMap<String, Map<String, Value>>,
    /// Free-form tag attribute bags by tag name
    pub tags: HashMap<String, Map<String, Value>>,
    /// Free-form foreign-key attribute bags by key name
    pub foreign_keys: HashMap<String, Map<String, Value>>,
    /// Ordered filter rules; insertion order is significant
    pub filters: Vec<Value>,
    /// Ordered derived-parameter rules; insertion order is significant
    pub dparam_rules: Vec<Value>,
    /// Event rules by event name
    pub event_rules: HashMap<String, Value>,
}

impl StreamSchema {
    /// Creates an empty schema with a fresh token and version 0.
    pub fn new() -> Self {
        Self {
            stream_token: Uuid::new_v4(),
            version: 0,
            stream_name: None,
            timestamp: None,
            sources: HashMap::new(),
            storage_rules: Map::new(),
            ingest_rules: Map::new(),
            engine_rules: Map::new(),
            measures: HashMap::new(),
            fields: HashMap::new(),
            user_ids: HashMap::new(),
            tags: HashMap::new(),
            foreign_keys: HashMap::new(),
            filters: Vec::new(),
            dparam_rules: Vec::new(),
            event_rules: HashMap::new(),
        }
    }

    /// Returns the stream token.
    pub fn token(&self) -> Uuid {
        self.stream_token
    }

    /// Inserts or overwrites a source binding. Last write wins.
    pub fn add_source(&mut self, name: impl Into<String>, location: SourceLocation) {
        self.sources.insert(name.into(), location);
    }

    /// Declares a measure with a null value slot. Last write wins.
    pub fn add_measure(&mut self, name: impl Into<String>, dtype: impl Into<String>) {
        self.measures.insert(
            name.into(),
            Measure {
                val: Value::Null,
                dtype: dtype.into(),
            },
        );
    }

    /// Declares a field with an empty attribute bag. Last write wins.
    pub fn add_field(&mut self, name: impl Into<String>) {
        self.fields.insert(name.into(), Map::new());
    }

    /// Declares a user id with an empty attribute bag. Last write wins.
    pub fn add_user_id(&mut self, name: impl Into<String>) {
        self.user_ids.insert(name.into(), Map::new());
    }

    /// Declares a tag with an empty attribute bag. Last write wins.
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.insert(name.into(), Map::new());
    }

    /// Declares a foreign key with an empty attribute bag. Last write wins.
    pub fn add_foreign_key(&mut self, name: impl Into<String>) {
        self.foreign_keys.insert(name.into(), Map::new());
    }

    /// Appends a filter rule. No deduplication.
    pub fn add_filter(&mut self, rule: Value) {
        self.filters.push(rule);
    }

    /// Appends a derived-parameter rule. No deduplication.
    pub fn add_derived_param(&mut self, rule: Value) {
        self.dparam_rules.push(rule);
    }

    /// Inserts or overwrites an event rule. Last write wins.
    pub fn add_event(&mut self, name: impl Into<String>, rule: Value) {
        self.event_rules.insert(name.into(), rule);
    }

    /// Increments the version by exactly 1. No other side effect.
    pub fn publish(&mut self) {
        self.version += 1;
    }

    /// Merges a JSON document into this schema.
    ///
    /// This is a partial merge, not a replace: every recognized top-level key
    /// in `doc` overwrites the corresponding field, keys absent from `doc`
    /// keep their prior values, and the token key is skipped outright.
    /// Unrecognized keys are ignored.
    ///
    /// Fails with [`SchemaError::TypeMismatch`] when `doc` is not a JSON
    /// object, and with [`SchemaError::FieldType`] when a present key does
    /// not deserialize into its field's type. A failed merge commits no
    /// partial effect: the schema is exactly as it was before the call.
    pub fn load_from_json(&mut self, doc: &Value) -> SchemaResult<()> {
        let obj = doc.as_object().ok_or_else(|| SchemaError::TypeMismatch {
            found: json_type_name(doc),
        })?;

        // Two-phase merge: deserialize every present key first, assign only
        // once all of them parsed.
        let mut staged = StagedMerge::default();
        for (key, value) in obj {
            match key.as_str() {
                // Token immutability: the input may carry one, it is never
                // applied.
                "stream_token" => continue,
                "version" => staged.version = Some(field("version", value)?),
                "stream_name" => staged.stream_name = Some(field("stream_name", value)?),
                "timestamp" => staged.timestamp = Some(field("timestamp", value)?),
                "sources" => staged.sources = Some(field("sources", value)?),
                "storage_rules" => staged.storage_rules = Some(field("storage_rules", value)?),
                "ingest_rules" => staged.ingest_rules = Some(field("ingest_rules", value)?),
                "engine_rules" => staged.engine_rules = Some(field("engine_rules", value)?),
                "measures" => staged.measures = Some(field("measures", value)?),
                "fields" => staged.fields = Some(field("fields", value)?),
                "user_ids" => staged.user_ids = Some(field("user_ids", value)?),
                "tags" => staged.tags = Some(field("tags", value)?),
                "foreign_keys" => staged.foreign_keys = Some(field("foreign_keys", value)?),
                "filters" => staged.filters = Some(field("filters", value)?),
                "dparam_rules" => staged.dparam_rules = Some(field("dparam_rules", value)?),
                "event_rules" => staged.event_rules = Some(field("event_rules", value)?),
                _ => {}
            }
        }
        staged.apply(self);

        Ok(())
    }
}

impl Default for StreamSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserializes one merge value into its field's type.
fn field<T: serde::de::DeserializeOwned>(name: &'static str, value: &Value) -> SchemaResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| SchemaError::FieldType {
        field: name,
        reason: e.to_string(),
    })
}

/// Parsed merge values held back until the whole document is known good.
#[derive(Default)]
struct StagedMerge {
    version: Option<u64>,
    stream_name: Option<Option<String>>,
    timestamp: Option<Option<DateTime<Utc>>>,
    sources: Option<HashMap<String, SourceLocation>>,
    storage_rules: Option<Map<String, Value>>,
    ingest_rules: Option<Map<String, Value>>,
    engine_rules: Option<Map<String, Value>>,
    measures: Option<HashMap<String, Measure>>,
    fields: Option<HashMap<String, Map<String, Value>>>,
    user_ids: Option<HashMap<String, Map<String, Value>>>,
    tags: Option<HashMap<String, Map<String, Value>>>,
    foreign_keys: Option<HashMap<String, Map<String, Value>>>,
    filters: Option<Vec<Value>>,
    dparam_rules: Option<Vec<Value>>,
    event_rules: Option<HashMap<String, Value>>,
}

impl StagedMerge {
    /// Overwrites the schema fields whose keys were present in the input.
    fn apply(self, schema: &mut StreamSchema) {
        if let Some(v) = self.version {
            schema.version = v;
        }
        if let Some(v) = self.stream_name {
            schema.stream_name = v;
        }
        if let Some(v) = self.timestamp {
            schema.timestamp = v;
        }
        if let Some(v) = self.sources {
            schema.sources = v;
        }
        if let Some(v) = self.storage_rules {
            schema.storage_rules = v;
        }
        if let Some(v) = self.ingest_rules {
            schema.ingest_rules = v;
        }
        if let Some(v) = self.engine_rules {
            schema.engine_rules = v;
        }
        if let Some(v) = self.measures {
            schema.measures = v;
        }
        if let Some(v) = self.fields {
            schema.fields = v;
        }
        if let Some(v) = self.user_ids {
            schema.user_ids = v;
        }
        if let Some(v) = self.tags {
            schema.tags = v;
        }
        if let Some(v) = self.foreign_keys {
            schema.foreign_keys = v;
        }
        if let Some(v) = self.filters {
            schema.filters = v;
        }
        if let Some(v) = self.dparam_rules {
            schema.dparam_rules = v;
        }
        if let Some(v) = self.event_rules {
            schema.event_rules = v;
        }
    }
}
