//! Stream schema invariant tests
//!
//! - The token is set once at construction and survives any number of
//!   bulk merges, token-carrying inputs included
//! - publish() N times yields version == N and touches nothing else
//! - load_from_json is a partial merge, not a replace

use serde_json::json;
use streamgate::schema::{SchemaError, SourceLocation, StreamSchema};

// =============================================================================
// Helper Functions
// =============================================================================

fn populated_schema() -> StreamSchema {
    let mut schema = StreamSchema::new();
    schema.add_source(
        "gps",
        SourceLocation::BrokerTopic {
            topic: "gps-raw".into(),
        },
    );
    schema.add_measure("speed", "float");
    schema.add_field("region");
    schema.add_user_id("driver_id");
    schema.add_tag("fleet");
    schema.add_foreign_key("vehicle_id");
    schema.add_filter(json!({"func": "butter_lowpass", "order": 2}));
    schema.add_derived_param(json!({"func": "heading", "measure": "gps"}));
    schema.add_event("turn", json!({"func": "compare", "threshold": 45}));
    schema
}

// =============================================================================
// Token Immutability
// =============================================================================

#[test]
fn test_token_survives_repeated_merges() {
    let mut schema = populated_schema();
    let token = schema.token();
    assert!(!token.is_nil());

    for i in 0..10 {
        schema
            .load_from_json(&json!({"stream_name": format!("run-{}", i)}))
            .unwrap();
        assert_eq!(schema.token(), token);
    }
}

#[test]
fn test_merge_input_token_is_ignored() {
    let mut schema = StreamSchema::new();
    let token = schema.token();

    schema
        .load_from_json(&json!({
            "stream_token": "11111111-2222-3333-4444-555555555555",
            "stream_name": "driver_data"
        }))
        .unwrap();

    assert_eq!(schema.token(), token);
    assert_eq!(schema.stream_name.as_deref(), Some("driver_data"));
}

// =============================================================================
// Publish
// =============================================================================

#[test]
fn test_publish_n_times_yields_version_n() {
    let mut schema = populated_schema();
    let before = schema.clone();

    for n in 1..=25u64 {
        schema.publish();
        assert_eq!(schema.version, n);
    }

    // Everything but the version is untouched.
    let mut published = schema.clone();
    published.version = before.version;
    assert_eq!(published, before);
}

// =============================================================================
// Partial Merge
// =============================================================================

#[test]
fn test_merge_overwrites_present_keys_only() {
    let mut schema = populated_schema();
    let prior_sources = schema.sources.clone();
    let prior_filters = schema.filters.clone();

    schema
        .load_from_json(&json!({
            "stream_name": "renamed",
            "measures": {"altitude": {"val": null, "dtype": "float"}}
        }))
        .unwrap();

    // Present keys overwrite.
    assert_eq!(schema.stream_name.as_deref(), Some("renamed"));
    assert_eq!(schema.measures.len(), 1);
    assert!(schema.measures.contains_key("altitude"));

    // Absent keys retain prior values.
    assert_eq!(schema.sources, prior_sources);
    assert_eq!(schema.filters, prior_filters);
}

#[test]
fn test_merge_replaces_ordered_lists_wholesale_when_present() {
    let mut schema = populated_schema();

    schema
        .load_from_json(&json!({
            "filters": [{"func": "a"}, {"func": "b"}, {"func": "c"}]
        }))
        .unwrap();

    let funcs: Vec<&str> = schema
        .filters
        .iter()
        .map(|f| f["func"].as_str().unwrap())
        .collect();
    assert_eq!(funcs, ["a", "b", "c"]);
}

#[test]
fn test_failed_merge_commits_nothing() {
    let mut schema = populated_schema();
    let before = schema.clone();

    // "filters" parses on its own; "measures" does not. The good key must
    // not land when a later key fails.
    let err = schema
        .load_from_json(&json!({
            "filters": [{"func": "a"}, {"func": "b"}],
            "measures": "not-a-mapping"
        }))
        .unwrap_err();

    assert!(matches!(err, SchemaError::FieldType { field: "measures", .. }));
    assert_eq!(schema, before);
}

#[test]
fn test_merge_rejects_non_object_input() {
    let mut schema = populated_schema();
    let before = schema.clone();

    for doc in [json!("string"), json!(7), json!([1]), json!(null)] {
        let err = schema.load_from_json(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    // A rejected merge has no partial effect.
    assert_eq!(schema, before);
}

// =============================================================================
// Snapshot round trip
// =============================================================================

#[test]
fn test_serde_round_trip_is_field_equal() {
    let mut schema = populated_schema();
    schema.publish();

    let value = serde_json::to_value(&schema).unwrap();
    let restored: StreamSchema = serde_json::from_value(value).unwrap();

    assert_eq!(restored, schema);
    assert_eq!(restored.token(), schema.token());
}
