//! streamgate - stream-schema definition and ingestion coordination
//!
//! A client defines a tokenized stream schema, binds it to a data source
//! (file or broker topic), and ingests records for downstream filtering,
//! derivation, and event matching. This crate owns the ingestion
//! coordination boundary: the schema record itself, a topic-change watcher,
//! a balanced consumer with per-message codec handling, and the store
//! boundary that persists schema snapshots.

pub mod broker;
pub mod cli;
pub mod config;
pub mod consumer;
pub mod gateway;
pub mod observability;
pub mod schema;
pub mod shutdown;
pub mod store;
pub mod watcher;
