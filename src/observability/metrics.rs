//! Ingestion counter registry
//!
//! Counters only, monotonic, reset on process start. Relaxed ordering is
//! fine: counters are read for reporting, never for control flow.

use std::sync::atomic::{AtomicU64, Ordering};

/// Operational counters for the ingestion path.
///
/// Shared as an `Arc` between the consumer and whoever reports on it. The
/// decode-fault counter is the observable record of per-message codec
/// failures, which are dropped rather than terminating the stream.
#[derive(Debug, Default)]
pub struct IngestMetrics {
    /// Messages decoded and handed to a sink
    messages_delivered: AtomicU64,
    /// Messages dropped because their declared codec failed to decode
    decode_faults: AtomicU64,
    /// Offset-commit batches sent to the broker
    offset_commits: AtomicU64,
    /// Topic-set cardinality changes observed by the watcher
    topic_changes: AtomicU64,
}

impl IngestMetrics {
    /// Creates a registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment delivered messages
    pub fn increment_delivered(&self) {
        self.messages_delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment decode faults
    pub fn increment_decode_faults(&self) {
        self.decode_faults.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment offset commits
    pub fn increment_offset_commits(&self) {
        self.offset_commits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment observed topic changes
    pub fn increment_topic_changes(&self) {
        self.topic_changes.fetch_add(1, Ordering::Relaxed);
    }

    /// Messages delivered so far
    pub fn messages_delivered(&self) -> u64 {
        self.messages_delivered.load(Ordering::Relaxed)
    }

    /// Decode faults so far
    pub fn decode_faults(&self) -> u64 {
        self.decode_faults.load(Ordering::Relaxed)
    }

    /// Offset-commit batches so far
    pub fn offset_commits(&self) -> u64 {
        self.offset_commits.load(Ordering::Relaxed)
    }

    /// Topic changes so far
    pub fn topic_changes(&self) -> u64 {
        self.topic_changes.load(Ordering::Relaxed)
    }
}
