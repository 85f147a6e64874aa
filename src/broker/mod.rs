//! Broker boundary
//!
//! The message broker is an external collaborator: this module defines only
//! the seams the watcher and consumer depend on. Partition assignment,
//! group rebalancing, and wire transport all live behind these traits in
//! whatever client implements them.
//!
//! # Design Principles
//!
//! - Connectivity failures are fatal to the calling loop and are never
//!   retried here; the owner restarts the failed unit
//! - Topic metadata is just an enumerable set of names
//! - A fetched message declares its own compression codec; no codec state
//!   is kept at the connection level

mod errors;
mod message;

pub use errors::{BrokerError, BrokerResult};
pub use message::{PartitionOffset, RawMessage, WireCodec};

use std::collections::BTreeSet;
use std::time::Duration;

/// Read access to the broker's current topic set.
///
/// Implementations refresh cluster metadata on every call; the watcher
/// compares successive snapshots.
pub trait TopicCatalog {
    /// Returns the current set of topic names.
    fn refresh(&mut self) -> BrokerResult<BTreeSet<String>>;
}

/// A joined, balanced group member's view of one topic.
///
/// Implementations own the group join, partition assignment, and the local
/// receive queue. `fetch` surfaces whatever the assignment currently yields;
/// `commit` durably records delivered offsets with the broker.
pub trait MessageSource {
    /// Fetches the next buffered message, waiting at most `timeout`.
    ///
    /// Returns `Ok(None)` when nothing arrived within the timeout.
    fn fetch(&mut self, timeout: Duration) -> BrokerResult<Option<RawMessage>>;

    /// Commits delivered offsets for this group member.
    fn commit(&mut self, offsets: &[PartitionOffset]) -> BrokerResult<()>;
}
