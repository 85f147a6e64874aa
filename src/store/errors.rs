//! Store boundary error types

use thiserror::Error;

use super::{StoreId, StorePartition};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the schema store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document under the id in the named partition
    #[error("no document {id} in partition '{partition}'")]
    NotFound {
        /// The id that missed
        id: StoreId,
        /// Partition that was searched
        partition: StorePartition,
    },

    /// A snapshot failed to (de)serialize
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
