//! Broker boundary error types

use thiserror::Error;

/// Result type for broker operations
pub type BrokerResult<T> = Result<T, BrokerError>;

/// Errors surfaced by broker clients
#[derive(Debug, Clone, Error)]
pub enum BrokerError {
    /// Broker unreachable or the connection dropped mid-operation
    #[error("broker unreachable: {detail}")]
    Connectivity {
        /// Transport-level failure detail
        detail: String,
    },
}

impl BrokerError {
    /// Connectivity failure with the given detail.
    pub fn connectivity(detail: impl Into<String>) -> Self {
        Self::Connectivity {
            detail: detail.into(),
        }
    }
}
