//! Consumer error types
//!
//! Only loop-fatal conditions live here. Per-message decode faults are a
//! [`CodecError`](super::codec::CodecError) handled inside the loop: the
//! message is dropped and counted, the stream keeps going.

use std::io;

use thiserror::Error;

use crate::broker::BrokerError;

/// Result type for consumer operations
pub type ConsumerResult<T> = Result<T, ConsumerError>;

/// Conditions that end a consumption loop
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// The broker connection failed
    #[error(transparent)]
    Broker(#[from] BrokerError),

    /// The downstream sink refused a delivery
    #[error("sink delivery failed: {0}")]
    Sink(#[from] io::Error),
}
