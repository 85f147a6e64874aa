//! Wire-level message records
//!
//! A fetched message arrives still compressed, tagged with the codec the
//! producer declared for it. Decoding happens on the consumer side, per
//! message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compression codec declared on a wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireCodec {
    /// Raw snappy block
    Snappy,
    /// RFC 1952 gzip stream
    Gzip,
    /// Size-prepended LZ4 block, the legacy broker framing
    Lz4Legacy,
}

impl fmt::Display for WireCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snappy => write!(f, "snappy"),
            Self::Gzip => write!(f, "gzip"),
            Self::Lz4Legacy => write!(f, "lz4_legacy"),
        }
    }
}

/// One message as fetched from the broker, payload still compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Topic the message was fetched from
    pub topic: String,
    /// Partition within the topic
    pub partition: u32,
    /// Offset within the partition
    pub offset: i64,
    /// Codec the producer declared for the payload
    pub codec: WireCodec,
    /// Compressed payload bytes
    pub payload: Vec<u8>,
}

/// A delivered position to commit for one partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOffset {
    /// Topic name
    pub topic: String,
    /// Partition within the topic
    pub partition: u32,
    /// Highest delivered offset
    pub offset: i64,
}
