//! Balanced ingest consumer
//!
//! Binds to exactly one topic under a named consumer group and turns the
//! broker's compressed wire messages into token-stamped payloads for a
//! downstream sink. Partition assignment and group rebalancing are wholly
//! delegated to the [`MessageSource`](crate::broker::MessageSource)
//! implementation; this component acquires no locks.
//!
//! # Delivery semantics
//!
//! Offsets are committed on a fixed cadence, not per message, so delivery is
//! at-least-once: a crash between delivery and the next commit replays up to
//! one interval's worth of messages on restart.
//!
//! # Decode faults
//!
//! A message whose declared codec fails to decode is dropped and counted;
//! it never terminates the consumption loop and is never decoded with a
//! substitute codec.

pub mod codec;
mod errors;
mod offsets;
mod sink;

pub use errors::{ConsumerError, ConsumerResult};
pub use offsets::OffsetTracker;
pub use sink::{MessageSink, StdoutSink};

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::broker::{MessageSource, RawMessage};
use crate::config::ConfigError;
use crate::observability::{IngestMetrics, Logger};
use crate::shutdown::CancelToken;

/// Runtime binding for one consumer instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    /// Consumer group identifier. Per-deployment configuration; there is no
    /// built-in default, a shared literal would collide across deployments.
    pub group_id: String,
    /// The single topic this consumer binds to
    pub topic: String,
    /// Fetcher threads the source should run for this member. Advisory to
    /// the [`MessageSource`](crate::broker::MessageSource) implementation,
    /// which reads it at join time; the consumer itself runs a single loop
    /// either way.
    pub fetcher_count: u32,
    /// How often delivered offsets are committed
    pub commit_interval: Duration,
    /// Receive-buffer bound, also the per-call drain cap of
    /// [`IngestConsumer::consume`]
    pub queued_max_messages: usize,
    /// Fetch wait used by the streaming mode
    pub fetch_timeout: Duration,
}

impl ConsumerConfig {
    /// Creates a config with the reference cadence values: one fetcher,
    /// 60 second commit interval, 2000 queued messages, 1 ms fetch timeout.
    pub fn new(group_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            topic: topic.into(),
            fetcher_count: 1,
            commit_interval: Duration::from_secs(60),
            queued_max_messages: 2000,
            fetch_timeout: Duration::from_millis(1),
        }
    }

    /// Rejects bindings that cannot identify themselves to the broker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_id.is_empty() {
            return Err(ConfigError::MissingGroupId);
        }
        if self.topic.is_empty() {
            return Err(ConfigError::MissingTopic);
        }
        Ok(())
    }
}

/// A decoded message stamped with the bound schema's token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedMessage {
    /// Token of the schema this consumer is bound to
    pub stream_token: Uuid,
    /// Topic the message arrived on
    pub topic: String,
    /// Partition within the topic
    pub partition: u32,
    /// Offset within the partition
    pub offset: i64,
    /// Decompressed payload bytes
    pub payload: Vec<u8>,
}

/// Balanced consumer for one topic under one group.
#[derive(Debug)]
pub struct IngestConsumer<S: MessageSource> {
    source: S,
    config: ConsumerConfig,
    stream_token: Uuid,
    offsets: OffsetTracker,
    logger: Logger,
    metrics: Arc<IngestMetrics>,
}

impl<S: MessageSource> IngestConsumer<S> {
    /// Binds a consumer to a schema token over an already-joined source.
    ///
    /// The token is read once, here; each delivered message carries it.
    pub fn bind(
        stream_token: Uuid,
        config: ConsumerConfig,
        source: S,
        logger: Logger,
        metrics: Arc<IngestMetrics>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let offsets = OffsetTracker::new(config.commit_interval);
        Ok(Self {
            source,
            config,
            stream_token,
            offsets,
            logger,
            metrics,
        })
    }

    /// The bound configuration.
    pub fn config(&self) -> &ConsumerConfig {
        &self.config
    }

    /// Counters shared with this consumer.
    pub fn metrics(&self) -> &Arc<IngestMetrics> {
        &self.metrics
    }

    /// Streaming mode: fetch, decode, and deliver until cancelled.
    ///
    /// Suspends only while waiting on the next broker fetch. Each decoded
    /// message goes to `sink` synchronously; decode faults are counted and
    /// skipped. Pending offsets are committed on the configured cadence and
    /// once more on graceful stop. Broker and sink failures end the loop
    /// with the error.
    pub fn listen(
        &mut self,
        sink: &mut dyn MessageSink,
        cancel: &CancelToken,
    ) -> ConsumerResult<()> {
        self.logger.info(
            "LISTEN_BEGIN",
            &[
                ("group", self.config.group_id.as_str()),
                ("topic", self.config.topic.as_str()),
            ],
        );

        while !cancel.is_cancelled() {
            if let Some(raw) = self.source.fetch(self.config.fetch_timeout)? {
                if let Some(message) = self.decode_and_stamp(raw) {
                    sink.deliver(&message)?;
                    self.metrics.increment_delivered();
                }
            }
            self.commit_if_due()?;
        }

        // Graceful stop: do not leave the last interval's deliveries
        // uncommitted.
        self.commit_pending()?;
        self.logger.info("LISTEN_CANCELLED", &[]);
        Ok(())
    }

    /// Batch mode: returns whatever the source has buffered right now.
    ///
    /// Drains up to `queued_max_messages` without ever waiting for new
    /// arrivals; an empty batch means nothing was buffered.
    pub fn consume(&mut self) -> ConsumerResult<Vec<StampedMessage>> {
        let mut batch = Vec::new();
        while batch.len() < self.config.queued_max_messages {
            match self.source.fetch(Duration::ZERO)? {
                Some(raw) => {
                    if let Some(message) = self.decode_and_stamp(raw) {
                        batch.push(message);
                    }
                }
                None => break,
            }
        }
        self.commit_if_due()?;
        Ok(batch)
    }

    /// Decodes one raw message per its declared codec and stamps the token.
    ///
    /// Records the offset whether or not decoding succeeds, so a poison
    /// message is not redelivered forever after a restart.
    fn decode_and_stamp(&mut self, raw: RawMessage) -> Option<StampedMessage> {
        self.offsets.record(&raw.topic, raw.partition, raw.offset);
        match codec::decode(raw.codec, &raw.payload) {
            Ok(payload) => Some(StampedMessage {
                stream_token: self.stream_token,
                topic: raw.topic,
                partition: raw.partition,
                offset: raw.offset,
                payload,
            }),
            Err(fault) => {
                self.metrics.increment_decode_faults();
                self.logger.error(
                    "DECODE_FAULT",
                    &[
                        ("topic", raw.topic.as_str()),
                        ("partition", &raw.partition.to_string()),
                        ("offset", &raw.offset.to_string()),
                        ("detail", &fault.to_string()),
                    ],
                );
                None
            }
        }
    }

    /// Commits pending offsets when the cadence interval has elapsed.
    fn commit_if_due(&mut self) -> ConsumerResult<()> {
        if self.offsets.due() {
            self.commit_pending()?;
        }
        Ok(())
    }

    /// Commits whatever offsets are pending, if any.
    fn commit_pending(&mut self) -> ConsumerResult<()> {
        let pending = self.offsets.take_pending();
        if pending.is_empty() {
            return Ok(());
        }
        self.source.commit(&pending)?;
        self.metrics.increment_offset_commits();
        self.logger
            .trace("OFFSETS_COMMITTED", &[("partitions", &pending.len().to_string())]);
        Ok(())
    }
}
