//! Offset-commit cadence
//!
//! Delivered offsets are committed on a fixed interval, decoupled from
//! message delivery. The tracker keeps the highest delivered offset per
//! (topic, partition) and hands over a drained, deterministic batch when a
//! commit is due.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::broker::PartitionOffset;

/// Tracks delivered offsets and gates commits by elapsed time.
#[derive(Debug)]
pub struct OffsetTracker {
    interval: Duration,
    last_commit: Instant,
    pending: HashMap<(String, u32), i64>,
}

impl OffsetTracker {
    /// Creates a tracker that makes a commit due every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_commit: Instant::now(),
            pending: HashMap::new(),
        }
    }

    /// Records a delivered offset, keeping the highest per partition.
    pub fn record(&mut self, topic: &str, partition: u32, offset: i64) {
        self.pending
            .entry((topic.to_string(), partition))
            .and_modify(|o| *o = (*o).max(offset))
            .or_insert(offset);
    }

    /// True when there is something to commit and the interval has elapsed.
    pub fn due(&self) -> bool {
        !self.pending.is_empty() && self.last_commit.elapsed() >= self.interval
    }

    /// Drains pending offsets as a sorted batch and restarts the interval.
    pub fn take_pending(&mut self) -> Vec<PartitionOffset> {
        let mut batch: Vec<PartitionOffset> = self
            .pending
            .drain()
            .map(|((topic, partition), offset)| PartitionOffset {
                topic,
                partition,
                offset,
            })
            .collect();
        batch.sort_by(|a, b| (&a.topic, a.partition).cmp(&(&b.topic, b.partition)));
        self.last_commit = Instant::now();
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_highest_offset_per_partition() {
        let mut tracker = OffsetTracker::new(Duration::ZERO);
        tracker.record("t", 0, 5);
        tracker.record("t", 0, 3);
        tracker.record("t", 1, 9);
        let batch = tracker.take_pending();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].offset, 5);
        assert_eq!(batch[1].offset, 9);
    }

    #[test]
    fn test_not_due_when_empty() {
        let tracker = OffsetTracker::new(Duration::ZERO);
        assert!(!tracker.due());
    }

    #[test]
    fn test_due_after_interval_with_pending() {
        let mut tracker = OffsetTracker::new(Duration::ZERO);
        tracker.record("t", 0, 1);
        assert!(tracker.due());
        tracker.take_pending();
        assert!(!tracker.due());
    }

    #[test]
    fn test_long_interval_defers_commit() {
        let mut tracker = OffsetTracker::new(Duration::from_secs(3600));
        tracker.record("t", 0, 1);
        assert!(!tracker.due());
    }
}
