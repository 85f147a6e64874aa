//! Observability subsystem
//!
//! Structured JSON logging plus a small counter registry. The logger is a
//! value handed to each long-running component rather than a process-wide
//! singleton, so tests and embedders can set their own severity floor per
//! unit.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Deterministic key ordering (event first, then fields alphabetically)
//! 3. Synchronous, no buffering
//! 4. Counters only; monotonic; reset on process start

mod logger;
mod metrics;

pub use logger::{Logger, Severity};
pub use metrics::IngestMetrics;
