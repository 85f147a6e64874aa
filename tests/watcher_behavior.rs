//! Topic watcher behavior tests
//!
//! - A cardinality change fires the callback exactly once, then polling
//!   resumes
//! - A membership swap at the same cardinality fires nothing
//! - A refresh failure ends the watch with the error
//! - Cancellation ends the watch cleanly

use std::collections::BTreeSet;
use std::sync::Arc;

use streamgate::broker::{BrokerError, BrokerResult, TopicCatalog};
use streamgate::observability::{IngestMetrics, Logger};
use streamgate::shutdown::CancelToken;
use streamgate::watcher::TopicWatcher;

// =============================================================================
// Helper Functions
// =============================================================================

fn topics(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Serves a fixed script of topic sets, cancelling the watch once the last
/// entry has been served so the delay-free loop terminates in tests.
struct ScriptedCatalog {
    script: Vec<BTreeSet<String>>,
    next: usize,
    cancel: CancelToken,
}

impl ScriptedCatalog {
    fn new(script: Vec<BTreeSet<String>>, cancel: CancelToken) -> Self {
        Self {
            script,
            next: 0,
            cancel,
        }
    }
}

impl TopicCatalog for ScriptedCatalog {
    fn refresh(&mut self) -> BrokerResult<BTreeSet<String>> {
        let index = self.next.min(self.script.len() - 1);
        self.next += 1;
        if self.next >= self.script.len() {
            self.cancel.cancel();
        }
        Ok(self.script[index].clone())
    }
}

/// Succeeds once for the baseline, then fails every refresh.
struct FlakyCatalog {
    served_baseline: bool,
}

impl TopicCatalog for FlakyCatalog {
    fn refresh(&mut self) -> BrokerResult<BTreeSet<String>> {
        if !self.served_baseline {
            self.served_baseline = true;
            return Ok(topics(&["a", "b"]));
        }
        Err(BrokerError::connectivity("metadata refresh refused"))
    }
}

fn watcher<C: TopicCatalog>(catalog: C) -> (TopicWatcher<C>, Arc<IngestMetrics>) {
    let metrics = Arc::new(IngestMetrics::new());
    let w = TopicWatcher::new(catalog, Logger::disabled(), Arc::clone(&metrics));
    (w, metrics)
}

// =============================================================================
// Cardinality-change detection
// =============================================================================

#[test]
fn test_topic_added_fires_exactly_once() {
    let cancel = CancelToken::new();
    let catalog = ScriptedCatalog::new(
        vec![
            topics(&["a", "b"]), // baseline
            topics(&["a", "b"]),
            topics(&["a", "b", "c"]),
        ],
        cancel.clone(),
    );
    let (mut watcher, metrics) = watcher(catalog);

    let mut fired = Vec::new();
    watcher.run(&cancel, |count| fired.push(count)).unwrap();

    assert_eq!(fired, vec![3]);
    assert_eq!(metrics.topic_changes(), 1);
}

#[test]
fn test_topic_removed_fires_exactly_once() {
    let cancel = CancelToken::new();
    let catalog = ScriptedCatalog::new(
        vec![topics(&["a", "b", "c"]), topics(&["a", "b"])],
        cancel.clone(),
    );
    let (mut watcher, _metrics) = watcher(catalog);

    let mut fired = Vec::new();
    watcher.run(&cancel, |count| fired.push(count)).unwrap();

    assert_eq!(fired, vec![2]);
}

#[test]
fn test_membership_swap_at_same_cardinality_is_missed() {
    // Cardinality-only detection: {a,b} -> {c,d} keeps the count at 2 and
    // is deliberately not reported.
    let cancel = CancelToken::new();
    let catalog = ScriptedCatalog::new(
        vec![topics(&["a", "b"]), topics(&["c", "d"]), topics(&["c", "d"])],
        cancel.clone(),
    );
    let (mut watcher, metrics) = watcher(catalog);

    let mut fired = Vec::new();
    watcher.run(&cancel, |count| fired.push(count)).unwrap();

    assert!(fired.is_empty());
    assert_eq!(metrics.topic_changes(), 0);
}

#[test]
fn test_polling_resumes_after_a_change() {
    let cancel = CancelToken::new();
    let catalog = ScriptedCatalog::new(
        vec![
            topics(&["a"]),
            topics(&["a", "b"]),
            topics(&["a", "b"]),
            topics(&["a", "b", "c"]),
        ],
        cancel.clone(),
    );
    let (mut watcher, _metrics) = watcher(catalog);

    let mut fired = Vec::new();
    watcher.run(&cancel, |count| fired.push(count)).unwrap();

    assert_eq!(fired, vec![2, 3]);
}

// =============================================================================
// Failure and cancellation
// =============================================================================

#[test]
fn test_refresh_failure_ends_the_watch() {
    let cancel = CancelToken::new();
    let (mut watcher, metrics) = watcher(FlakyCatalog {
        served_baseline: false,
    });

    let mut fired = 0usize;
    let err = watcher.run(&cancel, |_| fired += 1).unwrap_err();

    assert!(matches!(err, BrokerError::Connectivity { .. }));
    assert_eq!(fired, 0);
    assert_eq!(metrics.topic_changes(), 0);
}

#[test]
fn test_pre_cancelled_watch_exits_cleanly() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let catalog = ScriptedCatalog::new(vec![topics(&["a"])], cancel.clone());
    let (mut watcher, _metrics) = watcher(catalog);

    let mut fired = 0usize;
    watcher.run(&cancel, |_| fired += 1).unwrap();
    assert_eq!(fired, 0);
}
