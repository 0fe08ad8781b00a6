//! Tests for the cycle controller

use super::*;
use crate::state::EvictionPolicy;
use crate::types::ImageUrl;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Serves scripted pages, filtering against the seen set like the real fetcher
#[derive(Default)]
struct ScriptedSource {
    pages: VecDeque<Vec<String>>,
    repeat_last: bool,
    seen_sizes: Arc<Mutex<Vec<usize>>>,
    rearms: Arc<Mutex<u32>>,
}

impl ScriptedSource {
    fn scripted(pages: &[&[&str]]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|page| page.iter().map(|url| (*url).to_string()).collect())
                .collect(),
            ..Self::default()
        }
    }

    fn repeating(page: &[&str]) -> Self {
        Self {
            repeat_last: true,
            ..Self::scripted(&[page])
        }
    }
}

#[async_trait]
impl ImageSource for ScriptedSource {
    async fn fetch_batch(&mut self, seen: &SeenSet) -> Vec<ImageUrl> {
        self.seen_sizes.lock().unwrap().push(seen.len());
        let page = if self.repeat_last && self.pages.len() == 1 {
            self.pages.front().cloned().unwrap_or_default()
        } else {
            self.pages.pop_front().unwrap_or_default()
        };
        page.into_iter().filter(|url| !seen.contains(url)).collect()
    }

    fn rearm(&mut self) {
        *self.rearms.lock().unwrap() += 1;
    }
}

#[derive(Clone)]
struct RecordingSink {
    succeed: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn new(succeed: bool) -> Self {
        Self {
            succeed,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSink for RecordingSink {
    async fn send(&self, image_url: &str) -> bool {
        self.sent.lock().unwrap().push(image_url.to_string());
        self.succeed
    }
}

fn controller(source: ScriptedSource, sink: RecordingSink, seen: SeenSet) -> CycleController {
    CycleController::new(Box::new(source), Box::new(sink), seen).with_seed(7)
}

#[tokio::test]
async fn test_forwards_one_url_from_batch_and_records_it() {
    let sink = RecordingSink::new(true);
    let mut relay = controller(
        ScriptedSource::repeating(&["a", "b"]),
        sink.clone(),
        SeenSet::default(),
    );

    let outcome = relay.process().await;

    let picked = outcome.selected().unwrap().to_string();
    assert!(picked == "a" || picked == "b");
    assert!(outcome.is_forwarded());
    assert_eq!(sink.sent(), vec![picked.clone()]);
    assert_eq!(relay.seen().len(), 1);
    assert!(relay.seen().contains(&picked));
}

#[tokio::test]
async fn test_seen_url_is_not_picked_again() {
    let sink = RecordingSink::new(true);
    let mut relay = controller(
        ScriptedSource::repeating(&["a", "b"]),
        sink.clone(),
        SeenSet::default(),
    );

    relay.process().await;
    relay.process().await;
    let third = relay.process().await;

    let mut sent = sink.sent();
    sent.sort();
    assert_eq!(sent, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(third, CycleOutcome::NoImages);
}

#[tokio::test]
async fn test_empty_batch_skips_forwarder() {
    let sink = RecordingSink::new(true);
    let mut seen = SeenSet::default();
    seen.insert("a");
    let mut relay = controller(ScriptedSource::repeating(&["a"]), sink.clone(), seen);

    assert_eq!(relay.process().await, CycleOutcome::NoImages);
    assert!(sink.sent().is_empty());
    assert_eq!(relay.stats().empty, 1);
}

#[tokio::test]
async fn test_failed_forward_is_not_recorded() {
    let sink = RecordingSink::new(false);
    let mut relay = controller(
        ScriptedSource::repeating(&["a"]),
        sink.clone(),
        SeenSet::default(),
    );

    assert_eq!(
        relay.process().await,
        CycleOutcome::ForwardFailed("a".to_string())
    );
    assert!(relay.seen().is_empty());

    // the same URL stays eligible for the next cycle
    assert_eq!(
        relay.process().await,
        CycleOutcome::ForwardFailed("a".to_string())
    );
    assert_eq!(sink.sent().len(), 2);
}

#[tokio::test]
async fn test_at_most_one_forward_per_cycle() {
    let sink = RecordingSink::new(true);
    let mut relay = controller(
        ScriptedSource::repeating(&["a", "b", "c", "d", "e"]),
        sink.clone(),
        SeenSet::default(),
    );

    for cycle in 1..=3 {
        relay.process().await;
        assert_eq!(sink.sent().len(), cycle);
    }
}

#[tokio::test]
async fn test_seen_set_cleared_at_cycle_start_once_over_threshold() {
    let source = ScriptedSource::scripted(&[&["a"], &["b"], &["c"], &["a"]]);
    let seen_sizes = Arc::clone(&source.seen_sizes);
    let sink = RecordingSink::new(true);
    let mut relay = controller(source, sink.clone(), SeenSet::new(2, EvictionPolicy::Clear));

    for _ in 0..4 {
        relay.process().await;
    }

    // three forwards push the set to 3 > 2, so the fourth cycle starts empty
    assert_eq!(*seen_sizes.lock().unwrap(), vec![0, 1, 2, 0]);
    assert_eq!(sink.sent(), vec!["a", "b", "c", "a"]);
    assert_eq!(relay.stats().evictions, 1);
}

#[tokio::test]
async fn test_seen_size_never_exceeds_threshold_at_cycle_start() {
    let source = ScriptedSource {
        pages: (0..50).map(|i| vec![format!("u{i}")]).collect(),
        ..ScriptedSource::default()
    };
    let seen_sizes = Arc::clone(&source.seen_sizes);
    let mut relay = controller(
        source,
        RecordingSink::new(true),
        SeenSet::new(10, EvictionPolicy::Clear),
    );

    for _ in 0..50 {
        relay.process().await;
    }

    assert!(seen_sizes.lock().unwrap().iter().all(|size| *size <= 10));
}

#[tokio::test]
async fn test_rearm_called_every_cycle() {
    let source = ScriptedSource::repeating(&[]);
    let rearms = Arc::clone(&source.rearms);
    let mut relay = controller(source, RecordingSink::new(true), SeenSet::default());

    relay.process().await;
    relay.process().await;

    assert_eq!(*rearms.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_stats_accumulate() {
    let source = ScriptedSource::scripted(&[&["a"], &[], &["b"]]);
    let mut relay = controller(source, RecordingSink::new(true), SeenSet::default());

    for _ in 0..3 {
        relay.process().await;
    }

    assert_eq!(
        relay.stats(),
        CycleStats {
            cycles: 3,
            forwarded: 2,
            failed: 0,
            empty: 1,
            evictions: 0,
        }
    );
}

#[test]
fn test_outcome_helpers() {
    assert_eq!(CycleOutcome::NoImages.selected(), None);
    assert_eq!(
        CycleOutcome::ForwardFailed("x".into()).selected(),
        Some("x")
    );
    assert!(!CycleOutcome::ForwardFailed("x".into()).is_forwarded());
}
