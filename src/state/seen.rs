//! Bounded set of forwarded URLs
//!
//! Only guards against forwarding the same image twice in a row of cycles.
//! Losing entries on eviction is acceptable: a URL may be forwarded again
//! after the set was cleared.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::info;

/// Default number of URLs kept before eviction
pub const DEFAULT_SEEN_THRESHOLD: usize = 1000;

/// What happens once the set grows past its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Drop everything at once when the threshold is exceeded
    #[default]
    Clear,
    /// Drop the oldest entries so at most `threshold` remain
    Fifo,
}

/// Set of previously forwarded URLs
#[derive(Debug, Clone)]
pub struct SeenSet {
    urls: HashSet<String>,
    order: VecDeque<String>,
    threshold: usize,
    policy: EvictionPolicy,
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEEN_THRESHOLD, EvictionPolicy::Clear)
    }
}

impl SeenSet {
    /// Create an empty set
    pub fn new(threshold: usize, policy: EvictionPolicy) -> Self {
        Self {
            urls: HashSet::new(),
            order: VecDeque::new(),
            threshold,
            policy,
        }
    }

    /// Whether the URL was already forwarded
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Record a forwarded URL. Returns `false` if it was already present.
    ///
    /// In FIFO mode the oldest entry is dropped as soon as the bound is
    /// exceeded; in clear mode growth is checked by [`SeenSet::enforce_bound`].
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if !self.urls.insert(url.clone()) {
            return false;
        }
        self.order.push_back(url);

        if self.policy == EvictionPolicy::Fifo {
            self.trim_oldest();
        }
        true
    }

    /// Number of URLs held
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.urls.clear();
        self.order.clear();
    }

    /// Evict if the set grew past its threshold. Returns the number of URLs removed.
    pub fn enforce_bound(&mut self) -> usize {
        if self.urls.len() <= self.threshold {
            return 0;
        }

        let before = self.urls.len();
        match self.policy {
            EvictionPolicy::Clear => {
                info!(size = before, "Clearing processed URLs cache");
                self.clear();
            }
            EvictionPolicy::Fifo => self.trim_oldest(),
        }
        before - self.urls.len()
    }

    fn trim_oldest(&mut self) {
        while self.urls.len() > self.threshold {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.urls.remove(&oldest);
                }
                None => break,
            }
        }
    }
}
