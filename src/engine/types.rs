//! Engine types
//!
//! Seams between the cycle controller and its I/O, plus cycle results.

use crate::state::SeenSet;
use crate::types::ImageUrl;
use async_trait::async_trait;

/// Source of candidate image URLs
#[async_trait]
pub trait ImageSource: Send {
    /// Fetch the next batch of URLs not contained in `seen`
    async fn fetch_batch(&mut self, seen: &SeenSet) -> Vec<ImageUrl>;

    /// Called at the start of every cycle
    fn rearm(&mut self) {}
}

/// Receiver of the selected image URL
#[async_trait]
pub trait ImageSink: Send + Sync {
    /// Deliver one URL; `false` when delivery failed
    async fn send(&self, image_url: &str) -> bool;
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No unseen images were available
    NoImages,
    /// The URL was delivered and recorded as seen
    Forwarded(ImageUrl),
    /// Delivery of the URL failed
    ForwardFailed(ImageUrl),
}

impl CycleOutcome {
    /// URL that was selected this cycle, if any
    pub fn selected(&self) -> Option<&str> {
        match self {
            Self::NoImages => None,
            Self::Forwarded(url) | Self::ForwardFailed(url) => Some(url),
        }
    }

    /// Whether a URL was delivered
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded(_))
    }
}

/// Counters accumulated across cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Cycles run
    pub cycles: u64,
    /// URLs delivered
    pub forwarded: u64,
    /// Deliveries that failed
    pub failed: u64,
    /// Cycles without any unseen image
    pub empty: u64,
    /// Times the seen set was evicted
    pub evictions: u64,
}

impl CycleStats {
    /// Count an outcome
    pub fn record(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        match outcome {
            CycleOutcome::NoImages => self.empty += 1,
            CycleOutcome::Forwarded(_) => self.forwarded += 1,
            CycleOutcome::ForwardFailed(_) => self.failed += 1,
        }
    }
}
