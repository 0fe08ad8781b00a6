//! Execution engine module
//!
//! One fetch-and-forward cycle.
//!
//! # Overview
//!
//! The engine module provides:
//! - `CycleController` - runs a cycle: evict, fetch, pick one, forward
//! - `ImageSource` / `ImageSink` - the I/O seams the controller drives
//! - `CycleOutcome` / `CycleStats` - per-cycle result and running counters

mod types;

pub use types::{CycleOutcome, CycleStats, ImageSink, ImageSource};

use crate::config::RelayConfig;
use crate::error::Result;
use crate::fetch::ImageFetcher;
use crate::forward::Forwarder;
use crate::state::SeenSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{error, info, warn};

/// Orchestrates fetch-and-forward cycles
///
/// Owns the seen set. Each call to [`CycleController::process`] forwards at
/// most one URL, chosen uniformly at random from the fetched batch.
pub struct CycleController {
    source: Box<dyn ImageSource>,
    sink: Box<dyn ImageSink>,
    seen: SeenSet,
    rng: StdRng,
    stats: CycleStats,
}

impl CycleController {
    /// Create a controller over the given source and sink
    pub fn new(source: Box<dyn ImageSource>, sink: Box<dyn ImageSink>, seen: SeenSet) -> Self {
        Self {
            source,
            sink,
            seen,
            rng: StdRng::from_entropy(),
            stats: CycleStats::default(),
        }
    }

    /// Build the HTTP-backed controller described by `config`
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            Box::new(ImageFetcher::from_config(config)?),
            Box::new(Forwarder::from_config(config)?),
            SeenSet::new(config.seen_threshold, config.eviction),
        ))
    }

    /// Use a fixed random seed for the per-cycle pick
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// URLs forwarded so far (subject to eviction)
    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Running counters
    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    /// Run one cycle. Never fails; every problem is logged and reflected in
    /// the returned outcome.
    pub async fn process(&mut self) -> CycleOutcome {
        info!("Starting image fetch and send process");

        self.source.rearm();
        if self.seen.enforce_bound() > 0 {
            self.stats.evictions += 1;
        }

        let batch = self.source.fetch_batch(&self.seen).await;
        let Some(image_url) = batch.choose(&mut self.rng).cloned() else {
            warn!("No images found to process, waiting until next scheduled run");
            let outcome = CycleOutcome::NoImages;
            self.stats.record(&outcome);
            return outcome;
        };
        info!(url = %image_url, candidates = batch.len(), "Selected image for processing");

        let outcome = if self.sink.send(&image_url).await {
            self.seen.insert(image_url.clone());
            info!(url = %image_url, seen = self.seen.len(), "Process completed successfully");
            CycleOutcome::Forwarded(image_url)
        } else {
            error!(url = %image_url, "Process failed at the send step");
            CycleOutcome::ForwardFailed(image_url)
        };

        self.stats.record(&outcome);
        outcome
    }
}

impl std::fmt::Debug for CycleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleController")
            .field("seen", &self.seen.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
