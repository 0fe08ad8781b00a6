//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::RelayConfig;
use crate::engine::{CycleController, CycleOutcome};
use crate::error::{Error, Result};
use crate::fetch::ImageFetcher;
use crate::state::SeenSet;
use serde_json::json;
use tokio::time::MissedTickBehavior;
use tracing::info;

/// CLI runner
pub struct Runner {
    command: Commands,
    config: RelayConfig,
}

impl Runner {
    /// Resolve the configuration for a parsed command line
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => RelayConfig::from_file(path)?,
            None => RelayConfig::default(),
        };
        cli.apply_overrides(&mut config);
        config.validate()?;

        Ok(Self {
            command: cli.command,
            config,
        })
    }

    /// Resolved configuration
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.command {
            Commands::Run => self.run_forever().await,
            Commands::Once => self.once().await,
            Commands::Check => self.check().await,
            Commands::Config => self.print_config(),
        }
    }

    /// Process once immediately, then on every interval tick until Ctrl-C
    async fn run_forever(&self) -> Result<()> {
        let mut controller = CycleController::from_config(&self.config)?;

        info!(
            interval_secs = self.config.fetch_interval_secs,
            upstream = %self.config.upstream_url,
            downstream = %self.config.downstream_url,
            pagination = %self.config.pagination,
            "Relay started"
        );

        // The first tick completes immediately, giving the startup run.
        let mut interval = tokio::time::interval(self.config.fetch_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    controller.process().await;
                }
                result = &mut shutdown => {
                    result?;
                    info!("Relay stopped by user");
                    break;
                }
            }
        }

        let stats = controller.stats();
        info!(
            cycles = stats.cycles,
            forwarded = stats.forwarded,
            failed = stats.failed,
            empty = stats.empty,
            evictions = stats.evictions,
            "Relay summary"
        );
        Ok(())
    }

    async fn once(&self) -> Result<()> {
        let mut controller = CycleController::from_config(&self.config)?;
        let outcome = controller.process().await;

        let message = match &outcome {
            CycleOutcome::NoImages => json!({"outcome": "no_images"}),
            CycleOutcome::Forwarded(url) => json!({"outcome": "forwarded", "url": url}),
            CycleOutcome::ForwardFailed(url) => json!({"outcome": "forward_failed", "url": url}),
        };
        println!("{message}");
        Ok(())
    }

    async fn check(&self) -> Result<()> {
        let mut fetcher = ImageFetcher::from_config(&self.config)?;
        let batch = fetcher.fetch_batch(&SeenSet::default()).await;

        println!(
            "{}",
            json!({
                "upstream": self.config.upstream_url,
                "candidates": batch.len(),
                "sample": batch.first(),
            })
        );

        if batch.is_empty() {
            return Err(Error::Other(format!(
                "No images returned by {}",
                self.config.upstream_url
            )));
        }
        Ok(())
    }

    fn print_config(&self) -> Result<()> {
        print!("{}", self.config.to_yaml()?);
        Ok(())
    }
}
