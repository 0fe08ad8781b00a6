//! CLI commands and argument parsing

use crate::config::RelayConfig;
use crate::pagination::PaginationMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relay unseen images from a listing API to a downstream endpoint
#[derive(Parser, Debug)]
#[command(name = "image-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Listing API URL
    #[arg(long, global = true)]
    pub upstream: Option<String>,

    /// Downstream endpoint receiving `?URL=<image>`
    #[arg(long, global = true)]
    pub downstream: Option<String>,

    /// Include NSFW images in listings (`--nsfw` alone means true)
    #[arg(long, global = true, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub nsfw: Option<bool>,

    /// Seconds between cycles
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Pagination strategy
    #[arg(long, global = true)]
    pub pagination: Option<PaginationMode>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run a cycle now and then on every interval until Ctrl-C
    Run,

    /// Run a single cycle and exit
    Once,

    /// Fetch one batch from the listing API without forwarding
    Check,

    /// Print the resolved configuration
    Config,
}

impl Cli {
    /// Apply command-line values on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut RelayConfig) {
        if let Some(upstream) = &self.upstream {
            config.upstream_url.clone_from(upstream);
        }
        if let Some(downstream) = &self.downstream {
            config.downstream_url.clone_from(downstream);
        }
        if let Some(nsfw) = self.nsfw {
            config.include_nsfw = nsfw;
        }
        if let Some(interval) = self.interval {
            config.fetch_interval_secs = interval;
        }
        if let Some(mode) = self.pagination {
            config.pagination = mode;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}
