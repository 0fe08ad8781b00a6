//! CLI module
//!
//! Command-line interface and scheduler for the relay.
//!
//! # Commands
//!
//! - `run` - Process now, then on every interval until Ctrl-C
//! - `once` - Run a single cycle
//! - `check` - Fetch one batch from the listing API without forwarding
//! - `config` - Print the resolved configuration

mod commands;
mod logging;
mod runner;

pub use commands::{Cli, Commands};
pub use logging::{init_logging, log_startup_error};
pub use runner::Runner;
