//! Logging setup
//!
//! Console output always; an optional plain-text file layer mirrors it.
//! Errors raised before the global subscriber exists go through a scoped
//! stderr subscriber instead.

use crate::error::{Error, Result, ResultExt};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Call once at startup.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logging: {e}")))
}

/// Log an error that stops the relay before [`init_logging`] ran
pub fn log_startup_error(err: &Error) {
    log_startup_error_to(err, std::io::stderr);
}

fn log_startup_error_to<W>(err: &Error, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let subscriber = fmt()
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(error = %err, "Failed to start relay");
    });
}
