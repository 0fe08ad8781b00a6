//! image-relay CLI
//!
//! Polls the listing API on an interval and relays one unseen image per cycle

use clap::Parser;
use image_relay::cli::{init_logging, log_startup_error, Cli, Runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let runner = match Runner::new(&cli) {
        Ok(runner) => runner,
        Err(e) => {
            log_startup_error(&e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(cli.verbose, runner.config().log_file.as_deref()) {
        log_startup_error(&e);
        std::process::exit(1);
    }

    if let Err(e) = runner.run().await {
        tracing::error!(error = %e, "Unexpected error, shutting down");
        std::process::exit(1);
    }
}
