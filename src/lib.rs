//! # image-relay
//!
//! Polls a paginated image-listing API, keeps track of which image URLs were
//! already delivered, and forwards one new image per cycle to a downstream
//! HTTP endpoint.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use image_relay::{config::RelayConfig, engine::CycleController, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = RelayConfig::from_file("relay.yaml")?;
//!     let mut controller = CycleController::from_config(&config)?;
//!
//!     let mut interval = tokio::time::interval(config.fetch_interval());
//!     loop {
//!         interval.tick().await;
//!         controller.process().await;
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CycleController                       │
//! │   rearm → evict seen → fetch_batch → pick one → send     │
//! └──────────────────────────────────────────────────────────┘
//!                │                               │
//! ┌──────────────┴──────────────┐   ┌────────────┴───────────┐
//! │  ImageFetcher               │   │  Forwarder             │
//! │  Paginator (cursor | page)  │   │  GET ?URL=<image>      │
//! │  SeenSet filter             │   │                        │
//! └──────────────┬──────────────┘   └────────────┬───────────┘
//!                └──────────── HttpClient ───────┘
//!                     retry · fixed delay · rate limit
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination strategies
pub mod pagination;

/// In-memory relay state
pub mod state;

/// Listing API client
pub mod fetch;

/// Downstream forwarder
pub mod forward;

/// Cycle orchestration
pub mod engine;

/// Relay configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
