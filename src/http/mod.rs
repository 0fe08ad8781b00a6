//! HTTP client module
//!
//! Provides the HTTP client shared by the fetcher and the forwarder.
//!
//! # Features
//!
//! - **Automatic Retries**: fixed attempt count and fixed delay, every failure retried
//! - **Rate Limiting**: optional token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, HttpResponse, RequestConfig,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
