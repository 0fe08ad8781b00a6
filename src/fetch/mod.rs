//! Fetch module
//!
//! Talks to the upstream image-listing API.
//!
//! # Overview
//!
//! - `ImageFetcher` - paginated listing client with dedup filtering
//! - `ListingQuery` - fixed query parameters (limit, sort, period, nsfw)
//! - `ImageListResponse` - the parts of the response body the relay reads

mod client;
mod types;

pub use client::ImageFetcher;
pub use types::{ImageItem, ImageListResponse, ListingQuery};
