//! Listing API request and response types

use crate::pagination::PageMetadata;
use serde::{Deserialize, Serialize};

/// Body of a listing response
///
/// Only the fields the relay reads are modelled; everything else the API
/// returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageListResponse {
    /// Images on this page
    #[serde(default)]
    pub items: Vec<ImageItem>,
    /// Pagination metadata
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

/// One image entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Direct URL of the image
    #[serde(default)]
    pub url: Option<String>,
}

impl ImageItem {
    /// Item with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Fixed query parameters sent with every listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    /// Items per page
    pub limit: u32,
    /// Sort order, e.g. `Most Reactions`
    pub sort: String,
    /// Time window, e.g. `Day`
    pub period: String,
    /// Include NSFW images
    pub nsfw: bool,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            sort: "Most Reactions".to_string(),
            period: "Day".to_string(),
            nsfw: false,
        }
    }
}

impl ListingQuery {
    /// Query parameters as name/value pairs
    pub fn params(&self) -> Vec<(String, String)> {
        vec![
            ("limit".to_string(), self.limit.to_string()),
            ("sort".to_string(), self.sort.clone()),
            ("period".to_string(), self.period.clone()),
            ("nsfw".to_string(), self.nsfw.to_string()),
        ]
    }
}
