//! Listing API client
//!
//! Drives the paginator against the upstream API and turns each response
//! into a batch of URLs not yet forwarded.

use super::types::{ImageListResponse, ListingQuery};
use crate::config::RelayConfig;
use crate::engine::ImageSource;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{PaginationState, Paginator};
use crate::state::SeenSet;
use crate::types::ImageUrl;
use async_trait::async_trait;
use tracing::{error, info, warn};

/// Fetches batches of unseen image URLs
#[derive(Debug)]
pub struct ImageFetcher {
    client: HttpClient,
    url: String,
    query: ListingQuery,
    paginator: Box<dyn Paginator>,
}

impl ImageFetcher {
    /// Create a fetcher for the given endpoint
    pub fn new(
        client: HttpClient,
        url: impl Into<String>,
        query: ListingQuery,
        paginator: Box<dyn Paginator>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            query,
            paginator,
        }
    }

    /// Create a fetcher from the relay configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let query = ListingQuery {
            limit: config.batch_size,
            sort: config.sort.clone(),
            period: config.period.clone(),
            nsfw: config.include_nsfw,
        };
        Ok(Self::new(
            HttpClient::with_config(config.http_config())?,
            &config.upstream_url,
            query,
            config.pagination.paginator(),
        ))
    }

    /// Current pagination position
    pub fn pagination(&self) -> PaginationState {
        self.paginator.state()
    }

    /// Whether the last response ended the stream
    pub fn is_exhausted(&self) -> bool {
        self.paginator.is_exhausted()
    }

    /// Request for the current position
    pub fn build_request(&self) -> RequestConfig {
        self.query
            .params()
            .into_iter()
            .chain(self.paginator.query_params())
            .fold(RequestConfig::new(), |req, (key, value)| req.query(key, value))
    }

    /// Fetch one page and return the URLs not in `seen`.
    ///
    /// Never fails: exhausted retries and malformed bodies both yield an
    /// empty batch. A body cut off in transit is retried like any other
    /// network failure and leaves the position alone; only a complete body
    /// that is not a listing resets the pagination position.
    pub async fn fetch_batch(&mut self, seen: &SeenSet) -> Vec<ImageUrl> {
        match self.paginator.state() {
            PaginationState::Cursor {
                next_cursor: Some(cursor),
            } => info!(cursor = %cursor, "Using cursor"),
            PaginationState::Cursor { next_cursor: None } => {
                info!("Starting from the beginning (no cursor)");
            }
            PaginationState::PageNumber { current_page, .. } => {
                info!(page = current_page, "Fetching page");
            }
        }

        let response = match self
            .client
            .get_with_config(&self.url, self.build_request())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(
                    url = %self.url,
                    attempts = self.client.config().max_retries,
                    error = %e,
                    "Failed to fetch images"
                );
                return Vec::new();
            }
        };

        match response.json::<ImageListResponse>() {
            Ok(body) => self.accept(body, seen),
            Err(e) => {
                warn!(url = %self.url, error = %e, "Malformed listing response, resetting pagination");
                self.paginator.reset();
                Vec::new()
            }
        }
    }

    /// Apply a decoded response to the pagination state and filter its items
    pub fn accept(&mut self, body: ImageListResponse, seen: &SeenSet) -> Vec<ImageUrl> {
        if body.items.is_empty() {
            warn!("No images found in the API response, resetting pagination");
            self.paginator.reset();
            return Vec::new();
        }

        self.paginator.advance(body.metadata.as_ref());

        let total = body.items.len();
        let urls: Vec<ImageUrl> = body
            .items
            .into_iter()
            .filter_map(|item| item.url)
            .filter(|url| !url.is_empty() && !seen.contains(url))
            .collect();

        if urls.is_empty() {
            warn!(received = total, "No new images found in this batch");
        } else {
            info!(received = total, new = urls.len(), "Found new images in this batch");
        }
        urls
    }

    /// Prepare the paginator for a new cycle
    pub fn rearm(&mut self) {
        self.paginator.rearm();
    }
}

#[async_trait]
impl ImageSource for ImageFetcher {
    async fn fetch_batch(&mut self, seen: &SeenSet) -> Vec<ImageUrl> {
        ImageFetcher::fetch_batch(self, seen).await
    }

    fn rearm(&mut self) {
        ImageFetcher::rearm(self);
    }
}
