//! Downstream forwarder

use crate::config::RelayConfig;
use crate::engine::ImageSink;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use tracing::{error, info};

/// Query parameter carrying the image URL
pub const DEFAULT_URL_PARAM: &str = "URL";

/// Sends image URLs to the downstream endpoint as `GET ?URL=<image>`
#[derive(Debug)]
pub struct Forwarder {
    client: HttpClient,
    endpoint: String,
    url_param: String,
}

impl Forwarder {
    /// Create a forwarder for the given endpoint
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            url_param: DEFAULT_URL_PARAM.to_string(),
        }
    }

    /// Create a forwarder from the relay configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        Ok(Self::new(
            HttpClient::with_config(config.http_config())?,
            &config.downstream_url,
        ))
    }

    /// Send one URL. Returns `false` once every attempt failed.
    ///
    /// Recording the URL as seen is the caller's job.
    pub async fn send(&self, image_url: &str) -> bool {
        let request = RequestConfig::new().query(&self.url_param, image_url);

        match self.client.get_with_config(&self.endpoint, request).await {
            Ok(response) => {
                info!(
                    url = image_url,
                    status = response.status.as_u16(),
                    "Successfully sent image URL to endpoint"
                );
                true
            }
            Err(e) => {
                error!(
                    url = image_url,
                    endpoint = %self.endpoint,
                    attempts = self.client.config().max_retries,
                    error = %e,
                    "Failed to send image URL to endpoint"
                );
                false
            }
        }
    }
}

#[async_trait]
impl ImageSink for Forwarder {
    async fn send(&self, image_url: &str) -> bool {
        Forwarder::send(self, image_url).await
    }
}
