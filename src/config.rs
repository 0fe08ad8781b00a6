//! Relay configuration
//!
//! Configuration is read from an optional YAML file, then individual values
//! may be overridden from the command line. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration.
//!
//! ```yaml
//! upstream_url: https://civitai.com/api/v1/images
//! downstream_url: http://localhost:5000/api/PlayFileAPI/PlayImageUrl
//! include_nsfw: false
//! fetch_interval_secs: 60
//! max_retries: 3
//! retry_delay_secs: 5
//! pagination: cursor
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PaginationMode;
use crate::state::{EvictionPolicy, DEFAULT_SEEN_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default listing endpoint
pub const DEFAULT_UPSTREAM_URL: &str = "https://civitai.com/api/v1/images";

/// Default receiver endpoint
pub const DEFAULT_DOWNSTREAM_URL: &str = "http://localhost:5000/api/PlayFileAPI/PlayImageUrl";

/// Complete relay configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Listing API polled for images
    pub upstream_url: String,

    /// Endpoint that receives the selected image URL
    pub downstream_url: String,

    /// Ask the listing API to include NSFW images
    pub include_nsfw: bool,

    /// Seconds between cycles
    pub fetch_interval_secs: u64,

    /// Total attempts per request
    pub max_retries: u32,

    /// Seconds between attempts
    pub retry_delay_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Items requested per listing call
    pub batch_size: u32,

    /// Forwarded URLs remembered before eviction
    pub seen_threshold: usize,

    /// Eviction strategy for remembered URLs
    pub eviction: EvictionPolicy,

    /// Pagination strategy for the listing API
    pub pagination: PaginationMode,

    /// Listing sort order
    pub sort: String,

    /// Listing time window
    pub period: String,

    /// Optional outgoing request rate limit
    pub rate_limit: Option<RateLimiterConfig>,

    /// Also write logs to this file
    pub log_file: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            downstream_url: DEFAULT_DOWNSTREAM_URL.to_string(),
            include_nsfw: false,
            fetch_interval_secs: 60,
            max_retries: 3,
            retry_delay_secs: 5,
            request_timeout_secs: 30,
            batch_size: 20,
            seen_threshold: DEFAULT_SEEN_THRESHOLD,
            eviction: EvictionPolicy::Clear,
            pagination: PaginationMode::Cursor,
            sort: "Most Reactions".to_string(),
            period: "Day".to_string(),
            rate_limit: None,
            log_file: None,
        }
    }
}

impl RelayConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Render the configuration as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("upstream_url", &self.upstream_url),
            ("downstream_url", &self.downstream_url),
        ] {
            let parsed = url::Url::parse(value)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::invalid_value(
                    field,
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ));
            }
        }

        if self.max_retries == 0 {
            return Err(Error::invalid_value("max_retries", "must be at least 1"));
        }
        if self.batch_size == 0 {
            return Err(Error::invalid_value("batch_size", "must be at least 1"));
        }
        if self.seen_threshold == 0 {
            return Err(Error::invalid_value("seen_threshold", "must be at least 1"));
        }
        if self.fetch_interval_secs == 0 {
            return Err(Error::invalid_value(
                "fetch_interval_secs",
                "must be at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid_value(
                "request_timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some(limit) = &self.rate_limit {
            if limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }
        Ok(())
    }

    /// Interval between cycles
    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval_secs)
    }

    /// Delay between attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// HTTP client settings shared by the fetcher and the forwarder
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .max_retries(self.max_retries)
            .retry_delay(self.retry_delay())
            .rate_limit(self.rate_limit.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert!(!config.include_nsfw);
        assert_eq!(config.fetch_interval(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(5));
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.seen_threshold, 1000);
        assert_eq!(config.pagination, PaginationMode::Cursor);
        assert_eq!(config.sort, "Most Reactions");
        assert_eq!(config.period, "Day");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RelayConfig::from_yaml_str("").unwrap(), RelayConfig::default());
        assert_eq!(
            RelayConfig::from_yaml_str("  \n").unwrap(),
            RelayConfig::default()
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RelayConfig::from_yaml_str(
            r"
downstream_url: http://receiver:8080/play
include_nsfw: true
pagination: page
eviction: fifo
rate_limit:
  requests_per_second: 2
",
        )
        .unwrap();

        assert_eq!(config.downstream_url, "http://receiver:8080/play");
        assert!(config.include_nsfw);
        assert_eq!(config.pagination, PaginationMode::Page);
        assert_eq!(config.eviction, EvictionPolicy::Fifo);
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(2, 1)));
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.batch_size, 20);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RelayConfig::from_yaml_str("batchsize: 10").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size: 50\nretry_delay_secs: 1").unwrap();

        let config = RelayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = RelayConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let yaml = RelayConfig::default().to_yaml().unwrap();
        assert_eq!(
            RelayConfig::from_yaml_str(&yaml).unwrap(),
            RelayConfig::default()
        );
    }

    #[test_case("max_retries: 0", "max_retries" ; "zero retries")]
    #[test_case("batch_size: 0", "batch_size" ; "zero batch")]
    #[test_case("seen_threshold: 0", "seen_threshold" ; "zero threshold")]
    #[test_case("fetch_interval_secs: 0", "fetch_interval_secs" ; "zero interval")]
    #[test_case("request_timeout_secs: 0", "request_timeout_secs" ; "zero timeout")]
    #[test_case("upstream_url: ftp://example.com/images", "upstream_url" ; "bad scheme")]
    #[test_case("rate_limit: {requests_per_second: 0}", "rate_limit.requests_per_second" ; "zero rate")]
    fn test_validate_rejects(yaml: &str, field: &str) {
        let config = RelayConfig::from_yaml_str(yaml).unwrap();
        match config.validate().unwrap_err() {
            Error::InvalidConfigValue { field: got, .. } => assert_eq!(got, field),
            other => panic!("Expected InvalidConfigValue, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unparsable_url() {
        let config = RelayConfig {
            downstream_url: "not a url".to_string(),
            ..RelayConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_http_config_mirrors_retry_settings() {
        let config = RelayConfig {
            max_retries: 4,
            retry_delay_secs: 2,
            request_timeout_secs: 10,
            ..RelayConfig::default()
        };
        let http = config.http_config();
        assert_eq!(http.max_retries, 4);
        assert_eq!(http.retry_delay, Duration::from_secs(2));
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert!(http.rate_limit.is_none());
    }
}
