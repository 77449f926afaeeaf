//! YouBike feed HTTP client.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::FeedError;
use super::source::StationSource;
use crate::config::DEFAULT_FEED_URL;

/// One raw station record as published by the feed.
///
/// Counts default to zero when absent. Missing or non-numeric coordinates
/// are kept as `None` so the record is dropped by validation instead of
/// failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StationDto {
    /// Station number
    pub sno: String,
    /// Station name
    pub sna: String,
    /// Address
    #[serde(default)]
    pub ar: String,
    /// District
    #[serde(default)]
    pub sarea: String,
    /// Total docks
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub available_rent_bikes: u32,
    #[serde(default)]
    pub available_return_bikes: u32,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
    #[serde(rename = "updateTime", default)]
    pub update_time: String,
    /// Status code ("1" = in service)
    #[serde(default)]
    pub act: String,
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Full URL of the JSON feed
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FeedClientConfig {
    /// Create a config pointing at the default feed.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set a custom feed URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a custom request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the station feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StationSource for FeedClient {
    async fn fetch_all(&self) -> Result<Vec<StationDto>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_payload(&body)
    }
}

/// Read a coordinate, treating anything but a JSON number as absent.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::Value::deserialize(deserializer)?.as_f64())
}

/// Parse a feed payload: a JSON array of station records.
pub(crate) fn parse_payload(body: &str) -> Result<Vec<StationDto>, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Json {
        message: e.to_string(),
    })
}
