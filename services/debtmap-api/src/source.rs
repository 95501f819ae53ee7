//! Upstream indicator sources.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use debtmap_common::{DebtMapError, DebtMapResult, Indicator};
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::UpstreamConfig;
use crate::metrics;

/// Anything that can produce the raw JSON body of an indicator endpoint.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Fetch the unmodified response body for `indicator`.
    async fn fetch_raw(&self, indicator: Indicator) -> DebtMapResult<Bytes>;

    /// Fetch the unmodified country boundary GeoJSON.
    async fn fetch_map(&self) -> DebtMapResult<Bytes> {
        Err(DebtMapError::MapUnavailable(
            "no map source configured".to_string(),
        ))
    }
}

/// DataMapper API over HTTP.
pub struct HttpIndicatorSource {
    client: Client,
    urls: HashMap<Indicator, String>,
    map_url: Option<String>,
}

impl HttpIndicatorSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        let urls = Indicator::ALL
            .into_iter()
            .map(|i| (i, config.url_for(i)))
            .collect();

        Ok(Self {
            client,
            urls,
            map_url: config.map_url.clone(),
        })
    }

    pub fn url(&self, indicator: Indicator) -> Option<&str> {
        self.urls.get(&indicator).map(String::as_str)
    }

    pub fn map_url(&self) -> Option<&str> {
        self.map_url.as_deref()
    }

    async fn get(&self, url: &str) -> Result<Bytes, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("upstream returned {}", status));
        }

        response.bytes().await.map_err(|e| e.to_string())
    }
}

#[async_trait]
impl IndicatorSource for HttpIndicatorSource {
    #[instrument(skip(self), fields(indicator = %indicator))]
    async fn fetch_raw(&self, indicator: Indicator) -> DebtMapResult<Bytes> {
        let url = self.url(indicator).ok_or_else(|| {
            DebtMapError::InternalError(format!("no upstream URL for {}", indicator))
        })?;

        let start = Instant::now();
        let result = self.get(url).await;
        metrics::record_upstream_request(indicator.upstream_key(), result.is_ok(), start.elapsed());

        match result {
            Ok(body) => {
                debug!(url = %url, bytes = body.len(), "Fetched indicator");
                Ok(body)
            }
            Err(message) => {
                warn!(url = %url, error = %message, "Upstream request failed");
                Err(DebtMapError::UpstreamUnavailable { indicator, message })
            }
        }
    }

    #[instrument(skip(self))]
    async fn fetch_map(&self) -> DebtMapResult<Bytes> {
        let url = self
            .map_url()
            .ok_or_else(|| DebtMapError::MapUnavailable("no map URL configured".to_string()))?;

        let start = Instant::now();
        let result = self.get(url).await;
        metrics::record_upstream_request(metrics::MAP_SOURCE, result.is_ok(), start.elapsed());

        match result {
            Ok(body) => {
                debug!(url = %url, bytes = body.len(), "Fetched map");
                Ok(body)
            }
            Err(message) => {
                warn!(url = %url, error = %message, "Map request failed");
                Err(DebtMapError::MapUnavailable(message))
            }
        }
    }
}
