use crate::config::IngestConfig;
use crate::ingest::traits::PropertySource;
use crate::ingest::types::RawBatch;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, error, info};

/// HTTP client for the external property listings API.
#[derive(Clone)]
pub struct PropertyIngestClient {
    client: Client,
    base_url: Url,
}

impl PropertyIngestClient {
    /// Create a client for the base URL in `config`.
    pub fn new(config: &IngestConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid property ingest URL: {}", config.base_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("rental-ingest/0.1")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    fn properties_url(&self) -> String {
        format!(
            "{}/api/properties",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    /// Decode a response body into a batch of raw records
    fn parse_properties(body: &str) -> Result<RawBatch> {
        serde_json::from_str(body).context("Failed to decode property records")
    }
}

#[async_trait]
impl PropertySource for PropertyIngestClient {
    async fn get_properties(&self) -> Result<RawBatch> {
        let url = self.properties_url();

        debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch properties from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            error!("Call to {} failed with status code: {}", url, status);
            anyhow::bail!("Failed to retrieve properties from {url}, status code: {status}");
        }

        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        let records = Self::parse_properties(&body)?;
        info!("Fetched {} property records from {}", records.len(), url);
        Ok(records)
    }

    fn source_name(&self) -> &str {
        self.base_url.as_str()
    }
}
