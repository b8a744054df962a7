use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::config::FetchConfig;
use crate::errors::ScanError;
use super::provider::{Page, PageFetcher};
use tracing::debug;

pub const DEFAULT_USER_AGENT: &str = concat!("trackscan/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Plain HTTP GET fetcher. No caching, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, ScanError> {
        let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .user_agent(user_agent)
            .build()
            .map_err(|e| ScanError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, ScanError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        let resp = self.client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ScanError::fetch(url, e))?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = resp.url().to_string();
        let body = resp.text().await.map_err(|e| ScanError::fetch(url, e))?;
        debug!(url = %url, final_url = %final_url, bytes = body.len(), "Fetched page");

        Ok(Page { url: final_url, body })
    }

    fn fetcher_name(&self) -> &str { "http" }
}
