use async_trait::async_trait;
use crate::errors::ScanError;

/// A fetched page: the URL it was finally served from and its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page. Any error means "this page is unavailable".
    async fn fetch(&self, url: &str) -> Result<Page, ScanError>;

    /// Fetcher name for logging
    fn fetcher_name(&self) -> &str;
}
