use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use crate::errors::ScanError;
use super::provider::{Page, PageFetcher};

enum Entry {
    Page(String),
    Status(u16),
}

/// In-memory fetcher serving canned pages by URL. Unknown URLs fail with a
/// fetch error. Used for offline runs and tests.
#[derive(Default)]
pub struct MemoryFetcher {
    entries: HashMap<String, Entry>,
    delays: HashMap<String, Duration>,
    requested: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.entries.insert(url.to_string(), Entry::Page(body.into()));
        self
    }

    /// Serve `url` with an HTTP error status.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.entries.insert(url.to_string(), Entry::Status(status));
        self
    }

    /// Delay the response for `url`.
    pub fn with_delay(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// URLs requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, ScanError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        match self.entries.get(url) {
            Some(Entry::Page(body)) => Ok(Page::new(url, body.clone())),
            Some(Entry::Status(status)) => Err(ScanError::HttpStatus {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(ScanError::fetch(url, "connection refused")),
        }
    }

    fn fetcher_name(&self) -> &str { "memory" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_pages_and_errors() {
        let fetcher = MemoryFetcher::new()
            .with_page("http://atw/a", "<p>a</p>")
            .with_status("http://atw/b", 503);

        let page = fetcher.fetch("http://atw/a").await.unwrap();
        assert_eq!(page.body, "<p>a</p>");
        assert_eq!(page.url, "http://atw/a");

        let err = fetcher.fetch("http://atw/b").await.unwrap_err();
        assert!(matches!(err, ScanError::HttpStatus { status: 503, .. }));

        let err = fetcher.fetch("http://atw/c").await.unwrap_err();
        assert!(matches!(err, ScanError::Fetch { .. }));

        assert_eq!(fetcher.requested(), vec!["http://atw/a", "http://atw/b", "http://atw/c"]);
    }
}
