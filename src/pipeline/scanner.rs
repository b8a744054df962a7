use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use crate::errors::ScanError;
use crate::extract::{extract_detail_counts, extract_summary, UNKNOWN_TRACK};
use crate::fetch::PageFetcher;
use crate::models::{InterestSet, ResultRecord, TrackSource};
use crate::tally::flatten_counts;
use super::events::ScanEvent;
use tracing::{debug, info, warn};

/// What one track contributed to a scan.
#[derive(Debug, Clone, Default)]
pub struct TrackScan {
    pub records: Vec<ResultRecord>,
    /// Summary rows with a positive error count.
    pub failing_tools: usize,
    pub rows_without_link: usize,
    pub details_failed: usize,
    pub duration: Duration,
}

/// Scans a single track: summary page, then each failing tool's detail page
/// in turn.
pub struct TrackScanner<'a> {
    fetcher: &'a dyn PageFetcher,
    event_tx: Option<&'a mpsc::UnboundedSender<ScanEvent>>,
}

impl<'a> TrackScanner<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher) -> Self {
        Self { fetcher, event_tx: None }
    }

    pub fn with_events(mut self, tx: Option<&'a mpsc::UnboundedSender<ScanEvent>>) -> Self {
        self.event_tx = tx;
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(tx) = self.event_tx {
            let _ = tx.send(event);
        }
    }

    /// Fails only when the summary page cannot be fetched. Detail page
    /// failures skip their row.
    pub async fn scan(&self, source: &TrackSource, interest: &InterestSet) -> Result<TrackScan, ScanError> {
        let started = Instant::now();

        let summary = self.fetcher.fetch(&source.url).await?;
        let mut rows = extract_summary(&summary.body, &summary.url);
        for row in &mut rows {
            if row.track == UNKNOWN_TRACK {
                row.track = source.name.clone();
            }
        }

        info!(track = %source.name, failing_tools = rows.len(), "Starting track");

        let mut scan = TrackScan {
            failing_tools: rows.len(),
            ..Default::default()
        };

        for row in &rows {
            let Some(detail_url) = row.detail_url.as_deref() else {
                debug!(track = %source.name, tool = %row.tool_name, "Skipping row without detail link");
                scan.rows_without_link += 1;
                continue;
            };

            let page = match self.fetcher.fetch(detail_url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        track = %source.name,
                        tool = %row.tool_name,
                        url = %detail_url,
                        error_type = e.classify().error_type,
                        error = %e,
                        "Detail page unavailable, skipping row"
                    );
                    scan.details_failed += 1;
                    self.emit(ScanEvent::DetailSkipped {
                        track: source.name.clone(),
                        tool_name: row.tool_name.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            let counts = extract_detail_counts(&page.body, interest);
            debug!(track = %source.name, tool = %row.tool_name, matched = counts.total(), "Tallied detail page");
            scan.records.extend(flatten_counts(row, detail_url, &counts));
        }

        scan.duration = started.elapsed();
        info!(
            track = %source.name,
            records = scan.records.len(),
            duration_ms = scan.duration.as_millis() as u64,
            "Finished track"
        );
        Ok(scan)
    }
}

/// Scan one track with no event stream attached.
pub async fn scan_track(
    fetcher: &dyn PageFetcher,
    source: &TrackSource,
    interest: &InterestSet,
) -> Result<TrackScan, ScanError> {
    TrackScanner::new(fetcher).scan(source, interest).await
}
