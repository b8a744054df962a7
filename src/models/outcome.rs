use serde::{Deserialize, Serialize};
use super::record::ResultRecord;
use super::track::TrackSource;

/// A track that produced no results because it could not be scanned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFailure {
    pub source: TrackSource,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    Completed,
    Failed,
}

/// Timing and counters for one finished track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackMetrics {
    pub name: String,
    pub url: String,
    pub status: TrackStatus,
    pub duration_ms: u64,
    pub records: usize,
    pub failing_tools: usize,
    pub rows_without_link: usize,
    pub details_failed: usize,
}

/// Everything a scan produced. Always returned, possibly empty or partial.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub records: Vec<ResultRecord>,
    pub track_errors: Vec<TrackFailure>,
    pub tracks: Vec<TrackMetrics>,
    pub total_tracks: usize,
    pub elapsed_ms: u64,
}

impl ScanOutcome {
    /// No records and no failures: the "no errors found" state.
    pub fn is_clean(&self) -> bool {
        self.records.is_empty() && self.track_errors.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.track_errors.len()
    }

    pub fn succeeded_count(&self) -> usize {
        self.total_tracks.saturating_sub(self.track_errors.len())
    }

    pub fn error_for(&self, url: &str) -> Option<&str> {
        self.track_errors
            .iter()
            .find(|f| f.source.url == url)
            .map(|f| f.reason.as_str())
    }

    /// Records of one track, by the track label they carry.
    pub fn records_for<'a>(&'a self, track: &'a str) -> impl Iterator<Item = &'a ResultRecord> + 'a {
        self.records.iter().filter(move |r| r.track == track)
    }
}
