use indexmap::IndexMap;
use serde::Serialize;
use crate::models::{ScanOutcome, TrackStatus};

/// Aggregate numbers over a finished scan, for logs and report headers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub total_tracks: usize,
    pub failed_tracks: usize,
    pub total_records: usize,
    /// Sum of tallied rows per component, in first-seen order.
    pub errors_by_component: IndexMap<String, usize>,
    pub slowest_track: Option<(String, u64)>,
    pub details_failed: usize,
    pub elapsed_ms: u64,
}

pub fn compute_summary(outcome: &ScanOutcome) -> ScanSummary {
    let mut errors_by_component: IndexMap<String, usize> = IndexMap::new();
    for record in &outcome.records {
        *errors_by_component.entry(record.component.clone()).or_insert(0) += record.error_count;
    }

    let slowest_track = outcome
        .tracks
        .iter()
        .filter(|t| t.status == TrackStatus::Completed)
        .max_by_key(|t| t.duration_ms)
        .map(|t| (t.name.clone(), t.duration_ms));

    ScanSummary {
        total_tracks: outcome.total_tracks,
        failed_tracks: outcome.failed_count(),
        total_records: outcome.records.len(),
        errors_by_component,
        slowest_track,
        details_failed: outcome.tracks.iter().map(|t| t.details_failed).sum(),
        elapsed_ms: outcome.elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultRecord, TrackMetrics};

    fn record(component: &str, count: usize) -> ResultRecord {
        ResultRecord {
            track: "EE".into(),
            component: component.into(),
            tool_name: "Checker".into(),
            error_count: count,
            detail_link: String::new(),
            comment: String::new(),
        }
    }

    fn metrics(name: &str, status: TrackStatus, duration_ms: u64) -> TrackMetrics {
        TrackMetrics {
            name: name.into(),
            url: format!("http://atw/{}", name),
            status,
            duration_ms,
            records: 0,
            failing_tools: 0,
            rows_without_link: 0,
            details_failed: 1,
        }
    }

    #[test]
    fn test_summary_sums_per_component() {
        let outcome = ScanOutcome {
            records: vec![record("DB", 2), record("UI", 1), record("DB", 3)],
            tracks: vec![
                metrics("fast", TrackStatus::Completed, 100),
                metrics("slow", TrackStatus::Completed, 900),
                metrics("dead", TrackStatus::Failed, 5000),
            ],
            total_tracks: 3,
            ..Default::default()
        };
        let summary = compute_summary(&outcome);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.errors_by_component.get("DB"), Some(&5));
        assert_eq!(summary.errors_by_component.get("UI"), Some(&1));
        assert_eq!(summary.slowest_track, Some(("slow".to_string(), 900)));
        assert_eq!(summary.details_failed, 3);
    }

    #[test]
    fn test_summary_of_empty_outcome() {
        let summary = compute_summary(&ScanOutcome::default());
        assert_eq!(summary.total_records, 0);
        assert!(summary.errors_by_component.is_empty());
        assert!(summary.slowest_track.is_none());
    }
}
