use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;
use crate::config::ReportFormat;
use crate::errors::ScanError;
use crate::models::{ResultRecord, ScanOutcome, TrackFailure, TrackMetrics};
use crate::pipeline::metrics::{compute_summary, ScanSummary};
use crate::reporting::formatter::{format_html_report, format_markdown_report, headline, ReportContext};
use tracing::info;

/// Machine-readable form of a finished scan.
#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub scan_id: String,
    pub generated_at: DateTime<Local>,
    pub headline: String,
    pub selected_tracks: &'a [String],
    pub components: &'a [String],
    pub summary: ScanSummary,
    pub records: &'a [ResultRecord],
    pub track_errors: &'a [TrackFailure],
    pub tracks: &'a [TrackMetrics],
}

impl<'a> ScanReport<'a> {
    pub fn new(outcome: &'a ScanOutcome, context: &'a ReportContext) -> Self {
        Self {
            scan_id: Uuid::new_v4().to_string(),
            generated_at: context.generated_at,
            headline: headline(outcome),
            selected_tracks: &context.selected_tracks,
            components: &context.components,
            summary: compute_summary(outcome),
            records: &outcome.records,
            track_errors: &outcome.track_errors,
            tracks: &outcome.tracks,
        }
    }
}

/// Render the requested formats into `dir`, creating it if needed.
/// Returns the written paths in the order the formats were given.
pub async fn write_reports(
    dir: &Path,
    outcome: &ScanOutcome,
    context: &ReportContext,
    formats: &[ReportFormat],
) -> Result<Vec<PathBuf>, ScanError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        ScanError::Report(format!("Cannot create output directory {}: {}", dir.display(), e))
    })?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = dir.join(format.file_name());
        if written.contains(&path) {
            continue;
        }
        let content = match format {
            ReportFormat::Json => serde_json::to_string_pretty(&ScanReport::new(outcome, context))?,
            ReportFormat::Markdown => format_markdown_report(outcome, context),
            ReportFormat::Html => format_html_report(outcome, context),
        };
        tokio::fs::write(&path, content).await.map_err(|e| {
            ScanError::Report(format!("Cannot write {}: {}", path.display(), e))
        })?;
        info!(format = %format, path = %path.display(), "Report written");
        written.push(path);
    }

    Ok(written)
}
