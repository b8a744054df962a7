use std::time::Duration;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use console::style;
use crate::pipeline::{ScanEvent, ScanProgress};
use crate::utils::formatting::{format_duration, truncate_middle};

const TRACK_LABEL_WIDTH: usize = 40;

/// Terminal display for a running scan: one bar over all tracks plus
/// printed lines for failures.
#[derive(Clone)]
pub struct ScanProgressBar {
    multi: MultiProgress,
    bar: ProgressBar,
}

impl ScanProgressBar {
    pub fn new(total: usize, quiet: bool) -> Self {
        let multi = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };
        let bar = multi.add(ProgressBar::new(total as u64));
        let bar_style = ProgressStyle::default_bar()
            .template("  {spinner:.cyan} {bar:30.cyan/dark_gray} {pos}/{len} tracks | {elapsed} | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(bar_style);
        bar.set_message("Starting scan...");
        bar.enable_steady_tick(Duration::from_millis(120));

        Self { multi, bar }
    }

    /// Advance the bar for one finished track.
    pub fn on_progress(&self, progress: &ScanProgress) {
        self.bar.set_position(progress.completed as u64);
        self.bar.set_message(format!(
            "{} in {}",
            truncate_middle(&progress.track, TRACK_LABEL_WIDTH),
            format_duration(progress.track_elapsed.as_millis() as u64),
        ));
    }

    pub fn handle_event(&self, event: &ScanEvent) {
        match event {
            ScanEvent::TrackStarted { name, .. } => {
                self.bar.set_message(format!("Scanning {}", truncate_middle(name, TRACK_LABEL_WIDTH)));
            }
            ScanEvent::DetailSkipped { track, tool_name, error } => {
                self.println(&format!(
                    "  {} {} / {}: details unavailable ({})",
                    style("!").yellow(), track, tool_name, error
                ));
            }
            ScanEvent::TrackFailed { name, error } => {
                self.println(&format!("  {} {}: {}", style("✗").red(), name, error));
            }
            ScanEvent::ScanCompleted { total_records, failed_tracks, elapsed_ms } => {
                self.bar.finish_with_message(format!(
                    "Scan complete: {} records | {} failed | {}",
                    total_records,
                    failed_tracks,
                    format_duration(*elapsed_ms),
                ));
            }
            _ => {}
        }
    }

    /// Print a line above the bar without tearing it.
    pub fn println(&self, msg: &str) {
        let _ = self.multi.println(msg);
    }

    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
