/// Messages streamed from a running scan for live display.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// Scan fanned out to all tracks
    ScanStarted {
        total_tracks: usize,
    },
    /// A track began fetching its summary page
    TrackStarted {
        name: String,
        url: String,
    },
    /// A failing tool's detail page could not be fetched; the row was skipped
    DetailSkipped {
        track: String,
        tool_name: String,
        error: String,
    },
    /// A track finished and its records were merged
    TrackCompleted {
        name: String,
        records: usize,
        duration_ms: u64,
    },
    /// A track produced nothing because it could not be scanned
    TrackFailed {
        name: String,
        error: String,
    },
    /// All tracks have finished
    ScanCompleted {
        total_records: usize,
        failed_tracks: usize,
        elapsed_ms: u64,
    },
}
