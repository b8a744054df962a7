pub mod events;
pub mod metrics;
pub mod orchestrator;
pub mod scanner;
pub mod state;

pub use events::ScanEvent;
pub use metrics::{compute_summary, ScanSummary};
pub use orchestrator::{run_scan, ScanOrchestrator};
pub use scanner::{scan_track, TrackScan, TrackScanner};
pub use state::{OrchestratorConfig, ScanProgress};
