//! Scan support tracks for failing tools and tally their errors per
//! component.
//!
//! A scan fetches each track's summary page, follows the detail link of
//! every failing tool, and counts detail rows whose component is in the
//! caller's interest set. Tracks are scanned concurrently and a failing
//! track never aborts the others.

pub mod config;
pub mod discovery;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod reporting;
pub mod tally;
pub mod utils;

#[cfg(feature = "cli")]
pub mod cli;

pub use errors::ScanError;
pub use fetch::{HttpFetcher, MemoryFetcher, Page, PageFetcher};
pub use models::{InterestSet, ResultRecord, ScanOutcome, TrackFailure, TrackSource};
pub use pipeline::{run_scan, scan_track, ScanOrchestrator};
