pub mod table;
pub mod summary;
pub mod detail;

pub use table::{parse_table, parse_table_markup, Cell, ParsedTable, TableRow};
pub use summary::{extract_summary, extract_track_title, parse_error_count};
pub use detail::extract_detail_counts;

/// `id` of the results table on both summary and detail pages.
pub const RESULTS_TABLE_ID: &str = "ErrorHistory";

pub const ERRORS_HEADER: &str = "errors";
pub const DETAILS_HEADER: &str = "result details";
pub const TOOL_NAME_HEADER: &str = "tool name";
pub const COMPONENT_HEADER: &str = "component";

/// Inline style of the panel that carries the track title.
pub const TRACK_HEADING_STYLE: &str = "background: #360065";
pub const UNKNOWN_TRACK: &str = "Unknown Track";
