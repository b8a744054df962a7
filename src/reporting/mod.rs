pub mod assembler;
pub mod formatter;

pub use assembler::{write_reports, ScanReport};
pub use formatter::{format_html_report, format_html_table, format_markdown_report, headline, ReportContext};
