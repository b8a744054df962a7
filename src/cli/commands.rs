use clap::{Parser, Subcommand, Args};
use crate::config::ReportFormat;

#[derive(Parser)]
#[command(name = "trackscan", version, about = "Scan support tracks for failing tools and tally errors per component")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan tracks and write reports
    Scan(ScanArgs),
    /// List the tracks linked from the index page
    Tracks(TracksArgs),
    /// List product areas and their components
    Components(ComponentsArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone, Default)]
pub struct ScanArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Track to scan as NAME=URL (repeatable); skips discovery
    #[arg(long = "track", value_name = "NAME=URL")]
    pub tracks: Vec<String>,

    /// Discovered track to scan, by name (repeatable)
    #[arg(long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// Scan every discovered track instead of the default selection
    #[arg(long)]
    pub all_tracks: bool,

    /// Component to tally (repeatable, or comma-separated)
    #[arg(long = "component", value_name = "NAME", value_delimiter = ',')]
    pub components: Vec<String>,

    /// Add every component of this product area from the catalog
    #[arg(long)]
    pub product_area: Option<String>,

    /// Track index page used for discovery
    #[arg(long)]
    pub index_url: Option<String>,

    /// Component catalog page
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Output directory for reports
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report formats to write (repeatable)
    #[arg(long = "format", value_enum)]
    pub formats: Vec<ReportFormat>,

    /// Skip writing report files
    #[arg(long)]
    pub no_report: bool,

    /// Maximum number of tracks scanned at once
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Args, Clone, Default)]
pub struct TracksArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Track index page
    #[arg(long)]
    pub index_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone, Default)]
pub struct ComponentsArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Component catalog page
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Only list this product area
    #[arg(long)]
    pub product_area: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
