use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TrackscanConfig {
    pub tracks: Option<Vec<TrackConfig>>,
    pub components: Option<Vec<String>>,
    pub catalog: Option<CatalogConfig>,
    pub discovery: Option<DiscoveryConfig>,
    pub fetch: Option<FetchConfig>,
    pub scan: Option<ScanSection>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackConfig {
    pub name: String,
    pub url: String,
}

/// Where to pull a whole product area's components from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub url: String,
    pub product_area: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DiscoveryConfig {
    pub base_url: Option<String>,
    pub panels: Option<Vec<String>>,
    pub exclude_keywords: Option<Vec<String>>,
    pub default_exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FetchConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ScanSection {
    pub max_concurrent_tracks: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub formats: Option<Vec<ReportFormat>>,
}

impl OutputConfig {
    pub fn formats_or_default(&self) -> Vec<ReportFormat> {
        self.formats.clone().unwrap_or_else(ReportFormat::all)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub fn all() -> Vec<Self> {
        vec![Self::Json, Self::Markdown, Self::Html]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Json => "json",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Markdown => "scan_report.md",
            Self::Html => "scan_report.html",
            Self::Json => "scan_results.json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
