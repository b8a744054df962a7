use serde::{Deserialize, Serialize};

/// One scannable support track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSource {
    pub name: String,
    pub url: String,
}

impl TrackSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parse a `NAME=URL` pair as given on the command line.
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (name, url) = pair.split_once('=')?;
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return None;
        }
        Some(Self::new(name, url))
    }
}

impl std::fmt::Display for TrackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// A failing tool listed on a track's summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub track: String,
    pub tool_name: String,
    /// Always greater than zero for rows that survive extraction.
    pub error_count: i64,
    pub detail_url: Option<String>,
}
