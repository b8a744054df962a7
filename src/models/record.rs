use serde::{Deserialize, Serialize};

/// One (failing tool, matched component) row of the consolidated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub track: String,
    pub component: String,
    pub tool_name: String,
    /// Matching detail rows for this component, not the summary page total.
    pub error_count: usize,
    /// Detail page link scoped to `component`.
    pub detail_link: String,
    /// Free text for reviewers; always empty when produced by a scan.
    #[serde(default)]
    pub comment: String,
}
