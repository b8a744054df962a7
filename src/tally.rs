//! Flattening of per-page component tallies into report records.

use crate::models::{ComponentCount, ResultRecord, SummaryRow};

/// Query fragment selecting every component on a detail page.
pub const ALL_COMPONENTS_SELECTOR: &str = "component=All";

/// Rewrite a detail link so it shows only `component`.
///
/// Every `component=All` becomes `component=<COMPONENT>`, upper-cased. Links
/// without the selector are returned unchanged. This string is a deep link
/// consumed downstream and must not be normalised any further.
pub fn scoped_detail_link(detail_url: &str, component: &str) -> String {
    detail_url.replace(
        ALL_COMPONENTS_SELECTOR,
        &format!("component={}", component.to_uppercase()),
    )
}

/// One record per component with a nonzero tally on this row's detail page.
pub fn flatten_counts(row: &SummaryRow, detail_url: &str, counts: &ComponentCount) -> Vec<ResultRecord> {
    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(component, count)| ResultRecord {
            track: row.track.clone(),
            component: component.to_string(),
            tool_name: row.tool_name.clone(),
            error_count: count,
            detail_link: scoped_detail_link(detail_url, component),
            comment: String::new(),
        })
        .collect()
}
