use scraper::Html;
use crate::models::{ComponentCount, InterestSet};
use super::table::parse_table;
use super::{COMPONENT_HEADER, RESULTS_TABLE_ID};

/// Count detail rows per interesting component.
///
/// Each data row whose component cell matches an interest entry adds one to
/// that entry's count, keyed by the caller's spelling. Other components are
/// ignored.
pub fn extract_detail_counts(markup: &str, interest: &InterestSet) -> ComponentCount {
    let mut counts = ComponentCount::default();
    if interest.is_empty() {
        return counts;
    }

    let doc = Html::parse_document(markup);
    let Some(table) = parse_table(&doc, RESULTS_TABLE_ID, &[COMPONENT_HEADER]) else {
        return counts;
    };

    for row in &table.rows {
        if let Some(component) = interest.lookup(row.text(COMPONENT_HEADER)) {
            counts.increment(component);
        }
    }
    counts
}
