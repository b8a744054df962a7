use std::sync::LazyLock;
use scraper::{Html, Selector};
use url::Url;
use crate::models::SummaryRow;
use super::table::{parse_table, selector};
use super::{
    DETAILS_HEADER, ERRORS_HEADER, RESULTS_TABLE_ID, TOOL_NAME_HEADER, TRACK_HEADING_STYLE,
    UNKNOWN_TRACK,
};

static PANEL_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("div.panel-heading"));
static H3: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static BASE: LazyLock<Selector> = LazyLock::new(|| selector("base[href]"));

/// Extract failing-tool rows from a track summary page.
///
/// `base_url` is the URL the page was served from. Rows whose error count is
/// zero, negative or not a number are dropped. A missing results table or
/// missing required column yields an empty list.
pub fn extract_summary(markup: &str, base_url: &str) -> Vec<SummaryRow> {
    let doc = Html::parse_document(markup);
    let Some(table) = parse_table(
        &doc,
        RESULTS_TABLE_ID,
        &[ERRORS_HEADER, DETAILS_HEADER, TOOL_NAME_HEADER],
    ) else {
        return Vec::new();
    };

    let track = heading_title(&doc).unwrap_or_else(|| UNKNOWN_TRACK.to_string());
    let base = document_base(&doc, base_url);

    table
        .rows
        .iter()
        .filter_map(|row| {
            let error_count = parse_error_count(row.text(ERRORS_HEADER));
            if error_count <= 0 {
                return None;
            }
            Some(SummaryRow {
                track: track.clone(),
                tool_name: row.text(TOOL_NAME_HEADER).to_string(),
                error_count,
                detail_url: row
                    .href(DETAILS_HEADER)
                    .and_then(|href| resolve_link(base.as_ref(), href)),
            })
        })
        .collect()
}

/// Track title from the page heading panel, if the page has one.
pub fn extract_track_title(markup: &str) -> Option<String> {
    heading_title(&Html::parse_document(markup))
}

fn heading_title(doc: &Html) -> Option<String> {
    let title_of = |panel: scraper::ElementRef<'_>| {
        panel
            .select(&H3)
            .next()
            .map(|h3| h3.text().collect::<String>().trim().to_string())
    };

    doc.select(&PANEL_HEADING)
        .filter(|p| p.value().attr("style") == Some(TRACK_HEADING_STYLE))
        .find_map(title_of)
        .or_else(|| doc.select(&PANEL_HEADING).find_map(title_of))
}

/// Count cell as an optionally signed integer; anything else counts as zero.
pub fn parse_error_count(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}

fn document_base(doc: &Html, page_url: &str) -> Option<Url> {
    let page = Url::parse(page_url).ok();
    let declared = doc
        .select(&BASE)
        .next()
        .and_then(|b| b.value().attr("href"))
        .map(str::trim);

    match (page, declared) {
        (Some(page), Some(href)) => page.join(href).ok().or(Some(page)),
        (None, Some(href)) => Url::parse(href).ok(),
        (page, None) => page,
    }
}

fn resolve_link(base: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    };
    resolved.map(String::from)
}
