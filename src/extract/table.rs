//! Header-addressed table extraction shared by every page kind.
//!
//! Columns are located by header text rather than position, since table
//! layouts differ between tracks.

use std::collections::HashMap;
use std::sync::LazyLock;
use scraper::{ElementRef, Html, Selector};

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static TH: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static TR: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid CSS")
}

/// Text of an element with every text node trimmed and empty ones dropped,
/// joined without separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    /// `href` of the first anchor in the cell, verbatim.
    pub href: Option<String>,
}

/// One data row keyed by lower-cased header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: HashMap<String, Cell>,
}

impl TableRow {
    pub fn cell(&self, header: &str) -> Option<&Cell> {
        self.cells.get(header)
    }

    /// Cell text, or "" when the row has no such column.
    pub fn text(&self, header: &str) -> &str {
        self.cells.get(header).map(|c| c.text.as_str()).unwrap_or("")
    }

    pub fn href(&self, header: &str) -> Option<&str> {
        self.cells.get(header).and_then(|c| c.href.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Parse the table with the given `id`.
///
/// Returns `None` when the table is absent or lacks any of
/// `required_headers` (matched case-insensitively). Data rows are every `tr`
/// after the first; rows without `td` cells, or too short to reach every
/// required column, are skipped.
pub fn parse_table(doc: &Html, table_id: &str, required_headers: &[&str]) -> Option<ParsedTable> {
    let table = doc
        .select(&TABLE)
        .find(|t| t.value().id() == Some(table_id))?;

    let headers: Vec<String> = table
        .select(&TH)
        .map(|th| stripped_text(th).to_lowercase())
        .collect();

    let mut columns: Vec<(&str, usize)> = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if !columns.iter().any(|(n, _)| *n == name.as_str()) {
            columns.push((name.as_str(), idx));
        }
    }

    let mut min_cells = 0;
    for required in required_headers {
        let wanted = required.to_lowercase();
        let (_, idx) = columns.iter().find(|(n, _)| *n == wanted)?;
        min_cells = min_cells.max(idx + 1);
    }

    let mut rows = Vec::new();
    for tr in table.select(&TR).skip(1) {
        let tds: Vec<ElementRef<'_>> = tr.select(&TD).collect();
        if tds.is_empty() || tds.len() < min_cells {
            continue;
        }

        let mut cells = HashMap::new();
        for (name, idx) in &columns {
            if let Some(td) = tds.get(*idx) {
                let href = td
                    .select(&ANCHOR)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::to_string);
                cells.insert(name.to_string(), Cell { text: stripped_text(*td), href });
            }
        }
        rows.push(TableRow { cells });
    }

    Some(ParsedTable { headers, rows })
}

/// Convenience wrapper over [`parse_table`] for raw markup.
pub fn parse_table_markup(markup: &str, table_id: &str, required_headers: &[&str]) -> Option<ParsedTable> {
    let doc = Html::parse_document(markup);
    parse_table(&doc, table_id, required_headers)
}
