use std::collections::HashSet;
use chrono::{DateTime, Local};
use crate::models::{ResultRecord, ScanOutcome};

pub const REPORT_TITLE: &str = "ATW Scan Report";
pub const NO_ERRORS_MESSAGE: &str = "No errors found in the selected tracks and components.";
pub const LINK_LABEL: &str = "ATW Link";

const COLUMNS: [&str; 6] = ["Track", "Component", "Tool Name", "Errors", "Link", "Comment"];

/// What was asked for, rendered alongside the results.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub selected_tracks: Vec<String>,
    pub components: Vec<String>,
    pub generated_at: DateTime<Local>,
}

impl ReportContext {
    pub fn new(selected_tracks: Vec<String>, components: Vec<String>) -> Self {
        Self {
            selected_tracks,
            components,
            generated_at: Local::now(),
        }
    }

    fn date(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// One-line verdict for the terminal and report headers.
pub fn headline(outcome: &ScanOutcome) -> String {
    if outcome.is_clean() {
        return NO_ERRORS_MESSAGE.to_string();
    }

    let mut parts = Vec::new();
    if !outcome.records.is_empty() {
        let tracks: HashSet<&str> = outcome.records.iter().map(|r| r.track.as_str()).collect();
        parts.push(format!(
            "{} across {}",
            plural(outcome.records.len(), "error record"),
            plural(tracks.len(), "track")
        ));
    }
    if !outcome.track_errors.is_empty() {
        parts.push(format!(
            "{} of {} tracks failed",
            outcome.failed_count(),
            outcome.total_tracks
        ));
    }
    parts.join("; ")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Link with an angle-bracketed destination, so `)` and spaces survive and
/// `|` cannot split the table row.
fn markdown_link(label: &str, url: &str) -> String {
    let destination = url.replace('<', "%3C").replace('>', "%3E");
    format!("[{}](<{}>)", label, escape_markdown_cell(&destination))
}

/// Line shown under the results heading when no records were produced.
/// Only a scan without failed tracks may claim that nothing was found.
fn empty_results_line(outcome: &ScanOutcome) -> String {
    if outcome.is_clean() {
        NO_ERRORS_MESSAGE.to_string()
    } else {
        format!(
            "No results: {} of {} tracks failed.",
            outcome.failed_count(),
            outcome.total_tracks
        )
    }
}

pub fn link_anchor(url: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank">{}</a>"#,
        escape_html(url),
        LINK_LABEL
    )
}

pub fn format_html_table(records: &[ResultRecord]) -> String {
    let mut html = String::from("<table class=\"results\">\n<thead><tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for r in records {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&r.track),
            escape_html(&r.component),
            escape_html(&r.tool_name),
            r.error_count,
            link_anchor(&r.detail_link),
            escape_html(&r.comment),
        ));
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn format_markdown_table(records: &[ResultRecord]) -> String {
    let mut md = format!("| {} |\n|{}\n", COLUMNS.join(" | "), "---|".repeat(COLUMNS.len()));
    for r in records {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_markdown_cell(&r.track),
            escape_markdown_cell(&r.component),
            escape_markdown_cell(&r.tool_name),
            r.error_count,
            markdown_link(LINK_LABEL, &r.detail_link),
            escape_markdown_cell(&r.comment),
        ));
    }
    md
}

fn markdown_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("{}\n", empty);
    }
    items.iter().map(|i| format!("- {}\n", i)).collect()
}

pub fn format_markdown_report(outcome: &ScanOutcome, context: &ReportContext) -> String {
    let mut md = format!("# {}\n\nDate: {}\n\n", REPORT_TITLE, context.date());
    md.push_str(&format!("**{}**\n\n", headline(outcome)));

    md.push_str("## Scan Results\n\n");
    if outcome.records.is_empty() {
        md.push_str(&format!("{}\n\n", empty_results_line(outcome)));
    } else {
        md.push_str(&format_markdown_table(&outcome.records));
        md.push('\n');
    }

    if !outcome.track_errors.is_empty() {
        md.push_str("## Failed Tracks\n\n| Track | URL | Reason |\n|---|---|---|\n");
        for failure in &outcome.track_errors {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_markdown_cell(&failure.source.name),
                escape_markdown_cell(&failure.source.url),
                escape_markdown_cell(&failure.reason),
            ));
        }
        md.push('\n');
    }

    md.push_str("## Selected Support Tracks\n\n");
    md.push_str(&markdown_list(&context.selected_tracks, "No tracks selected."));
    md.push_str("\n## Selected Components\n\n");
    md.push_str(&markdown_list(&context.components, "No components selected."));
    md.push_str(&footer_line());
    md
}

fn html_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("<p>{}</p>\n", empty);
    }
    let mut html = String::from("<ul>\n");
    for item in items {
        html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
    }
    html.push_str("</ul>\n");
    html
}

pub fn format_html_report(outcome: &ScanOutcome, context: &ReportContext) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n<p>Date: {}</p>\n", REPORT_TITLE, context.date()));
    body.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(&headline(outcome))));

    body.push_str("<h2>Scan Results</h2>\n");
    if outcome.is_clean() {
        body.push_str(&format!(
            "<div class=\"clean\"><h3>{}</h3></div>\n",
            NO_ERRORS_MESSAGE
        ));
    } else if outcome.records.is_empty() {
        body.push_str(&format!(
            "<div class=\"failed\"><h3>{}</h3></div>\n",
            escape_html(&empty_results_line(outcome))
        ));
    } else {
        body.push_str(&format_html_table(&outcome.records));
    }

    if !outcome.track_errors.is_empty() {
        body.push_str("<h2>Failed Tracks</h2>\n<table class=\"failures\">\n<thead><tr><th>Track</th><th>URL</th><th>Reason</th></tr></thead>\n<tbody>\n");
        for failure in &outcome.track_errors {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&failure.source.name),
                escape_html(&failure.source.url),
                escape_html(&failure.reason),
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<h2>Selected Support Tracks</h2>\n");
    body.push_str(&html_list(&context.selected_tracks, "No tracks selected."));
    body.push_str("<h2>Selected Components</h2>\n");
    body.push_str(&html_list(&context.components, "No components selected."));
    body.push_str(&format!("<footer>{}</footer>\n", escape_html(footer_line().trim())));

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        REPORT_TITLE, REPORT_CSS, body
    )
}

fn footer_line() -> String {
    match option_env!("GIT_HASH") {
        Some(hash) => format!("\n_Generated by trackscan {} ({})_\n", env!("CARGO_PKG_VERSION"), hash),
        None => format!("\n_Generated by trackscan {}_\n", env!("CARGO_PKG_VERSION")),
    }
}

const REPORT_CSS: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
th{background:#d3d3d3;text-align:left}\
th,td{border:1px solid #808080;padding:4px 8px}\
.clean h3{color:green}\
.failed h3{color:#b00020}";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrackFailure, TrackSource};

    fn record(track: &str, component: &str, count: usize) -> ResultRecord {
        ResultRecord {
            track: track.into(),
            component: component.into(),
            tool_name: "Checker".into(),
            error_count: count,
            detail_link: format!("http://atw/detail?component={}", component.to_uppercase()),
            comment: String::new(),
        }
    }

    fn failure(name: &str) -> TrackFailure {
        TrackFailure {
            source: TrackSource::new(name, format!("http://atw/{}", name)),
            reason: "HTTP 500 from http://atw".into(),
        }
    }

    fn context() -> ReportContext {
        ReportContext::new(vec!["EE 24R1".into()], vec!["DB".into()])
    }

    #[test]
    fn test_headline_clean() {
        assert_eq!(headline(&ScanOutcome::default()), NO_ERRORS_MESSAGE);
    }

    #[test]
    fn test_headline_records_only() {
        let outcome = ScanOutcome {
            records: vec![record("EE", "DB", 2), record("EE", "UI", 1), record("Cloud", "DB", 1)],
            total_tracks: 2,
            ..Default::default()
        };
        assert_eq!(headline(&outcome), "3 error records across 2 tracks");
    }

    #[test]
    fn test_headline_singular() {
        let outcome = ScanOutcome {
            records: vec![record("EE", "DB", 2)],
            total_tracks: 1,
            ..Default::default()
        };
        assert_eq!(headline(&outcome), "1 error record across 1 track");
    }

    #[test]
    fn test_headline_failures_are_not_clean() {
        let outcome = ScanOutcome {
            track_errors: vec![failure("dead")],
            total_tracks: 3,
            ..Default::default()
        };
        assert_eq!(headline(&outcome), "1 of 3 tracks failed");

        let outcome = ScanOutcome {
            records: vec![record("EE", "DB", 2)],
            track_errors: vec![failure("dead")],
            total_tracks: 2,
            ..Default::default()
        };
        assert_eq!(headline(&outcome), "1 error record across 1 track; 1 of 2 tracks failed");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_html_table_renders_link_anchor() {
        let html = format_html_table(&[record("EE <beta>", "DB", 2)]);
        assert!(html.contains("<th>Tool Name</th>"));
        assert!(html.contains("<td>EE &lt;beta&gt;</td>"));
        assert!(html.contains(
            r#"<a href="http://atw/detail?component=DB" target="_blank">ATW Link</a>"#
        ));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_markdown_report_sections() {
        let outcome = ScanOutcome {
            records: vec![record("EE", "DB", 2)],
            track_errors: vec![failure("dead")],
            total_tracks: 2,
            ..Default::default()
        };
        let md = format_markdown_report(&outcome, &context());
        assert!(md.starts_with("# ATW Scan Report\n"));
        assert!(md.contains("## Scan Results"));
        assert!(md.contains("| EE | DB | Checker | 2 | [ATW Link](<http://atw/detail?component=DB>) |  |"));
        assert!(md.contains("## Failed Tracks"));
        assert!(md.contains("- EE 24R1"));
        assert!(md.contains("- DB"));
    }

    #[test]
    fn test_markdown_report_clean() {
        let ctx = ReportContext::new(vec![], vec![]);
        let md = format_markdown_report(&ScanOutcome::default(), &ctx);
        assert!(md.contains(NO_ERRORS_MESSAGE));
        assert!(!md.contains("## Failed Tracks"));
        assert!(md.contains("No tracks selected."));
        assert!(md.contains("No components selected."));
    }

    #[test]
    fn test_reports_with_only_failures_do_not_claim_clean() {
        let outcome = ScanOutcome {
            track_errors: vec![failure("dead")],
            total_tracks: 1,
            ..Default::default()
        };
        let md = format_markdown_report(&outcome, &context());
        let html = format_html_report(&outcome, &context());
        for text in [&md, &html] {
            assert!(!text.contains(NO_ERRORS_MESSAGE));
            assert!(text.contains("No results: 1 of 1 tracks failed."));
        }
    }

    #[test]
    fn test_markdown_escapes_urls() {
        let mut rec = record("EE", "DB", 1);
        rec.detail_link = "http://atw/d?a=1|2&b=(x)".into();
        let outcome = ScanOutcome {
            records: vec![rec],
            track_errors: vec![TrackFailure {
                source: TrackSource::new("pipe", "http://atw/t?x=a|b"),
                reason: "HTTP 500".into(),
            }],
            total_tracks: 2,
            ..Default::default()
        };
        let md = format_markdown_report(&outcome, &context());
        assert!(md.contains("[ATW Link](<http://atw/d?a=1\\|2&b=(x)>)"));
        assert!(md.contains("| pipe | http://atw/t?x=a\\|b | HTTP 500 |"));
    }

    #[test]
    fn test_html_report_is_complete_document() {
        let html = format_html_report(&ScanOutcome::default(), &context());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>ATW Scan Report</title>"));
        assert!(html.contains(NO_ERRORS_MESSAGE));
        assert!(html.contains("<li>EE 24R1</li>"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
