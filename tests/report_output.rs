use std::fs;
use tempfile::TempDir;
use trackscan::config::ReportFormat;
use trackscan::models::{ResultRecord, ScanOutcome, TrackFailure, TrackSource};
use trackscan::reporting::{write_reports, ReportContext};

fn make_outcome() -> ScanOutcome {
    ScanOutcome {
        records: vec![
            ResultRecord {
                track: "Support (IFS Cloud) 24R1".to_string(),
                component: "DB".to_string(),
                tool_name: "Dictionary Checker".to_string(),
                error_count: 4,
                detail_link: "http://atw/detail?id=7&component=DB".to_string(),
                comment: String::new(),
            },
            ResultRecord {
                track: "Support (IFS Cloud) 24R1".to_string(),
                component: "UI".to_string(),
                tool_name: "Layout <Lint>".to_string(),
                error_count: 1,
                detail_link: "http://atw/detail?id=8&component=UI".to_string(),
                comment: String::new(),
            },
        ],
        track_errors: vec![TrackFailure {
            source: TrackSource::new("Projects Nightly", "http://atw/track/9"),
            reason: "HTTP 502 from http://atw/track/9".to_string(),
        }],
        total_tracks: 2,
        ..Default::default()
    }
}

fn make_context() -> ReportContext {
    ReportContext::new(
        vec!["Support (IFS Cloud) 24R1".to_string(), "Projects Nightly".to_string()],
        vec!["DB".to_string(), "UI".to_string()],
    )
}

#[tokio::test]
async fn test_reports_written_for_every_format() {
    let dir = TempDir::new().unwrap();
    let paths = write_reports(dir.path(), &make_outcome(), &make_context(), &ReportFormat::all())
        .await
        .unwrap();

    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["scan_results.json", "scan_report.md", "scan_report.html"]);
}

#[tokio::test]
async fn test_markdown_report_content() {
    let dir = TempDir::new().unwrap();
    write_reports(dir.path(), &make_outcome(), &make_context(), &[ReportFormat::Markdown])
        .await
        .unwrap();

    let md = fs::read_to_string(dir.path().join("scan_report.md")).unwrap();
    assert!(md.contains("# ATW Scan Report"));
    assert!(md.contains("2 error records across 1 track; 1 of 2 tracks failed"));
    assert!(md.contains("[ATW Link](<http://atw/detail?id=7&component=DB>)"));
    assert!(md.contains("| Projects Nightly | http://atw/track/9 | HTTP 502 from http://atw/track/9 |"));
    assert!(md.contains("- Projects Nightly"));
    assert!(!dir.path().join("scan_report.html").exists());
}

#[tokio::test]
async fn test_html_report_escapes_and_links() {
    let dir = TempDir::new().unwrap();
    write_reports(dir.path(), &make_outcome(), &make_context(), &[ReportFormat::Html])
        .await
        .unwrap();

    let html = fs::read_to_string(dir.path().join("scan_report.html")).unwrap();
    assert!(html.contains("Layout &lt;Lint&gt;"));
    assert!(!html.contains("Layout <Lint>"));
    assert!(html.contains(
        r#"<a href="http://atw/detail?id=7&amp;component=DB" target="_blank">ATW Link</a>"#
    ));
    assert!(html.contains("<h2>Failed Tracks</h2>"));
}

#[tokio::test]
async fn test_json_report_round_trips_records() {
    let dir = TempDir::new().unwrap();
    write_reports(dir.path(), &make_outcome(), &make_context(), &[ReportFormat::Json])
        .await
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("scan_results.json")).unwrap()).unwrap();
    let records: Vec<ResultRecord> = serde_json::from_value(json["records"].clone()).unwrap();
    assert_eq!(records, make_outcome().records);
    assert_eq!(json["summary"]["errors_by_component"]["DB"], 4);
    assert_eq!(json["summary"]["failed_tracks"], 1);
    assert_eq!(json["components"], serde_json::json!(["DB", "UI"]));
    assert!(json["scan_id"].as_str().is_some_and(|id| id.len() == 36));
}

#[tokio::test]
async fn test_clean_scan_report() {
    let dir = TempDir::new().unwrap();
    let ctx = make_context();
    write_reports(dir.path(), &ScanOutcome::default(), &ctx, &[ReportFormat::Markdown, ReportFormat::Html])
        .await
        .unwrap();

    let md = fs::read_to_string(dir.path().join("scan_report.md")).unwrap();
    let html = fs::read_to_string(dir.path().join("scan_report.html")).unwrap();
    for text in [&md, &html] {
        assert!(text.contains("No errors found in the selected tracks and components."));
        assert!(!text.contains("Failed Tracks"));
    }
}

#[tokio::test]
async fn test_all_tracks_failed_report_does_not_claim_no_errors() {
    let dir = TempDir::new().unwrap();
    let outcome = ScanOutcome {
        track_errors: vec![TrackFailure {
            source: TrackSource::new("Projects Nightly", "http://atw/track/9"),
            reason: "HTTP 502 from http://atw/track/9".to_string(),
        }],
        total_tracks: 1,
        ..Default::default()
    };
    write_reports(dir.path(), &outcome, &make_context(), &[ReportFormat::Markdown, ReportFormat::Html])
        .await
        .unwrap();

    let md = fs::read_to_string(dir.path().join("scan_report.md")).unwrap();
    let html = fs::read_to_string(dir.path().join("scan_report.html")).unwrap();
    for text in [&md, &html] {
        assert!(!text.contains("No errors found in the selected tracks and components."));
        assert!(text.contains("No results: 1 of 1 tracks failed."));
        assert!(text.contains("Failed Tracks"));
    }
}
