use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use console::style;
use crate::cli::commands::ScanArgs;
use crate::cli::components::{area_components, catalog_url, fetch_catalog};
use crate::cli::load_config;
use crate::cli::progress::ScanProgressBar;
use crate::cli::tracks::{discovery_rules, fetch_tracks};
use crate::config::{FetchConfig, ReportFormat, TrackscanConfig};
use crate::discovery::{default_selection, DiscoveryRules};
use crate::errors::ScanError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::{InterestSet, TrackSource};
use crate::pipeline::{OrchestratorConfig, ScanOrchestrator};
use crate::reporting::{headline, write_reports, ReportContext};
use tracing::{info, warn};

const DEFAULT_OUTPUT_DIR: &str = "./results";

pub async fn handle_scan(args: ScanArgs, quiet: bool) -> Result<(), ScanError> {
    let config = load_config(args.config.as_deref()).await?;
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&fetch_config(&args, &config))?);

    let sources = resolve_sources(&args, &config, fetcher.as_ref()).await?;
    let interest = resolve_interest(&args, &config, fetcher.as_ref()).await?;
    if sources.is_empty() {
        return Err(ScanError::Config("No tracks selected to scan".into()));
    }
    if interest.is_empty() {
        return Err(ScanError::Config("No components selected to tally".into()));
    }

    info!(tracks = sources.len(), components = interest.len(), "Starting scan");

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling scan");
            ctrl_c.cancel();
        }
    });

    let display = ScanProgressBar::new(sources.len(), quiet);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let event_display = display.clone();
    let event_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            event_display.handle_event(&event);
        }
    });

    let orchestrator = ScanOrchestrator::new(fetcher)
        .with_config(OrchestratorConfig {
            max_concurrent_tracks: args
                .max_concurrent
                .or_else(|| config.scan.as_ref().and_then(|s| s.max_concurrent_tracks)),
        })
        .with_cancel_token(cancel)
        .with_event_channel(event_tx);

    let outcome = orchestrator
        .run(&sources, &interest, |progress| display.on_progress(progress))
        .await;
    drop(orchestrator);
    let _ = event_task.await;
    display.finish();

    if !args.no_report {
        let context = ReportContext::new(
            sources.iter().map(|s| s.name.clone()).collect(),
            interest.names().map(str::to_string).collect(),
        );
        let dir = output_dir(&args, &config);
        let formats = report_formats(&args, &config);
        let written = write_reports(&dir, &outcome, &context, &formats).await?;
        if !quiet {
            for path in &written {
                println!("  {} {}", style("→").dim(), path.display());
            }
        }
    }

    let summary = headline(&outcome);
    if outcome.is_clean() {
        println!("{}", style(summary).green());
    } else {
        println!("{}", style(summary).yellow());
    }
    Ok(())
}

fn fetch_config(args: &ScanArgs, config: &TrackscanConfig) -> FetchConfig {
    let mut fetch = config.fetch.clone().unwrap_or_default();
    if args.timeout.is_some() {
        fetch.timeout_secs = args.timeout;
    }
    fetch
}

fn output_dir(args: &ScanArgs, config: &TrackscanConfig) -> PathBuf {
    args.output
        .clone()
        .or_else(|| config.output.as_ref().and_then(|o| o.directory.clone()))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

fn report_formats(args: &ScanArgs, config: &TrackscanConfig) -> Vec<ReportFormat> {
    if !args.formats.is_empty() {
        return args.formats.clone();
    }
    config
        .output
        .as_ref()
        .map(|o| o.formats_or_default())
        .unwrap_or_else(ReportFormat::all)
}

/// Tracks from `--track`, then the config file, then discovery.
async fn resolve_sources(
    args: &ScanArgs,
    config: &TrackscanConfig,
    fetcher: &dyn PageFetcher,
) -> Result<Vec<TrackSource>, ScanError> {
    if !args.tracks.is_empty() {
        return args
            .tracks
            .iter()
            .map(|pair| {
                TrackSource::parse_pair(pair).ok_or_else(|| {
                    ScanError::Config(format!("Invalid --track '{}', expected NAME=URL", pair))
                })
            })
            .collect();
    }

    if let Some(tracks) = config.tracks.as_ref().filter(|t| !t.is_empty()) {
        return Ok(tracks
            .iter()
            .map(|t| TrackSource::new(t.name.clone(), t.url.clone()))
            .collect());
    }

    let rules = discovery_rules(config, args.index_url.as_deref());
    let discovered = fetch_tracks(fetcher, &rules).await?;
    select_tracks(&discovered, &args.select, args.all_tracks, &rules)
}

/// Narrow discovered tracks to the named ones, all of them, or the
/// default selection.
pub(crate) fn select_tracks(
    discovered: &[TrackSource],
    names: &[String],
    all: bool,
    rules: &DiscoveryRules,
) -> Result<Vec<TrackSource>, ScanError> {
    if names.is_empty() {
        return Ok(if all {
            discovered.to_vec()
        } else {
            default_selection(discovered, rules)
        });
    }

    names
        .iter()
        .map(|name| {
            discovered
                .iter()
                .find(|t| t.name == name.trim())
                .cloned()
                .ok_or_else(|| ScanError::Config(format!("No discovered track named '{}'", name)))
        })
        .collect()
}

/// Components from `--component` (or the config file), plus a product area
/// pulled from the catalog.
async fn resolve_interest(
    args: &ScanArgs,
    config: &TrackscanConfig,
    fetcher: &dyn PageFetcher,
) -> Result<InterestSet, ScanError> {
    let mut interest = if !args.components.is_empty() {
        InterestSet::new(&args.components)
    } else {
        InterestSet::new(config.components.iter().flatten())
    };

    let area = args
        .product_area
        .clone()
        .or_else(|| config.catalog.as_ref().and_then(|c| c.product_area.clone()));
    if let Some(area) = area {
        let url = catalog_url(config, args.catalog_url.as_deref());
        let catalog = fetch_catalog(fetcher, &url).await?;
        for component in area_components(&catalog, &area)? {
            interest.insert(&component);
        }
    }

    Ok(interest)
}
