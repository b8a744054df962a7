use console::style;
use crate::cli::commands::TracksArgs;
use crate::cli::load_config;
use crate::config::TrackscanConfig;
use crate::discovery::{default_selection, discover_tracks, DiscoveryRules};
use crate::errors::ScanError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::models::TrackSource;
use serde::Serialize;
use tracing::info;

pub(crate) fn discovery_rules(config: &TrackscanConfig, index_url: Option<&str>) -> DiscoveryRules {
    let mut rules = DiscoveryRules::from_config(config.discovery.as_ref());
    if let Some(url) = index_url {
        rules.base_url = url.to_string();
    }
    rules
}

/// Fetch the index page and list its tracks.
pub(crate) async fn fetch_tracks(
    fetcher: &dyn PageFetcher,
    rules: &DiscoveryRules,
) -> Result<Vec<TrackSource>, ScanError> {
    let page = fetcher.fetch(&rules.base_url).await?;
    let tracks = discover_tracks(&page.body, &rules.base_url, rules);
    info!(url = %rules.base_url, tracks = tracks.len(), "Tracks discovered");
    Ok(tracks)
}

#[derive(Serialize)]
struct TrackListing<'a> {
    name: &'a str,
    url: &'a str,
    default: bool,
}

pub async fn handle_tracks(args: TracksArgs) -> Result<(), ScanError> {
    let config = load_config(args.config.as_deref()).await?;
    let rules = discovery_rules(&config, args.index_url.as_deref());
    let fetcher = HttpFetcher::new(&config.fetch.clone().unwrap_or_default())?;

    let tracks = fetch_tracks(&fetcher, &rules).await?;
    let defaults = default_selection(&tracks, &rules);
    let listing: Vec<TrackListing<'_>> = tracks
        .iter()
        .map(|t| TrackListing {
            name: &t.name,
            url: &t.url,
            default: defaults.contains(t),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        println!("No tracks available from {}", rules.base_url);
        return Ok(());
    }
    for entry in &listing {
        let marker = if entry.default { style("*").green() } else { style(" ").dim() };
        println!("{} {}  {}", marker, entry.name, style(entry.url).dim());
    }
    println!("\n{} of {} tracks selected by default (*)", defaults.len(), listing.len());
    Ok(())
}
