use console::style;
use crate::cli::commands::ComponentsArgs;
use crate::cli::load_config;
use crate::config::TrackscanConfig;
use crate::discovery::{parse_component_catalog, ComponentCatalog};
use crate::errors::ScanError;
use crate::fetch::{HttpFetcher, PageFetcher};
use tracing::info;

pub const DEFAULT_CATALOG_URL: &str = "http://atw/components";

pub(crate) fn catalog_url(config: &TrackscanConfig, override_url: Option<&str>) -> String {
    override_url
        .map(str::to_string)
        .or_else(|| config.catalog.as_ref().map(|c| c.url.clone()))
        .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
}

pub(crate) async fn fetch_catalog(fetcher: &dyn PageFetcher, url: &str) -> Result<ComponentCatalog, ScanError> {
    let page = fetcher.fetch(url).await?;
    let catalog = parse_component_catalog(&page.body);
    info!(url = %url, product_areas = catalog.len(), "Component catalog loaded");
    Ok(catalog)
}

/// Components of `area`, or a config error naming the known areas.
pub(crate) fn area_components(catalog: &ComponentCatalog, area: &str) -> Result<Vec<String>, ScanError> {
    let components = catalog.components_for(area);
    if components.is_empty() {
        let known: Vec<&str> = catalog.product_areas().collect();
        return Err(ScanError::Config(format!(
            "Unknown product area '{}' (known: {})",
            area,
            known.join(", ")
        )));
    }
    Ok(components.to_vec())
}

pub async fn handle_components(args: ComponentsArgs) -> Result<(), ScanError> {
    let config = load_config(args.config.as_deref()).await?;
    let url = catalog_url(&config, args.catalog_url.as_deref());
    let fetcher = HttpFetcher::new(&config.fetch.clone().unwrap_or_default())?;
    let catalog = fetch_catalog(&fetcher, &url).await?;

    if let Some(area) = &args.product_area {
        let components = area_components(&catalog, area)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&components)?);
        } else {
            for component in &components {
                println!("{}", component);
            }
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    if catalog.is_empty() {
        println!("No components found at {}", url);
        return Ok(());
    }
    for (area, components) in catalog.iter() {
        println!("{} ({})", style(area).bold(), components.len());
        for component in components {
            println!("  {}", component);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    #[test]
    fn test_catalog_url_precedence() {
        let mut config = TrackscanConfig::default();
        assert_eq!(catalog_url(&config, None), DEFAULT_CATALOG_URL);
        config.catalog = Some(CatalogConfig { url: "http://atw.local/c".into(), product_area: None });
        assert_eq!(catalog_url(&config, None), "http://atw.local/c");
        assert_eq!(catalog_url(&config, Some("http://x/c")), "http://x/c");
    }

    #[test]
    fn test_unknown_area_is_config_error() {
        let catalog = parse_component_catalog(
            r#"<table id="DataTable"><tr><th>Product Area</th><th>Component Name</th></tr>
               <tr><td>Finance</td><td>ACCRUL</td></tr></table>"#,
        );
        assert_eq!(area_components(&catalog, "Finance").unwrap(), vec!["ACCRUL"]);
        assert!(matches!(area_components(&catalog, "HR"), Err(ScanError::Config(_))));
    }
}
