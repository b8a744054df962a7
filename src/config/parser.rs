use std::collections::HashSet;
use std::path::Path;
use crate::errors::ScanError;
use super::types::TrackscanConfig;
use super::security::validate_security_patterns;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<TrackscanConfig, ScanError> {
    if !path.exists() {
        return Err(ScanError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ScanError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate config text already in memory.
pub fn parse_config_str(content: &str) -> Result<TrackscanConfig, ScanError> {
    if content.trim().is_empty() {
        return Ok(TrackscanConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_security_patterns(&yaml)?;
    validate_schema(&yaml)?;

    let config: TrackscanConfig = serde_yaml::from_value(yaml)?;
    validate_conflicts(&config)?;

    Ok(config)
}

/// Structural check against the JSON schema. Violations are logged, not fatal;
/// typed deserialisation catches anything that cannot be used.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ScanError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| ScanError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ScanError::Config(format!("Schema compilation error: {}", e)))?;

    if let Err(errors) = compiled.validate(&json_value) {
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

fn is_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Detect semantic problems the schema cannot express.
fn validate_conflicts(config: &TrackscanConfig) -> Result<(), ScanError> {
    if let Some(tracks) = &config.tracks {
        let mut seen_urls = HashSet::new();
        for track in tracks {
            if track.name.trim().is_empty() {
                return Err(ScanError::Config(format!("Track with URL '{}' has an empty name", track.url)));
            }
            if !is_http_url(&track.url) {
                return Err(ScanError::Config(format!(
                    "Track '{}' has a non-http URL: {}",
                    track.name, track.url
                )));
            }
            if !seen_urls.insert(track.url.as_str()) {
                return Err(ScanError::Config(format!(
                    "Track URL '{}' is listed more than once",
                    track.url
                )));
            }
        }
    }

    if let Some(catalog) = &config.catalog {
        if !is_http_url(&catalog.url) {
            return Err(ScanError::Config(format!("Catalog URL is not http: {}", catalog.url)));
        }
    }

    if let Some(base) = config.discovery.as_ref().and_then(|d| d.base_url.as_ref()) {
        if !is_http_url(base) {
            return Err(ScanError::Config(format!("Discovery base URL is not http: {}", base)));
        }
    }

    if config.scan.as_ref().and_then(|s| s.max_concurrent_tracks) == Some(0) {
        return Err(ScanError::Config("scan.max_concurrent_tracks must be at least 1".into()));
    }

    if let Some(components) = &config.components {
        if components.iter().any(|c| c.trim().is_empty()) {
            warn!("Blank component names in config are ignored");
        }
    }

    Ok(())
}
