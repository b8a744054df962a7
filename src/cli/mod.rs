pub mod commands;
pub mod components;
pub mod progress;
pub mod scan;
pub mod tracks;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, TrackscanConfig};
use crate::errors::ScanError;

/// Load the config file if one was given, otherwise start from defaults.
pub(crate) async fn load_config(path: Option<&str>) -> Result<TrackscanConfig, ScanError> {
    match path {
        Some(path) => config::parse_config(&PathBuf::from(path)).await,
        None => Ok(TrackscanConfig::default()),
    }
}

pub async fn handle_validate(args: commands::ValidateArgs) -> Result<(), ScanError> {
    let config = config::parse_config(&PathBuf::from(&args.config)).await?;
    println!(
        "Configuration is valid: {} ({} tracks, {} components)",
        args.config,
        config.tracks.as_ref().map_or(0, Vec::len),
        config.components.as_ref().map_or(0, Vec::len),
    );
    Ok(())
}
