use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use png2c_core::ConvertConfig;

use crate::discover_config;

/// Load the conversion config.
///
/// An explicit path must exist. Otherwise `png2c.json` in the current
/// directory is used when present, and the built-in asset list when not.
pub fn load_convert_config(explicit: Option<&Path>) -> Result<ConvertConfig> {
    if let Some(path) = explicit {
        return ConvertConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = env::current_dir().context("Failed to get current directory")?;
    match discover_config(&cwd) {
        Some(path) => {
            debug!("Using config {}", path.display());
            ConvertConfig::load(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
        None => {
            debug!("No config file in {}; using built-in asset list", cwd.display());
            Ok(ConvertConfig::default())
        }
    }
}
