use std::path::Path;

use anyhow::{bail, Context, Result};
use png2c_core::ConvertConfig;

/// Write the built-in configuration to `path` as a starting point.
///
/// The format follows the extension (`.yaml`/`.yml` or JSON). An existing
/// file is only replaced with `force`.
pub fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Config already exists at {} (use --force to overwrite)", path.display());
    }

    let config = ConvertConfig::default();
    config
        .save(path)
        .with_context(|| format!("Failed to write default config to {}", path.display()))?;

    println!("Wrote default config:");
    println!("  Path: {}", path.display());
    println!("  Inputs: {}", config.inputs.len());
    for input in &config.inputs {
        println!("  - {}", input.display());
    }

    Ok(())
}
