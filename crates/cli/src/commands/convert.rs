use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use png2c_core::{convert_all, Conversion};

use crate::absolute_from_cwd;
use crate::commands::load_convert_config;

/// Convert the configured assets (or `inputs`, when given) into headers.
///
/// Command-line values win over the config file: `inputs` replaces the
/// configured list, `out_dir` and `jobs` replace their config counterparts.
/// Paths given here are relative to the current directory, not to the
/// config file.
pub fn convert_command(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    config_path: Option<&Path>,
    jobs: Option<usize>,
    json: bool,
) -> Result<Vec<Conversion>> {
    let mut config = load_convert_config(config_path)?;

    if !inputs.is_empty() {
        config.inputs =
            inputs.iter().map(|p| absolute_from_cwd(p)).collect::<Result<Vec<_>>>()?;
    }
    if let Some(dir) = out_dir {
        config.out_dir = Some(absolute_from_cwd(dir)?);
    }
    if let Some(jobs) = jobs {
        config.jobs = jobs;
    }

    if config.inputs.is_empty() {
        warn!("No inputs configured; nothing to convert");
    }

    let conversions = convert_all(&config, |conversion| {
        if !json {
            println!("{conversion}");
        }
    })
    .context("Conversion aborted")?;

    if json {
        let serialized = serde_json::to_string_pretty(&conversions)
            .context("Failed to serialize conversions to JSON")?;
        println!("{}", serialized);
    } else {
        let total: usize = conversions.iter().map(|c| c.bytes).sum();
        info!("Converted {} asset(s), {} bytes total", conversions.len(), total);
    }

    Ok(conversions)
}
