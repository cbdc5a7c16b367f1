use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;

/// Make `path` absolute by joining it onto the current working directory.
///
/// Unlike `canonicalize`, this works for paths that do not exist yet (an
/// output directory about to be written into, a missing input whose error
/// should name the full path).
pub fn absolute_from_cwd(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

/// Locate the config to use when none was passed explicitly: the default
/// config file in `dir` if present.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(png2c_core::config::DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
