use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ident::OverrideTable;
use crate::layout::resolve_against;

/// File name the CLI looks for when no config is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "png2c.json";

/// Assets converted when nothing else is configured.
pub const DEFAULT_INPUTS: &[&str] =
    &["banner.png", "keypad_frame_graphic.png", "default_keypad_image.png"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write config at {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse JSON config at {path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("Failed to parse YAML config at {path}: {source}")]
    Yaml { path: PathBuf, source: serde_yaml::Error },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("`jobs` must be at least 1")]
    ZeroJobs,
}

/// On-disk encoding of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// `.yaml`/`.yml` select YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

fn default_jobs() -> usize {
    1
}

/// Everything a conversion run needs: which assets, where the headers go,
/// and how identifiers are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Assets to convert, in order.
    pub inputs: Vec<PathBuf>,
    /// Directory for generated headers. When absent each header lands next
    /// to its input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Directory relative `inputs` and `out_dir` resolve against. Filled in
    /// with the config file's directory by [`ConvertConfig::load`] when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Identifier substitutions layered over the built-in table.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
    /// Worker count. `1` converts strictly in order on the calling thread.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUTS.iter().map(PathBuf::from))
    }
}

impl ConvertConfig {
    pub fn new<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            out_dir: None,
            base_dir: None,
            overrides: BTreeMap::new(),
            jobs: default_jobs(),
        }
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out_dir.into());
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_override(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.overrides.insert(from.into(), to.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        Ok(())
    }

    /// Built-in overrides plus the configured ones.
    pub fn override_table(&self) -> OverrideTable {
        OverrideTable::default().with_extra(self.overrides.clone())
    }

    /// Inputs joined onto `base_dir` where relative.
    pub fn resolved_inputs(&self) -> Vec<PathBuf> {
        self.inputs.iter().map(|p| resolve_against(self.base_dir.as_deref(), p)).collect()
    }

    pub fn resolved_out_dir(&self) -> Option<PathBuf> {
        self.out_dir.as_deref().map(|p| resolve_against(self.base_dir.as_deref(), p))
    }

    /// Read a config file. Relative paths inside it are taken relative to the
    /// file's own directory unless it sets `base_dir`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let mut config = Self::from_str_with_format(&body, ConfigFormat::from_path(path), path)?;

        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        config.base_dir = match (config.base_dir.take(), parent) {
            (Some(base), parent) => Some(resolve_against(parent, &base)),
            (None, Some(parent)) => Some(parent.to_path_buf()),
            (None, None) => None,
        };

        config.validate()?;
        Ok(config)
    }

    fn from_str_with_format(
        body: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Json => serde_json::from_str(body)
                .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source }),
            ConfigFormat::Yaml => serde_yaml::from_str(body)
                .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source }),
        }
    }

    /// Serialize in the format implied by `path`.
    pub fn to_string_for(&self, path: &Path) -> Result<String, ConfigError> {
        match ConfigFormat::from_path(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let body = self.to_string_for(path)?;
        fs::write(path, body)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }
}
