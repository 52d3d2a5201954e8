//! Configuration for the facereid CLI.
//!
//! Configuration is stored in ~/.facereid/config.yaml. A missing file means
//! defaults; `facereid config --init` writes them out.

use std::path::{Path, PathBuf};

use facereid_identity::{DEFAULT_THRESHOLD, MatchPolicy, StorePaths};
use serde::{Deserialize, Serialize};

use crate::Cli;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".facereid";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Default index artifact filename, inside the base directory.
pub const DEFAULT_INDEX_FILE: &str = "faces.idx";
/// Embedding dimension of the reference face model.
pub const DEFAULT_DIM: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Index artifact path. Empty means ~/.facereid/faces.idx.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub index_path: String,

    /// Embedding dimension.
    pub dim: usize,

    /// Squared L2 distance below which a face counts as known.
    pub threshold: f32,

    /// `host:port` that outcome records are pushed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: String::new(),
            dim: DEFAULT_DIM,
            threshold: DEFAULT_THRESHOLD,
            sender: None,
            config_path: PathBuf::new(),
        }
    }
}

impl Config {
    /// Gets the default config directory (~/.facereid).
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the configuration to disk, creating its directory if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Applies the global command line overrides.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(index) = &cli.index {
            self.index_path = index.clone();
        }
        if let Some(dim) = cli.dim {
            self.dim = dim;
        }
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
    }

    /// Resolves the index path, falling back to the default location next
    /// to the config file.
    pub fn index_path(&self) -> anyhow::Result<PathBuf> {
        if !self.index_path.is_empty() {
            return Ok(PathBuf::from(&self.index_path));
        }
        let dir = match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => Self::default_config_dir()
                .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?,
        };
        Ok(dir.join(DEFAULT_INDEX_FILE))
    }

    pub fn store_paths(&self) -> anyhow::Result<StorePaths> {
        Ok(StorePaths::from_index(self.index_path()?)?)
    }

    pub fn policy(&self) -> anyhow::Result<MatchPolicy> {
        Ok(MatchPolicy::new(self.threshold)?)
    }
}

/// Loads configuration from `custom_path` or the default location.
///
/// Unlike `save`, loading never writes: a missing file yields defaults.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg: Config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        }
    } else {
        Config::default()
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

/// Loads the config and applies the global flags of `cli`.
pub fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut cfg = load_config(cli.config.as_deref())?;
    cfg.apply_overrides(cli);
    Ok(cfg)
}
