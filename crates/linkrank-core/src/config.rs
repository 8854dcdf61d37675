use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::hits::HitsConfig;
use crate::metrics::pagerank::PageRankConfig;

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "linkrank.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub hits: HitsConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directory searched for relative input files that do not exist as given.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl InputConfig {
    /// Resolve an input path, preferring `<data_dir>/<file>` when it exists.
    #[must_use]
    pub fn resolve(&self, file: &Path) -> PathBuf {
        let candidate = self.data_dir.join(file);
        if file.is_relative() && candidate.exists() {
            candidate
        } else {
            file.to_path_buf()
        }
    }
}

/// Load configuration from `explicit` if given, otherwise from
/// `<project_root>/linkrank.toml`; a missing default file yields defaults.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<RankConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let path = project_root.join(CONFIG_FILE_NAME);
            if !path.exists() {
                return Ok(RankConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<RankConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
