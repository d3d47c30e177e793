use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Optional defaults read from `$XDG_CONFIG_HOME/suggestion-bot/config.toml`.
///
/// Command line flags win over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Review body used when `--message` is not given
    pub message: Option<String>,
    /// Treat submission failures as fatal
    pub fail: bool,
    pub github: GitHubConfig,
    pub azure: AzureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// gh executable, resolved in PATH
    pub gh_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// `api-version` query parameter sent with every REST call
    pub api_version: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            gh_path: "gh".to_owned(),
        }
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            api_version: "7.0".to_owned(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn config_path() -> Option<PathBuf> {
        BaseDirectories::with_prefix("suggestion-bot")
            .ok()
            .map(|dirs| dirs.get_config_home().join("config.toml"))
    }
}
