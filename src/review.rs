//! Picking a review platform and submitting suggestions to it.

use anyhow::Result;
use tracing::info;

use crate::azure::{self, AzureEnv, AzureRestClient};
use crate::config::Config;
use crate::error::EnvError;
use crate::github::{self, GhCli, GitHubEnv};

/// Options shared by every platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewOptions {
    /// Body of the review, or of the fallback comment
    pub message: Option<String>,
    /// Return submission failures instead of only logging them
    pub fail: bool,
}

/// Where suggestions get posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    AzureDevOps,
    GitHub,
}

impl Platform {
    /// Azure DevOps wins when both tokens are set.
    pub fn detect(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EnvError> {
        let is_set = |name: &str| lookup(name).is_some_and(|v| !v.is_empty());
        if is_set(azure::TOKEN_VAR) {
            Ok(Self::AzureDevOps)
        } else if is_set(github::TOKEN_VAR) {
            Ok(Self::GitHub)
        } else {
            Err(EnvError::NoAccessToken)
        }
    }
}

/// Submits suggestions for `diff` to whichever platform the environment points at.
pub async fn suggest(diff: &str, options: &ReviewOptions, config: &Config) -> Result<()> {
    match Platform::detect(|name| std::env::var(name).ok())? {
        Platform::AzureDevOps => {
            info!("submitting suggestions to Azure DevOps");
            let env = AzureEnv::from_env()?;
            let client = AzureRestClient::new(env, &config.azure.api_version);
            azure::make_review(diff, options, &client).await
        }
        Platform::GitHub => {
            info!("submitting suggestions to GitHub");
            let env = GitHubEnv::from_env()?;
            let client = GhCli::locate(&config.github.gh_path, env.token.clone())?;
            github::make_review(diff, options, &env, &client).await
        }
    }
}
