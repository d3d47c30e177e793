use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::error;

use crate::error::EnvError;

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";
const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Pull request context provided by GitHub Actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubEnv {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
}

#[derive(Deserialize)]
struct Event {
    pull_request: PullRequestRef,
}

#[derive(Deserialize)]
struct PullRequestRef {
    number: u64,
}

impl GitHubEnv {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Every missing variable is logged before failing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let token = var(TOKEN_VAR);
        let event_path = var(EVENT_PATH_VAR);
        let repository = var(REPOSITORY_VAR);

        let mut missing = Vec::new();
        if token.is_none() {
            error!("`{}` must be set to your GitHub access token", TOKEN_VAR);
            missing.push(TOKEN_VAR);
        }
        if event_path.is_none() {
            error!("`{}` should've been defined by GitHub Actions", EVENT_PATH_VAR);
            missing.push(EVENT_PATH_VAR);
        }
        if repository.is_none() {
            error!("`{}` should've been defined by GitHub Actions", REPOSITORY_VAR);
            missing.push(REPOSITORY_VAR);
        }

        let (Some(token), Some(event_path), Some(repository)) = (token, event_path, repository)
        else {
            return Err(EnvError::Missing(missing).into());
        };

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .with_context(|| {
                format!("`{}` is not in owner/repo form: {}", REPOSITORY_VAR, repository)
            })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pull_number: read_pull_request_number(Path::new(&event_path))?,
            token,
        })
    }
}

fn read_pull_request_number(path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read GitHub event payload: {}", path.display()))?;
    let event: Event = serde_json::from_str(&content)
        .context("GitHub event payload does not describe a pull request")?;
    Ok(event.pull_request.number)
}
