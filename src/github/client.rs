use anyhow::{anyhow, Context};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::review::ReviewRequest;
use crate::error::ApiError;

/// Preview media type that enables multi-line review comments.
const ACCEPT_COMFORT_FADE: &str = "Accept: application/vnd.github.comfort-fade-preview+json";

/// The GitHub calls a review needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn create_review(&self, review: &ReviewRequest) -> Result<(), ApiError>;

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError>;
}

/// [`GitHubApi`] backed by the `gh` CLI.
pub struct GhCli {
    program: PathBuf,
    token: String,
}

impl GhCli {
    /// Resolve `program` in PATH; `token` is handed to gh as `GH_TOKEN`.
    pub fn locate(program: &str, token: impl Into<String>) -> anyhow::Result<Self> {
        let program = which::which(program)
            .with_context(|| format!("Failed to find `{}` - is the gh CLI installed?", program))?;
        Ok(Self {
            program,
            token: token.into(),
        })
    }

    /// Execute gh CLI command and return stdout, feeding `input` to stdin
    async fn gh_command(&self, args: &[String], input: Option<&[u8]>) -> Result<String, ApiError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .env("GH_TOKEN", &self.token)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to execute gh CLI - is it installed?")?;

        if let Some(input) = input {
            let mut stdin = child.stdin.take().context("gh stdin is not available")?;
            stdin
                .write_all(input)
                .await
                .context("Failed to write request body to gh")?;
        }

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for gh CLI")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(match parse_http_status(&stderr) {
                Some(status) => ApiError::Http {
                    status,
                    message: stderr,
                },
                None => ApiError::Transport(anyhow!("gh command failed: {}", stderr)),
            });
        }

        Ok(String::from_utf8(output.stdout).context("gh output contains invalid UTF-8")?)
    }

    /// Execute gh api POST with string fields (-f)
    async fn gh_api_post(&self, endpoint: &str, fields: &[(&str, &str)]) -> Result<String, ApiError> {
        let mut args = post_args(endpoint);
        for (key, value) in fields {
            args.push("-f".to_string());
            args.push(format!("{}={}", key, value));
        }
        self.gh_command(&args, None).await
    }
}

fn post_args(endpoint: &str) -> Vec<String> {
    vec![
        "api".to_string(),
        "--method".to_string(),
        "POST".to_string(),
        "-H".to_string(),
        ACCEPT_COMFORT_FADE.to_string(),
        endpoint.to_string(),
    ]
}

/// gh reports failed requests as `gh: <message> (HTTP <status>)`.
fn parse_http_status(stderr: &str) -> Option<u16> {
    let start = stderr.rfind("(HTTP ")? + "(HTTP ".len();
    let rest = &stderr[start..];
    let end = rest.find(')')?;
    rest[..end].trim().parse().ok()
}

#[async_trait]
impl GitHubApi for GhCli {
    async fn create_review(&self, review: &ReviewRequest) -> Result<(), ApiError> {
        let endpoint = format!(
            "repos/{}/{}/pulls/{}/reviews",
            review.owner, review.repo, review.pull_number
        );
        let mut args = post_args(&endpoint);
        args.push("--input".to_string());
        args.push("-".to_string());

        let payload = serde_json::to_vec(review).context("Failed to serialize review")?;
        self.gh_command(&args, Some(&payload)).await?;
        Ok(())
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<(), ApiError> {
        let endpoint = format!("repos/{}/{}/issues/{}/comments", owner, repo, number);
        self.gh_api_post(&endpoint, &[("body", body)]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_http_status() {
        assert_eq!(
            parse_http_status("gh: Validation Failed (HTTP 422)"),
            Some(422)
        );
        assert_eq!(
            parse_http_status("gh: Server Error (HTTP 500)\n"),
            Some(500)
        );
        assert_eq!(parse_http_status("error connecting to api.github.com"), None);
        assert_eq!(parse_http_status("(HTTP abc)"), None);
    }

    #[test]
    fn test_post_args() {
        let args = post_args("repos/o/r/pulls/1/reviews");
        assert_eq!(args[..3], ["api", "--method", "POST"]);
        assert_eq!(args.last().map(String::as_str), Some("repos/o/r/pulls/1/reviews"));
        assert!(args.iter().any(|a| a.contains("comfort-fade")));
    }

    #[test]
    fn test_locate_missing_program() {
        assert!(GhCli::locate("__nonexistent_gh__", "token").is_err());
    }
}
