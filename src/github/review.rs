use anyhow::Result;
use serde::Serialize;
use tracing::{error, info, warn};

use super::client::GitHubApi;
use super::env::GitHubEnv;
use crate::error::ApiError;
use crate::review::ReviewOptions;
use crate::suggestion::{make_comments, Comment, Side};

/// Heading of the plain comment posted when a review is rejected.
pub const FALLBACK_HEADING: &str = "Changes were made in the following files:";

/// A pull request review carrying suggestions.
///
/// `owner`, `repo` and `pull_number` address the endpoint and are not part
/// of the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    #[serde(skip)]
    pub owner: String,
    #[serde(skip)]
    pub repo: String,
    #[serde(skip)]
    pub pull_number: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub comments: Vec<ReviewComment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewComment {
    pub path: String,
    pub line: u32,
    pub side: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<Side>,
    pub body: String,
}

impl From<&Comment> for ReviewComment {
    fn from(comment: &Comment) -> Self {
        Self {
            path: comment.path.clone(),
            line: comment.line,
            side: comment.side,
            start_line: comment.start_line,
            start_side: comment.start_side,
            body: comment.body.clone(),
        }
    }
}

impl ReviewRequest {
    pub fn new(env: &GitHubEnv, message: Option<String>, comments: &[Comment]) -> Self {
        Self {
            owner: env.owner.clone(),
            repo: env.repo.clone(),
            pull_number: env.pull_number,
            event: "COMMENT",
            body: message,
            comments: comments.iter().map(ReviewComment::from).collect(),
        }
    }
}

/// Body of the issue comment posted in place of a rejected review.
pub fn fallback_body(message: Option<&str>, comments: &[Comment]) -> String {
    let mut paths: Vec<&str> = Vec::new();
    for comment in comments {
        if !paths.contains(&comment.path.as_str()) {
            paths.push(&comment.path);
        }
    }

    let mut body = String::new();
    if let Some(message) = message.filter(|m| !m.is_empty()) {
        body.push_str(message);
        body.push_str("\n\n");
    }
    body.push_str(FALLBACK_HEADING);
    body.push('\n');
    for path in paths {
        body.push_str(&format!("\n- `{}`", path));
    }
    body.push('\n');
    body
}

/// Status codes GitHub answers with when a review cannot be attached to the diff.
fn should_fall_back(err: &ApiError) -> bool {
    matches!(err.status(), Some(422 | 500))
}

/// Submits a review with suggestions for `diff`.
///
/// Submission failures are logged together with the payload and only
/// returned when `options.fail` is set. Diffs that cannot be turned into
/// suggestions always fail.
pub async fn make_review(
    diff: &str,
    options: &ReviewOptions,
    env: &GitHubEnv,
    api: &dyn GitHubApi,
) -> Result<()> {
    let comments = make_comments(diff)?;
    if comments.is_empty() {
        info!("no suggestions to submit");
        return Ok(());
    }

    let review = ReviewRequest::new(env, options.message.clone(), &comments);
    let result = match api.create_review(&review).await {
        Err(err) if should_fall_back(&err) => {
            warn!(%err, "review was rejected, posting a comment instead");
            let body = fallback_body(options.message.as_deref(), &comments);
            api.create_issue_comment(&env.owner, &env.repo, env.pull_number, &body)
                .await
        }
        result => result,
    };

    match result {
        Ok(()) => {
            info!(
                comments = review.comments.len(),
                pull_number = env.pull_number,
                "submitted review"
            );
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            match serde_json::to_string_pretty(&review) {
                Ok(payload) => error!(
                    owner = %review.owner,
                    repo = %review.repo,
                    pull_number = review.pull_number,
                    "review payload:\n{}",
                    payload
                ),
                Err(e) => warn!("Failed to serialize review payload: {}", e),
            }
            if options.fail {
                Err(err.into())
            } else {
                Ok(())
            }
        }
    }
}
