use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, error, info};

use super::client::AzureDevOpsApi;
use super::thread::{item_path, transform_comment};
use crate::error::ApiError;
use crate::review::ReviewOptions;
use crate::suggestion::{make_comments, Comment};

/// Posts one comment thread per suggestion for `diff`.
///
/// Suggestions on files that are not part of the latest iteration are
/// skipped. Submission failures are only returned when `options.fail` is set.
pub async fn make_review(
    diff: &str,
    options: &ReviewOptions,
    api: &dyn AzureDevOpsApi,
) -> Result<()> {
    let comments = make_comments(diff)?;
    if comments.is_empty() {
        info!("no suggestions to submit");
        return Ok(());
    }

    match post_threads(&comments, api).await {
        Ok(posted) => {
            info!(threads = posted, "submitted comment threads");
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            if options.fail {
                Err(err.into())
            } else {
                Ok(())
            }
        }
    }
}

async fn post_threads(comments: &[Comment], api: &dyn AzureDevOpsApi) -> Result<usize, ApiError> {
    let iterations = api.pull_request_iterations().await?;
    let iteration = iterations.last().and_then(|i| i.id).unwrap_or(1);

    let changes = api.iteration_changes(iteration).await?;
    let tracking_ids: HashMap<&str, u32> = changes
        .change_entries
        .iter()
        .filter_map(|change| Some((item_path(change)?, change.change_tracking_id.unwrap_or(1))))
        .collect();

    let mut posted = 0;
    for comment in comments {
        let Some(&change_tracking_id) = tracking_ids.get(comment.path.as_str()) else {
            debug!(path = %comment.path, iteration, "file is not part of the latest iteration");
            continue;
        };
        api.create_thread(&transform_comment(comment, iteration, change_tracking_id))
            .await?;
        posted += 1;
    }
    Ok(posted)
}
