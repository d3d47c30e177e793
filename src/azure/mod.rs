//! Posting suggestions as Azure DevOps pull request comment threads.

mod client;
mod env;
mod review;
mod thread;

pub use client::{AzureDevOpsApi, AzureRestClient};
pub use env::{AzureEnv, TOKEN_VAR};
pub use review::make_review;
pub use thread::{
    item_path, transform_comment, ChangeEntry, ChangeItem, CommentThread, FilePosition,
    Iteration, IterationChanges, IterationContext, PullRequestThreadContext, ThreadComment,
    ThreadContext,
};
