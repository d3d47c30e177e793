mod client;
mod env;
mod review;

pub use client::{GhCli, GitHubApi};
pub use env::{GitHubEnv, TOKEN_VAR};
pub use review::{fallback_body, make_review, ReviewComment, ReviewRequest, FALLBACK_HEADING};
