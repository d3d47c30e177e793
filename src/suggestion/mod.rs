//! Turning diff hunks into suggested-change review comments.
//!
//! Every hunk with at least one added or removed line becomes exactly one
//! [`Comment`], in file order and then hunk order. The only failure is a
//! hunk of pure additions with no context line to anchor to.

mod comment;
mod trim;

pub use comment::{build_comment, normalize_path, HunkShape};
pub use trim::{trim_context, Trimmed};

use serde::Serialize;
use tracing::debug;

use crate::diff::{parse_diff, trim_quotes, DiffFile};
use crate::error::BuildError;

/// Side of the diff a comment is attached to. Suggestions always replace
/// lines of the new file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Right,
}

/// A suggestion anchored to one line or a range of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Forward-slash separated path
    pub path: String,
    /// Last anchored line
    pub line: u32,
    /// First anchored line, only set for multi-line anchors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_side: Option<Side>,
    pub side: Side,
    pub body: String,
    /// Character length of the last anchored line
    pub line_length: usize,
}

impl Comment {
    /// First anchored line, `line` itself for single-line anchors.
    pub fn first_line(&self) -> u32 {
        self.start_line.unwrap_or(self.line)
    }
}

/// Path comments for `file` are attached to, `None` when there is none.
///
/// Piped diffs name the new file `-`, in which case the (possibly quoted)
/// old name is used.
fn comment_path(file: &DiffFile) -> Option<&str> {
    let path = if file.to == "-" {
        trim_quotes(&file.from)
    } else {
        trim_quotes(&file.to)
    };
    match path {
        "" | "-" | "/dev/null" => None,
        path => Some(path),
    }
}

/// Creates one comment per changed hunk.
pub fn build_comments(files: &[DiffFile]) -> Result<Vec<Comment>, BuildError> {
    let mut comments = Vec::new();
    for file in files {
        if file.hunks.is_empty() {
            continue;
        }
        let Some(path) = comment_path(file) else {
            debug!(from = %file.from, to = %file.to, "skipping file without a target path");
            continue;
        };
        for hunk in file.hunks.iter().filter(|h| h.has_changes()) {
            comments.push(build_comment(path, hunk)?);
        }
    }
    Ok(comments)
}

/// Creates suggestions with specified diff.
pub fn make_comments(diff: &str) -> Result<Vec<Comment>, BuildError> {
    build_comments(&parse_diff(diff))
}
