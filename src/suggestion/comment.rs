use std::iter;

use tracing::debug;

use super::trim::trim_context;
use super::{Comment, Side};
use crate::diff::{Change, ChangeKind, Hunk};
use crate::error::BuildError;

const FENCE_OPEN: &str = "```suggestion";
const FENCE_CLOSE: &str = "```";

/// What a hunk does to the file, which decides how its comment is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkShape {
    /// Only added lines; anchored to a neighbouring context line
    Additions,
    /// Only removed lines; the suggestion is empty
    Deletions,
    /// Both, or neither (degenerate context-only hunk)
    Mixed,
}

impl HunkShape {
    pub fn of(hunk: &Hunk) -> Self {
        let has = |kind| hunk.changes.iter().any(|c| c.kind == kind);
        match (has(ChangeKind::Added), has(ChangeKind::Removed)) {
            (true, false) => Self::Additions,
            (false, true) => Self::Deletions,
            _ => Self::Mixed,
        }
    }
}

/// Creates a suggestion comment for one hunk of `path`.
///
/// Line numbers refer to the file the diff was made against, which is the
/// revision under review.
pub fn build_comment(path: &str, hunk: &Hunk) -> Result<Comment, BuildError> {
    let path = normalize_path(path);
    let comment = match HunkShape::of(hunk) {
        HunkShape::Additions => additions(path, hunk)?,
        HunkShape::Deletions => deletions(path, hunk),
        HunkShape::Mixed => mixed(path, hunk),
    };
    debug!(
        path = %comment.path,
        line = comment.line,
        start_line = ?comment.start_line,
        "built suggestion"
    );
    Ok(comment)
}

/// Windows diff headers may use backslashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn suggestion_body<'a>(lines: impl IntoIterator<Item = &'a Change>) -> String {
    let content = lines
        .into_iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    format!("{FENCE_OPEN}\n{content}\n{FENCE_CLOSE}\n")
}

fn as_line(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn additions(path: String, hunk: &Hunk) -> Result<Comment, BuildError> {
    let trimmed = trim_context(&hunk.changes);
    let span = trimmed.changes;
    // context between disjoint runs of added lines widens the anchor
    let inner_context = as_line(span.iter().filter(|c| c.is_context()).count());

    if trimmed.leading > 0 {
        let anchor = &hunk.changes[trimmed.leading - 1];
        let start_line = hunk.old_start.saturating_add(as_line(trimmed.leading - 1));
        return Ok(Comment::new(
            path,
            start_line,
            start_line.saturating_add(inner_context),
            suggestion_body(iter::once(anchor).chain(span)),
            anchor.text_len(),
        ));
    }

    if let Some(anchor) = hunk.changes.get(span.len()) {
        return Ok(Comment::new(
            path,
            hunk.old_start,
            hunk.old_start.saturating_add(inner_context),
            suggestion_body(span.iter().chain(iter::once(anchor))),
            anchor.text_len(),
        ));
    }

    // added lines on both ends: anchor to the context lines between them
    match span.iter().rev().find(|c| c.is_context()) {
        Some(last_context) => Ok(Comment::new(
            path,
            hunk.old_start,
            hunk.old_start.saturating_add(inner_context - 1),
            suggestion_body(span),
            last_context.text_len(),
        )),
        None => Err(BuildError::UnanchoredAddition {
            path,
            old_start: hunk.old_start,
        }),
    }
}

fn deletions(path: String, hunk: &Hunk) -> Comment {
    let mut old_line = hunk.old_start;
    let mut first = None;
    let mut last = None;
    for change in &hunk.changes {
        if change.kind == ChangeKind::Removed {
            first.get_or_insert(old_line);
            last = Some((old_line, change));
        }
        if change.kind != ChangeKind::Added {
            old_line = old_line.saturating_add(1);
        }
    }

    match (first, last) {
        (Some(start_line), Some((line, removed))) => Comment::new(
            path,
            start_line,
            line,
            format!("{FENCE_OPEN}\n{FENCE_CLOSE}\n"),
            removed.text_len(),
        ),
        _ => mixed(path, hunk),
    }
}

fn mixed(path: String, hunk: &Hunk) -> Comment {
    let trimmed = trim_context(&hunk.changes);
    let line = hunk
        .old_start
        .saturating_add(hunk.old_lines)
        .saturating_sub(as_line(trimmed.trailing).saturating_add(1));
    let start_line = hunk.old_start.saturating_add(as_line(trimmed.leading));
    let line_length = trimmed
        .changes
        .iter()
        .rev()
        .find(|c| c.kind != ChangeKind::Added)
        .map_or(0, Change::marked_len);

    Comment::new(
        path,
        start_line,
        line,
        suggestion_body(
            trimmed
                .changes
                .iter()
                .filter(|c| c.kind != ChangeKind::Removed),
        ),
        line_length,
    )
}

impl Comment {
    fn new(path: String, start_line: u32, line: u32, body: String, line_length: usize) -> Self {
        let is_range = start_line != line;
        Self {
            path,
            line,
            start_line: is_range.then_some(start_line),
            start_side: is_range.then_some(Side::Right),
            side: Side::Right,
            body,
            line_length,
        }
    }
}
