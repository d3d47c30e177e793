//! Unified diff parsing.
//!
//! Splits `git diff` output (or piped `diff -u` output) into files and hunks:
//! - File headers (`diff --git`, `---`, `+++`) with timestamps and `a/`/`b/` prefixes removed
//! - Hunk headers (`@@ -old_start,old_lines +new_start,new_lines @@`)
//! - Change lines classified as context, added or removed, with the prefix stripped
//!
//! Parsing never fails: anything that is not recognised is skipped.

use serde::Serialize;
use tracing::{debug, warn};

/// Represents the type of a line in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Line added in the new version (starts with +)
    Added,
    /// Line removed from the old version (starts with -)
    Removed,
    /// Context line, unchanged (starts with space)
    Context,
    /// `\ No newline at end of file`
    NoNewline,
    /// Hunk header (@@ ... @@)
    Header,
    /// Metadata lines (diff --, +++, index, etc.)
    Meta,
}

/// Kind of a change line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Context,
    Added,
    Removed,
}

/// One line of a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub kind: ChangeKind,
    /// Line content without the diff marker
    pub text: String,
    /// Set when the line is followed by `\ No newline at end of file`
    pub no_newline_at_eof: bool,
}

impl Change {
    pub fn new(kind: ChangeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            no_newline_at_eof: false,
        }
    }

    pub fn context(text: impl Into<String>) -> Self {
        Self::new(ChangeKind::Context, text)
    }

    pub fn added(text: impl Into<String>) -> Self {
        Self::new(ChangeKind::Added, text)
    }

    pub fn removed(text: impl Into<String>) -> Self {
        Self::new(ChangeKind::Removed, text)
    }

    pub fn is_context(&self) -> bool {
        self.kind == ChangeKind::Context
    }

    /// Character length of the text.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character length of the line as it appears in the diff, marker included.
    pub fn marked_len(&self) -> usize {
        self.text_len() + 1
    }
}

/// A contiguous block of changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hunk {
    pub old_start: u32,
    pub old_lines: u32,
    pub new_start: u32,
    pub new_lines: u32,
    pub changes: Vec<Change>,
}

impl Hunk {
    /// Whether the hunk contains at least one added or removed line.
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| !c.is_context())
    }
}

/// All hunks of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffFile {
    /// Old path as written in the header (may be quoted for piped diffs)
    pub from: String,
    /// New path; `-` when the diff was piped from stdin
    pub to: String,
    pub hunks: Vec<Hunk>,
}

/// Classify a line and extract its content without the prefix
pub fn classify_line(line: &str) -> (LineType, &str) {
    if line.starts_with("@@") {
        (LineType::Header, line)
    } else if line.starts_with("+++ ")
        || line.starts_with("--- ")
        || line.starts_with("diff ")
        || line.starts_with("index ")
    {
        (LineType::Meta, line)
    } else if let Some(content) = line.strip_prefix('+') {
        (LineType::Added, content)
    } else if let Some(content) = line.strip_prefix('-') {
        (LineType::Removed, content)
    } else if let Some(content) = line.strip_prefix(' ') {
        (LineType::Context, content)
    } else if let Some(content) = line.strip_prefix('\\') {
        (LineType::NoNewline, content.trim_start())
    } else {
        // editors that strip trailing whitespace turn " " into ""
        (LineType::Context, line)
    }
}

/// Parse `@@ -old_start[,old_lines] +new_start[,new_lines] @@`.
/// Omitted counts default to 1.
fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32)> {
    let rest = line.strip_prefix("@@")?.trim_start();
    let end = rest.find("@@")?;
    let mut ranges = rest[..end].split_whitespace();

    let old = ranges.next()?.strip_prefix('-')?;
    let new = ranges.next()?.strip_prefix('+')?;

    let (old_start, old_lines) = parse_range(old)?;
    let (new_start, new_lines) = parse_range(new)?;
    Some((old_start, old_lines, new_start, new_lines))
}

fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}

/// Trims specified string for wrapping quotation marks.
pub fn trim_quotes(p: &str) -> &str {
    let quoted = p.len() >= 2
        && ((p.starts_with('"') && p.ends_with('"')) || (p.starts_with('\'') && p.ends_with('\'')));
    if quoted {
        &p[1..p.len() - 1]
    } else {
        p
    }
}

/// Whether `s` starts with `YYYY-MM-DD`.
fn starts_with_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit)
}

/// Drop the modification time `diff -u` appends to file names.
fn strip_timestamp(name: &str) -> &str {
    let name = name.split('\t').next().unwrap_or(name);
    for (i, c) in name.char_indices() {
        if c.is_whitespace() && starts_with_date(name[i..].trim_start()) {
            return name[..i].trim_end();
        }
    }
    name.trim_end()
}

/// Strip the `a/` or `b/` prefix git puts in front of paths.
///
/// Mnemonic prefixes (`c/`, `i/`, `o/`, `w/`) are only stripped when the file
/// came with a `diff --git` header; piped diffs use paths verbatim.
fn strip_diff_prefix(path: &str, git_header: bool) -> &str {
    let b = path.as_bytes();
    if b.len() > 2 && b[1] == b'/' {
        let known = match b[0] {
            b'a' | b'b' => true,
            b'c' | b'i' | b'o' | b'w' => git_header,
            _ => false,
        };
        if known {
            return &path[2..];
        }
    }
    path
}

/// Parse the file name of a `---` or `+++` line (marker already removed).
fn parse_file_name(rest: &str, git_header: bool) -> String {
    let name = strip_timestamp(rest.trim_start());
    if name == "/dev/null" {
        return name.to_string();
    }
    // git quotes names with special characters, prefix included
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        let inner = &name[1..name.len() - 1];
        let stripped = strip_diff_prefix(inner, git_header);
        if stripped.len() != inner.len() {
            return stripped.to_string();
        }
        return name.to_string();
    }
    strip_diff_prefix(name, git_header).to_string()
}

/// Extract `(from, to)` from a `diff --git a/x b/y` line.
///
/// Prefers the split where both halves are equal (the common non-rename
/// case) so that paths containing spaces survive. Returns `None` when the
/// line is ambiguous; the `---`/`+++` lines fill in the names then.
fn parse_git_header(line: &str) -> Option<(String, String)> {
    let content = line.strip_prefix("diff --git ")?;
    let bytes = content.as_bytes();

    if bytes.len() % 2 == 1 {
        let half = bytes.len() / 2;
        if half > 2 && content.is_char_boundary(half) && bytes[half] == b' ' {
            let (first, second) = (&content[..half], &content[half + 1..]);
            if first.get(2..) == second.get(2..) {
                return Some((
                    strip_diff_prefix(first, true).to_string(),
                    strip_diff_prefix(second, true).to_string(),
                ));
            }
        }
    }

    // rename: split at the only " b/" (or " w/" for mnemonic prefixes)
    let separators: Vec<usize> = content
        .match_indices(" b/")
        .chain(content.match_indices(" w/"))
        .map(|(i, _)| i)
        .collect();
    if let [sep] = separators[..] {
        let (first, second) = (&content[..sep], &content[sep + 1..]);
        return Some((
            strip_diff_prefix(first, true).to_string(),
            strip_diff_prefix(second, true).to_string(),
        ));
    }

    warn!("Failed to parse git diff line: {}", line);
    None
}

/// Line budget of the hunk currently being read.
struct OpenHunk {
    old_remaining: u32,
    new_remaining: u32,
}

impl OpenHunk {
    fn is_done(&self) -> bool {
        self.old_remaining == 0 && self.new_remaining == 0
    }

    fn consume(&mut self, kind: ChangeKind) {
        if kind != ChangeKind::Added {
            self.old_remaining = self.old_remaining.saturating_sub(1);
        }
        if kind != ChangeKind::Removed {
            self.new_remaining = self.new_remaining.saturating_sub(1);
        }
    }
}

/// Kind of a line inside a hunk body, `None` when the line cannot belong to one.
fn change_kind(line: &str) -> Option<ChangeKind> {
    match line.as_bytes().first() {
        Some(b'+') => Some(ChangeKind::Added),
        Some(b'-') => Some(ChangeKind::Removed),
        Some(b' ') | None => Some(ChangeKind::Context),
        Some(_) => None,
    }
}

/// Header state of the file currently being read.
#[derive(Default)]
struct FileState {
    git_header: bool,
    seen_old_name: bool,
    seen_new_name: bool,
}

/// Parse a unified diff into files and hunks, in document order.
pub fn parse_diff(diff: &str) -> Vec<DiffFile> {
    let mut files: Vec<DiffFile> = Vec::new();
    let mut state = FileState::default();
    let mut open: Option<OpenHunk> = None;

    for line in diff.lines() {
        if let Some(budget) = open.as_mut().filter(|h| !h.is_done()) {
            if let Some(kind) = change_kind(line) {
                budget.consume(kind);
                if let Some(hunk) = files.last_mut().and_then(|f| f.hunks.last_mut()) {
                    hunk.changes.push(Change::new(kind, line.get(1..).unwrap_or("")));
                }
                continue;
            }
            // "\ No newline" may sit between removed and added lines
            if line.starts_with('\\') {
                mark_no_newline(&mut files);
                continue;
            }
            debug!("Hunk ended before its line count was reached: {}", line);
            open = None;
        }

        match classify_line(line).0 {
            LineType::NoNewline => mark_no_newline(&mut files),
            LineType::Header => {
                let Some((old_start, old_lines, new_start, new_lines)) = parse_hunk_header(line)
                else {
                    warn!("Failed to parse hunk header: {}", line);
                    open = None;
                    continue;
                };
                if files.is_empty() {
                    files.push(DiffFile::default());
                }
                if let Some(file) = files.last_mut() {
                    file.hunks.push(Hunk {
                        old_start,
                        old_lines,
                        new_start,
                        new_lines,
                        changes: Vec::new(),
                    });
                }
                open = Some(OpenHunk {
                    old_remaining: old_lines,
                    new_remaining: new_lines,
                });
            }
            LineType::Meta if line.starts_with("diff ") => {
                let (from, to) = parse_git_header(line).unwrap_or_default();
                files.push(DiffFile {
                    from,
                    to,
                    hunks: Vec::new(),
                });
                state = FileState {
                    git_header: line.starts_with("diff --git "),
                    ..FileState::default()
                };
                open = None;
            }
            LineType::Meta if line.starts_with("--- ") => {
                let starts_new_file = match files.last() {
                    None => true,
                    Some(file) => !file.hunks.is_empty() || state.seen_old_name,
                };
                if starts_new_file {
                    files.push(DiffFile::default());
                    state = FileState::default();
                }
                state.seen_old_name = true;
                if let Some(file) = files.last_mut() {
                    file.from = parse_file_name(&line[4..], state.git_header);
                }
                open = None;
            }
            LineType::Meta if line.starts_with("+++ ") => {
                if files.is_empty() || state.seen_new_name {
                    files.push(DiffFile::default());
                    state = FileState::default();
                }
                state.seen_new_name = true;
                if let Some(file) = files.last_mut() {
                    file.to = parse_file_name(&line[4..], state.git_header);
                }
                open = None;
            }
            // index, mode, rename, similarity and binary notices
            _ => {}
        }
    }

    files
}

fn mark_no_newline(files: &mut [DiffFile]) {
    if let Some(change) = files
        .last_mut()
        .and_then(|f| f.hunks.last_mut())
        .and_then(|h| h.changes.last_mut())
    {
        change.no_newline_at_eof = true;
    }
}
