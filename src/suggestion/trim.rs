use crate::diff::Change;

/// Result of [`trim_context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed<'a> {
    /// Changes from the first to the last non-context line, inclusive
    pub changes: &'a [Change],
    /// Context lines before the first change
    pub leading: usize,
    /// Context lines after the last change
    pub trailing: usize,
}

/// Trims context from specified changes.
///
/// A hunk made only of context lines trims to nothing, with both counts equal
/// to its length.
pub fn trim_context(changes: &[Change]) -> Trimmed<'_> {
    let Some(first) = changes.iter().position(|c| !c.is_context()) else {
        return Trimmed {
            changes: &[],
            leading: changes.len(),
            trailing: changes.len(),
        };
    };
    // a non-context line exists, so rposition always finds one
    let last = changes
        .iter()
        .rposition(|c| !c.is_context())
        .unwrap_or(first);

    Trimmed {
        changes: &changes[first..=last],
        leading: first,
        trailing: changes.len() - last - 1,
    }
}
