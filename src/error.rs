use thiserror::Error;

/// Errors raised while turning hunks into comments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Added lines with no context line to attach the suggestion to
    #[error("cannot anchor added lines in {path} (hunk at old line {old_start}): no context line")]
    UnanchoredAddition { path: String, old_start: u32 },
}

/// Missing or malformed CI environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("One or several environment variables are missing")]
    Missing(Vec<&'static str>),
    #[error("`{name}` is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("No access token was set")]
    NoAccessToken,
}

/// Failure reported by a review platform.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}
