pub mod azure;
pub mod config;
pub mod diff;
pub mod error;
pub mod github;
pub mod review;
pub mod suggestion;

#[cfg(test)]
mod fixtures;

pub use diff::{classify_line, parse_diff, DiffFile, Hunk, LineType};
pub use error::{ApiError, BuildError, EnvError};
pub use review::{suggest, Platform, ReviewOptions};
pub use suggestion::{make_comments, Comment, Side};
