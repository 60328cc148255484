//! Error type shared by the library and the `tagterm` binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TerminalError>;

#[derive(Debug, Error)]
pub enum TerminalError {
    /// `setup` was called on a slot that holds no sink to back up.
    #[error("no error sink installed in the slot")]
    NoErrorSink,

    #[error("host must be a string")]
    HostNotString,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Project manifest could not be read or understood.
    #[error("manifest '{path}': {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TerminalError {
    pub(crate) fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Manifest {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
