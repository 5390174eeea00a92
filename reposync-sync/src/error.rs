//! Error types for reposync-sync.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use reposync_github::GithubError;

/// All errors that can arise from sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from the GitHub listing client.
    #[error("GitHub error: {0}")]
    Github(#[from] GithubError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git clone` ran but exited unsuccessfully.
    #[error("git clone for '{repo}' exited with {status}")]
    CloneFailed { repo: String, status: ExitStatus },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
