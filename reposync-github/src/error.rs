//! Error types for reposync-github.

use thiserror::Error;

/// All errors that can arise from GitHub API calls.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The API answered with a non-success status code.
    #[error("GitHub returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The request never produced a response (DNS, TLS, connectivity).
    #[error("GitHub request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded as the expected JSON.
    #[error("failed to decode GitHub response: {0}")]
    Decode(#[source] std::io::Error),
}
