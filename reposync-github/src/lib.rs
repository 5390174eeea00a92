//! # reposync-github
//!
//! Minimal GitHub repository-listing client: paginated list-repos for a
//! user or organization, with token auth and optional language filtering.

pub mod client;
pub mod error;

pub use client::{Client, Repo, RepoFilter};
pub use error::GithubError;
