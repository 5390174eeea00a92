//! # reposync-sync
//!
//! Repo-sync orchestration: plan the set differences between remote and
//! local checkouts, then archive and clone concurrently, each action
//! reporting through its own sticky status line.
//!
//! Call [`pipeline::run`] with a [`SyncConfig`] to run the whole sync.

pub mod error;
pub mod pipeline;
pub mod plan;
pub mod reporter;
pub mod workdir;

pub use error::SyncError;
pub use pipeline::{run, run_on, SyncConfig, SyncReport};
pub use plan::SyncPlan;
pub use reporter::with_status_line;
