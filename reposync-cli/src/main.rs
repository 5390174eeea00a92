//! reposync — sync a local folder with a GitHub user or organization.
//!
//! # Usage
//!
//! ```text
//! reposync --user <name> --dir <path> --archive-dir <path> --token <token>
//!          [--language <lang>] [--language-not <lang>] [--dry-run]
//! ```
//!
//! Repos that exist remotely but not locally are cloned; checkouts with no
//! remote counterpart are moved into the archive directory. Each action
//! reports progress on its own sticky terminal line.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use reposync_github::RepoFilter;
use reposync_sync::{pipeline, SyncConfig};

#[derive(Parser, Debug)]
#[command(
    name = "reposync",
    version,
    about = "Sync a local folder with a GitHub user or organization's repositories",
    long_about = None,
)]
struct Cli {
    /// GitHub user or organization to sync a folder with.
    #[arg(long)]
    user: String,

    /// Directory to put folders for each repo.
    #[arg(long)]
    dir: PathBuf,

    /// Directory to move folders in dir that are not associated with a repo.
    #[arg(long)]
    archive_dir: PathBuf,

    /// GitHub token to use for auth.
    #[arg(long)]
    token: String,

    /// Only sync repos whose primary language matches.
    #[arg(long)]
    language: Option<String>,

    /// Skip repos whose primary language matches.
    #[arg(long)]
    language_not: Option<String>,

    /// Print actions instead of performing them.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SyncConfig {
        owner: cli.user,
        workdir: cli.dir,
        archive_dir: cli.archive_dir,
        token: cli.token,
        filter: RepoFilter {
            language: cli.language,
            language_not: cli.language_not,
        },
        dry_run: cli.dry_run,
        api_base: None,
    };

    let report = pipeline::run(&config).context("sync failed")?;
    log::info!(
        "sync finished: {} archived, {} cloned, {} failed",
        report.archived,
        report.cloned,
        report.failed
    );
    if report.failed > 0 {
        bail!("{} task(s) failed", report.failed);
    }
    Ok(())
}
