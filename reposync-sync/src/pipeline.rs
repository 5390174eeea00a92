//! The whole sync run: list remote, scan local, plan, execute.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use reposync_github::{Client, RepoFilter};
use reposync_sticky::{Block, Part, PartStyle, StatusPart, Terminal, TextPart};

use crate::error::{io_err, SyncError};
use crate::reporter::with_status_line;
use crate::{plan, workdir};

/// Everything a sync run needs.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// GitHub user or organization to sync against.
    pub owner: String,
    /// Directory holding one checkout per repository.
    pub workdir: PathBuf,
    /// Where checkouts without a remote counterpart get moved.
    pub archive_dir: PathBuf,
    /// GitHub token for authentication.
    pub token: String,
    /// Optional language include/exclude filter.
    pub filter: RepoFilter,
    /// Report success without touching anything.
    pub dry_run: bool,
    /// Override the GitHub API base URL (GitHub Enterprise, test servers).
    pub api_base: Option<String>,
}

/// Counts for the caller: actions that completed, plus how many failed.
/// A failed action is counted once, in `failed` only. Individual task
/// failures are surfaced visually on their lines, never as pipeline errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub archived: usize,
    pub cloned: usize,
    pub failed: usize,
}

/// Run a full sync against stdout.
pub fn run(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    run_on(Terminal::stdout(), config)
}

/// Run a full sync, rendering on an explicit terminal.
///
/// Errors out of this function are pipeline-phase errors only: listing the
/// remote side, scanning the local side, or creating the archive directory.
pub fn run_on(term: Terminal, config: &SyncConfig) -> Result<SyncReport, SyncError> {
    let client = match &config.api_base {
        Some(base) => Client::with_base(config.token.clone(), base.clone()),
        None => Client::new(config.token.clone()),
    };

    let block = Block::with_terminal(term.clone(), 1);
    let remote = with_status_line(
        &block.line(0),
        &format!("loading repos for {}", config.owner),
        || {
            client
                .list_repo_names(&config.owner, &config.filter)
                .map_err(SyncError::from)
        },
    )?;

    let block = Block::with_terminal(term.clone(), 1);
    let local = with_status_line(
        &block.line(0),
        &format!("loading repos already cloned in {}", config.workdir.display()),
        || workdir::list_checkouts(&config.workdir),
    )?;

    let plan = plan::build(&remote, &local);
    log::debug!(
        "plan for {}: {} to archive, {} to clone",
        config.owner,
        plan.to_archive.len(),
        plan.to_clone.len()
    );

    if plan.is_empty() {
        let block = Block::with_terminal(term, 1);
        let status = StatusPart::new();
        status.succeed();
        block.line(0).display(vec![
            Box::new(status) as Box<dyn Part>,
            Box::new(TextPart::new(" nothing to do!").with_style(PartStyle::success().bold())),
        ]);
        return Ok(SyncReport::default());
    }

    fs::create_dir_all(&config.archive_dir).map_err(|err| io_err(&config.archive_dir, err))?;

    // One reserved row and one worker per planned action; archives first,
    // clones below them.
    let block = Block::with_terminal(term, plan.len());
    let archive_failures = AtomicUsize::new(0);
    let clone_failures = AtomicUsize::new(0);
    thread::scope(|scope| {
        for (idx, repo) in plan.to_archive.iter().enumerate() {
            let line = block.line(idx as isize);
            let failures = &archive_failures;
            scope.spawn(move || {
                let outcome = with_status_line(&line, &format!("archiving {repo}"), || {
                    if config.dry_run {
                        return Ok(());
                    }
                    workdir::archive(&config.workdir, &config.archive_dir, repo)
                });
                if outcome.is_err() {
                    failures.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
        for (idx, repo) in plan.to_clone.iter().enumerate() {
            let line = block.line((plan.to_archive.len() + idx) as isize);
            let failures = &clone_failures;
            scope.spawn(move || {
                let outcome = with_status_line(&line, &format!("cloning {repo}"), || {
                    if config.dry_run {
                        return Ok(());
                    }
                    workdir::clone_into(&config.owner, repo, &config.workdir)
                });
                if outcome.is_err() {
                    failures.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });

    let archive_failures = archive_failures.into_inner();
    let clone_failures = clone_failures.into_inner();
    Ok(SyncReport {
        archived: plan.to_archive.len() - archive_failures,
        cloned: plan.to_clone.len() - clone_failures,
        failed: archive_failures + clone_failures,
    })
}
