//! Local checkout scanning, archiving, and cloning.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{io_err, SyncError};

/// Names of direct subdirectories of `dir`, sorted. Non-directories and
/// dot-prefixed names are skipped.
pub fn list_checkouts(dir: &Path) -> Result<Vec<String>, SyncError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| io_err(dir, err))? {
        let entry = entry.map_err(|err| io_err(dir, err))?;
        let file_type = entry.file_type().map_err(|err| io_err(entry.path(), err))?;
        if !file_type.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Move `workdir/repo` to `archive_dir/repo`.
pub fn archive(workdir: &Path, archive_dir: &Path, repo: &str) -> Result<(), SyncError> {
    let from = workdir.join(repo);
    let to = archive_dir.join(repo);
    fs::rename(&from, &to).map_err(|err| io_err(&from, err))
}

/// Clone `git@github.com:{owner}/{repo}` into `workdir/repo`.
///
/// Git's own output is discarded: a subprocess writing to the terminal
/// would scribble over the sticky status region.
pub fn clone_into(owner: &str, repo: &str, workdir: &Path) -> Result<(), SyncError> {
    let remote = format!("git@github.com:{owner}/{repo}");
    let dest = workdir.join(repo);
    let status = Command::new("git")
        .arg("clone")
        .arg(&remote)
        .arg(&dest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|err| io_err("git", err))?;
    if status.success() {
        Ok(())
    } else {
        Err(SyncError::CloneFailed {
            repo: repo.to_string(),
            status,
        })
    }
}
