//! Committing one proposal to the repository.
//!
//! Commits shell out to the system `git` binary so the user's hooks, config,
//! and signing setup all apply.

use std::path::PathBuf;

use tracing::debug;

use crate::error::CommitError;
use crate::git::run_git;

/// Creates a commit from a message scoped to a list of paths.
#[cfg_attr(test, mockall::automock)]
pub trait Committer {
    fn commit(&self, message: &str, files: &[String]) -> Result<(), CommitError>;
}

/// Committer running `git commit -q -m <message> -- <files>`.
///
/// Only the listed paths are committed, taking their current working-tree
/// content; anything else staged stays staged. An empty list is refused
/// rather than committing the whole index.
#[derive(Debug, Clone)]
pub struct GitCommitter {
    workdir: PathBuf,
}

impl GitCommitter {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }
}

impl Committer for GitCommitter {
    fn commit(&self, message: &str, files: &[String]) -> Result<(), CommitError> {
        if files.is_empty() {
            return Err(CommitError::NoPaths);
        }

        let mut args = vec!["commit", "-q", "-m", message, "--"];
        args.extend(files.iter().map(String::as_str));

        let output = run_git(&self.workdir, &args).map_err(CommitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // Some failures (e.g. nothing to commit) only report on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(CommitError::GitFailed {
                stderr: detail.to_string(),
            });
        }

        debug!("git commit: {}", String::from_utf8_lossy(&output.stdout));
        Ok(())
    }
}
