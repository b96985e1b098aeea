//! Reading the uncommitted diff of the working tree.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};
use tracing::debug;

use crate::error::DiffError;
use crate::git::run_git;

/// What the working tree currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Changes(String),
    NoChanges,
}

/// Supplies the current uncommitted diff as opaque text.
pub trait DiffSource {
    fn read_diff(&self) -> Result<DiffOutcome, DiffError>;
}

/// Diff source backed by the `git` binary.
///
/// Reads `git diff HEAD`, or `git diff --cached` when the branch has no
/// commits yet.
#[derive(Debug, Clone)]
pub struct GitDiffSource {
    workdir: PathBuf,
    unborn: bool,
}

impl GitDiffSource {
    /// Locate the repository containing `path`.
    pub fn discover(path: &Path) -> Result<Self, DiffError> {
        if which::which("git").is_err() {
            return Err(DiffError::GitNotInstalled);
        }

        let repo = Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                DiffError::NotARepository
            } else {
                DiffError::Repository(e)
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or(DiffError::NotARepository)?
            .to_path_buf();

        let unborn = match repo.head() {
            Ok(_) => false,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                true
            }
            Err(e) => return Err(DiffError::Repository(e)),
        };

        Ok(Self { workdir, unborn })
    }

    /// Root of the working tree.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn diff_args(&self) -> &'static [&'static str] {
        if self.unborn {
            &["diff", "--cached"]
        } else {
            &["diff", "HEAD"]
        }
    }
}

impl DiffSource for GitDiffSource {
    fn read_diff(&self) -> Result<DiffOutcome, DiffError> {
        let output = run_git(&self.workdir, self.diff_args()).map_err(DiffError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.to_lowercase().contains("not a git repository") {
                return Err(DiffError::NotARepository);
            }
            return Err(DiffError::GitFailed { stderr });
        }

        let diff = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("git diff: {diff}");

        if diff.trim().is_empty() {
            Ok(DiffOutcome::NoChanges)
        } else {
            Ok(DiffOutcome::Changes(diff))
        }
    }
}
