//! Git collaborators: reading the working-tree diff and creating commits.

pub mod committer;
pub mod diff;

use std::io;
use std::path::Path;
use std::process::{Command, Output};

pub use committer::{Committer, GitCommitter};
pub use diff::{DiffOutcome, DiffSource, GitDiffSource};

/// Run `git` with `args` inside `workdir`, capturing its output.
pub(crate) fn run_git(workdir: &Path, args: &[&str]) -> io::Result<Output> {
    Command::new("git").args(args).current_dir(workdir).output()
}
