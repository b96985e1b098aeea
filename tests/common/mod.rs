//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

use commit_planner::apply::{Notice, Operator};
use commit_planner::error::OperatorError;
use commit_planner::plan::{CommitPlan, OutcomeTally};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    ///
    /// Identity is set in the repository config so `git commit` works on
    /// machines without a global one.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config
                .set_str("user.name", "Test User")
                .expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the working tree.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Stage the given files and commit them. Returns the commit OID.
    pub fn commit_files(&self, message: &str, files: &[&str]) -> Oid {
        let sig = self.signature();

        let mut index = self.repo.index().expect("Failed to get index");
        for file in files {
            index.add_path(Path::new(file)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());

        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Subject lines of HEAD's history, newest first.
    pub fn log_subjects(&self) -> Vec<String> {
        let mut walk = self.repo.revwalk().expect("Failed to create revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.map(|oid| {
            let commit = self
                .repo
                .find_commit(oid.expect("Failed to walk"))
                .expect("Failed to find commit");
            commit.summary().unwrap_or("").to_string()
        })
        .collect()
    }

    /// Full message of the HEAD commit.
    pub fn head_message(&self) -> String {
        let head = self
            .repo
            .head()
            .expect("Failed to read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit");
        head.message().unwrap_or("").to_string()
    }

    /// Paths changed by the HEAD commit relative to its parent.
    pub fn head_paths(&self) -> Vec<String> {
        let head = self
            .repo
            .head()
            .expect("Failed to read HEAD")
            .peel_to_commit()
            .expect("HEAD is not a commit");
        let tree = head.tree().expect("Failed to read tree");
        let parent_tree = head.parent(0).ok().map(|p| p.tree().expect("Failed to read tree"));

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .expect("Failed to diff");
        let mut paths: Vec<String> = diff
            .deltas()
            .filter_map(|d| d.new_file().path().map(|p| p.display().to_string()))
            .collect();
        paths.sort();
        paths
    }

    /// Install an executable hook script.
    #[cfg(unix)]
    pub fn install_hook(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let hooks = self.dir.path().join(".git/hooks");
        std::fs::create_dir_all(&hooks).expect("Failed to create hooks dir");
        let path = hooks.join(name);
        std::fs::write(&path, script).expect("Failed to write hook");
        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat hook")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to chmod hook");
    }
}

/// Operator that replays scripted answers and records what it was told.
///
/// Runs out of input by returning [`OperatorError::Interrupted`], like a
/// closed terminal.
#[derive(Default)]
pub struct ScriptedOperator {
    inputs: VecDeque<String>,
    pub renders: usize,
    pub notices: Vec<Notice>,
    pub reported: Option<OutcomeTally>,
}

impl ScriptedOperator {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn next(&mut self) -> Result<String, OperatorError> {
        self.inputs.pop_front().ok_or(OperatorError::Interrupted)
    }
}

impl Operator for ScriptedOperator {
    fn render_plan(&mut self, _plan: &CommitPlan, _multiline: bool) {
        self.renders += 1;
    }

    fn read_selection(&mut self) -> Result<String, OperatorError> {
        self.next()
    }

    fn read_confirmation(&mut self) -> Result<String, OperatorError> {
        self.next()
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn report(&mut self, tally: &OutcomeTally) {
        self.reported = Some(*tally);
    }
}
