//! Commit proposals, the mutable plan, and outcome counters.

use std::fmt;

/// One suggested commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitProposal {
    pub message: String,
    pub files: Vec<String>,
}

impl CommitProposal {
    pub fn new(message: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            message: message.into(),
            files,
        }
    }

    /// The message as shown and committed: the full text in multiline mode,
    /// otherwise only the first line.
    pub fn display_message(&self, multiline: bool) -> &str {
        if multiline {
            &self.message
        } else {
            self.message.lines().next().unwrap_or("")
        }
    }
}

/// Ordered pending proposals for one session.
///
/// Positions shift down when an entry is removed, so indices are only
/// meaningful against the plan as last rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPlan {
    proposals: Vec<CommitProposal>,
}

impl CommitPlan {
    pub fn new(proposals: Vec<CommitProposal>) -> Self {
        Self { proposals }
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommitProposal> {
        self.proposals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommitProposal> {
        self.proposals.iter()
    }

    /// Remove the proposal at `index`, shifting later entries down.
    pub fn remove(&mut self, index: usize) -> Option<CommitProposal> {
        if index < self.proposals.len() {
            Some(self.proposals.remove(index))
        } else {
            None
        }
    }

    /// Replace the message at `index`, leaving its files untouched.
    ///
    /// Returns `false` when `index` is out of bounds.
    pub fn replace_message(&mut self, index: usize, message: String) -> bool {
        match self.proposals.get_mut(index) {
            Some(proposal) => {
                proposal.message = message;
                true
            }
            None => false,
        }
    }
}

impl From<Vec<CommitProposal>> for CommitPlan {
    fn from(proposals: Vec<CommitProposal>) -> Self {
        Self::new(proposals)
    }
}

/// Counts of what happened to each proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    committed: usize,
    skipped: usize,
    errored: usize,
}

impl OutcomeTally {
    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn errored(&self) -> usize {
        self.errored
    }

    pub fn record_committed(&mut self) {
        self.committed += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn record_errored(&mut self) {
        self.errored += 1;
    }
}

impl fmt::Display for OutcomeTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commits: {}, Skipped: {}, Errors: {}",
            self.committed, self.skipped, self.errored
        )
    }
}
