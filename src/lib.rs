//! commit-planner - Split an uncommitted diff into reviewed commits.
//!
//! # Overview
//!
//! commit-planner reads the working-tree diff, asks an OpenAI-compatible
//! model to group it into commit proposals, and walks the operator through
//! accepting, rejecting, or editing each proposal. Accepted proposals are
//! committed one at a time; a failing commit is counted and the session
//! moves on.

pub mod apply;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod logging;
pub mod plan;

// Re-export commonly used types
pub use apply::{ApplyEngine, ExternalEditor, Interrupt, MessageEditor, Operator, TerminalOperator};
pub use config::Config;
pub use error::{
    CommitError, CompletionError, ConfigError, DiffError, EditError, OperatorError, PlanError,
    PlanningError, PromptError,
};
pub use git::{Committer, DiffOutcome, DiffSource, GitCommitter, GitDiffSource};
pub use llm::{CompletionClient, Granularity, OpenAiClient, PromptRequest};
pub use plan::{CommitPlan, CommitProposal, OutcomeTally, PlanOutcome, PlanSettings, build_plan};
