//! Error types for commit-planner modules using thiserror.

use thiserror::Error;

/// Errors from resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is not set. Export it or add it to a .env file")]
    MissingApiKey,
}

/// Errors from reading the working-tree diff.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Not a git repository. Run commit-planner from within a git repository.")]
    NotARepository,

    #[error("git was not found on PATH")]
    GitNotInstalled,

    #[error("Failed to inspect repository: {0}")]
    Repository(#[source] git2::Error),

    #[error("Failed to run git diff: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git diff failed: {stderr}")]
    GitFailed { stderr: String },
}

/// Errors from prompt construction.
#[derive(Error, Debug, PartialEq)]
pub enum PromptError {
    #[error("Granularity must be a number between 0.0 and 1.0, got {0}")]
    GranularityOutOfRange(f64),

    #[error("Invalid granularity '{0}': expected a number between 0.0 and 1.0")]
    InvalidGranularity(String),
}

/// Errors from the completion backend.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Completion request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("Completion backend returned {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to decode completion response: {0}")]
    InvalidBody(String),

    #[error("Failed to get output from the completion backend: response has no message content")]
    MissingContent,
}

/// Errors from decoding a completion into a commit plan.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to parse commit plan: {reason}\n{raw}")]
    MalformedResponse { raw: String, reason: String },

    #[error("Completion contained no commit list")]
    EmptyResponse,
}

/// Errors from committing one proposal.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Proposal lists no files; refusing to commit without an explicit path set")]
    NoPaths,

    #[error("Failed to run git commit: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit failed: {stderr}")]
    GitFailed { stderr: String },
}

/// Errors from editing a proposal message in an external editor.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("No editor configured. Set EDITOR to your preferred editor")]
    NoEditor,

    #[error("Could not parse editor command '{0}'")]
    InvalidEditorCommand(String),

    #[error("Edit buffer I/O failed: {0}")]
    Buffer(#[source] std::io::Error),

    #[error("Failed to launch editor '{editor}': {source}")]
    SpawnFailed {
        editor: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with code {code}")]
    EditorFailed { editor: String, code: i32 },

    #[error("Edit aborted")]
    Aborted,

    #[error("Interrupted")]
    Interrupted,
}

/// Errors from operator interaction.
#[derive(Error, Debug)]
pub enum OperatorError {
    #[error("Invalid selection '{input}': choose a number from 0 to {max}")]
    InvalidSelection { input: String, max: usize },

    #[error("Interrupted")]
    Interrupted,

    #[error("Terminal input failed: {0}")]
    Terminal(String),
}

/// Errors from turning the working tree into a commit plan.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error("Failed to get a commit plan: {0}")]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}
