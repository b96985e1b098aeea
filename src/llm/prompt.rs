//! Prompt construction for commit planning.
//!
//! The prompt is pure composition: a fixed system instruction describing the
//! JSON contract, and a user payload carrying the diff verbatim together with
//! the multiline flag and the requested granularity. The diff is never
//! truncated here; if a hard ceiling ever needs enforcing it belongs to the
//! caller.

use std::fmt;
use std::str::FromStr;

use crate::error::PromptError;

/// How finely the diff should be split, from 0.0 (few large commits) to 1.0
/// (many small commits).
///
/// Values outside `[0.0, 1.0]` and NaN are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Granularity(f64);

impl Granularity {
    pub const COARSEST: Granularity = Granularity(0.0);
    pub const FINEST: Granularity = Granularity(1.0);

    pub fn new(value: f64) -> Result<Self, PromptError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PromptError::GranularityOutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity(0.5)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl FromStr for Granularity {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| PromptError::InvalidGranularity(s.to_string()))?;
        Granularity::new(value)
    }
}

/// A composed request ready for the completion backend.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system: String,
    pub user: String,
}

impl PromptRequest {
    /// Estimated token length of both messages.
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.system) + estimate_tokens(&self.user)
    }
}

/// Estimate token count from text (~4 bytes per token heuristic).
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

const SYSTEM_PROMPT: &str = r#"You are now the following function:
```
generate_commit_plan(diff: str, multiline: bool = False, granularity: float = 0.5) -> str
```

It splits the output of `git diff` into commits and writes a commit message for each.

## Rules
- Return a JSON array. Each element is an object with exactly two fields:
  - "message": the commit message
  - "files": a list of the file paths (as they appear in the diff) that belong to this commit
- One commit per logical change.
- `granularity` controls how finely to split: 0.0 is extremely coarse-grained (few, large commits), 1.0 is extremely fine-grained (many, small commits).
- Write messages that are generally considered desirable, informed by 5W1H (who, what, when, where, why, how).
- Use a prefix commonly used in commit messages (e.g. "Add", "Fix", "Refactor", "Update", "Remove", or a conventional-commit type).
- The first letter of the first line must be capitalized.
- Do not end the first line with a period.
- Do not end `message` with a blank line.
- If `multiline` is true, `message` should be a multiline string: a subject line, a blank line, then a body. Otherwise `message` is a single line.

## Output Format
Only respond with the return value. Not code, no markdown, no explanation. Other text will be ignored.
[
  {"message": "<commit message>", "files": ["file1", "file2"]},
  {"message": "<commit message>", "files": ["file3"]}
]"#;

/// Build the system instruction and user payload for one planning request.
pub fn build_prompt(diff: &str, multiline: bool, granularity: Granularity) -> PromptRequest {
    let user = format!(
        "multiline={multiline}\ngranularity={}\ndiff=\n{diff}",
        granularity.value()
    );

    PromptRequest {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}
