//! The commit plan: proposals decoded from a completion.

pub mod model;
pub mod parser;
pub mod pipeline;

pub use model::{CommitPlan, CommitProposal, OutcomeTally};
pub use parser::parse_plan;
pub use pipeline::{PlanOutcome, PlanSettings, build_plan};
