//! From working-tree diff to a parsed commit plan.
//!
//! A clean tree short-circuits before any prompt is built, so no completion
//! request is made. Otherwise exactly one request is sent, to the model the
//! tier selector picks for the prompt size.

use tracing::{debug, info};

use crate::error::PlanningError;
use crate::git::{DiffOutcome, DiffSource};
use crate::llm::{CompletionClient, Granularity, build_prompt, select_tier};
use crate::plan::model::CommitPlan;
use crate::plan::parser::parse_plan;

/// Knobs for one planning request.
#[derive(Debug, Clone)]
pub struct PlanSettings {
    /// Model asked for before capacity escalation.
    pub model: String,
    pub multiline: bool,
    pub granularity: Granularity,
}

/// Result of planning the current working tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    NoChanges,
    Planned {
        /// Model the completion was requested from.
        model: String,
        plan: CommitPlan,
    },
}

/// Read the diff, request a plan for it, and decode the answer.
pub async fn build_plan<D, C>(
    source: &D,
    client: &C,
    settings: &PlanSettings,
) -> Result<PlanOutcome, PlanningError>
where
    D: DiffSource + ?Sized,
    C: CompletionClient + ?Sized,
{
    let diff = match source.read_diff()? {
        DiffOutcome::Changes(diff) => diff,
        DiffOutcome::NoChanges => return Ok(PlanOutcome::NoChanges),
    };

    let prompt = build_prompt(&diff, settings.multiline, settings.granularity);
    let model = select_tier(&settings.model, prompt.estimated_tokens());
    debug!(
        "Prompt is ~{} tokens, using model {}",
        prompt.estimated_tokens(),
        model
    );

    info!("Requesting commit plan from {}...", model);
    let completion = client.complete(&model, &prompt).await?;
    let plan = CommitPlan::new(parse_plan(&completion)?);

    Ok(PlanOutcome::Planned { model, plan })
}
