//! Capacity tier selection.
//!
//! Each supported model family has a base variant with a context ceiling and
//! an extended variant with a larger window. When a prompt is estimated to
//! exceed the base ceiling, the base model is swapped for the extended one.

use tracing::warn;

/// One row of the capacity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityTier {
    /// Base model identifier.
    pub family: &'static str,
    /// Largest prompt (in estimated tokens) the base model accepts.
    pub ceiling: usize,
    /// Model to use above the ceiling.
    pub extended: &'static str,
}

pub const CAPACITY_TIERS: &[CapacityTier] = &[
    CapacityTier {
        family: "gpt-3.5-turbo",
        ceiling: 4096,
        extended: "gpt-3.5-turbo-16k",
    },
    CapacityTier {
        family: "gpt-4",
        ceiling: 8192,
        extended: "gpt-4-32k",
    },
];

/// Look up the tier whose base variant is exactly `model`.
pub fn tier_for(model: &str) -> Option<&'static CapacityTier> {
    CAPACITY_TIERS.iter().find(|tier| tier.family == model)
}

/// Pick the model to request for a prompt of `estimated_tokens`.
///
/// Models that are not a base variant in [`CAPACITY_TIERS`] (already-extended
/// variants and unknown models alike) are returned unchanged.
pub fn select_tier(requested_model: &str, estimated_tokens: usize) -> String {
    match tier_for(requested_model) {
        Some(tier) if estimated_tokens > tier.ceiling => {
            warn!(
                "Prompt is ~{} tokens, above the {} limit of {}; using {}",
                estimated_tokens, tier.family, tier.ceiling, tier.extended
            );
            tier.extended.to_string()
        }
        _ => requested_model.to_string(),
    }
}
