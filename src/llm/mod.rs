//! Prompt construction, capacity tiers, and the completion backend.

pub mod client;
pub mod json;
pub mod prompt;
pub mod tier;

pub use client::{CompletionClient, OpenAiClient};
pub use json::extract_json;
pub use prompt::{Granularity, PromptRequest, build_prompt, estimate_tokens};
pub use tier::{CAPACITY_TIERS, CapacityTier, select_tier};
