//! Runtime configuration resolved once at startup.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the current directory. The resolved [`Config`] is passed by
//! reference into the completion client, tier selector, and editor; nothing in
//! the library reads the environment on its own.

use std::env;
use std::time::Duration;

use tracing::warn;

pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV_VAR: &str = "OPENAI_API_BASE";
pub const MODEL_ENV_VAR: &str = "COMMIT_PLANNER_MODEL";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
pub const EDITOR_ENV_VAR: &str = "EDITOR";
pub const TIMEOUT_ENV_VAR: &str = "COMMIT_PLANNER_TIMEOUT";

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_EDITOR: &str = "vi";

/// Default completion request timeout (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer key for the completion backend. Only required once a request is sent.
    pub api_key: Option<String>,
    pub api_base: String,
    pub default_model: String,
    pub log_level: String,
    pub editor: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load `.env` (if present) and resolve configuration from the environment.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            warn!("Ignoring unreadable .env file: {e}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: get(API_KEY_ENV_VAR),
            api_base: get(API_BASE_ENV_VAR)
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            default_model: get(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            log_level: get(LOG_LEVEL_ENV_VAR)
                .map(|level| level.to_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            editor: get(EDITOR_ENV_VAR).unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            request_timeout: parse_timeout(get(TIMEOUT_ENV_VAR)),
        }
    }
}

/// Parse the timeout override in seconds.
///
/// Logs a warning and falls back to the default when the value is not a
/// non-negative integer.
fn parse_timeout(value: Option<String>) -> Duration {
    match value {
        Some(v) => match v.trim().parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
