//! Process environment configuration for the agent provider.

use std::env;

use crate::error::DebateError;

pub const API_KEY_VAR: &str = "ELEVENLABS_API_KEY";
pub const AGENT_PRO_VAR: &str = "ELEVENLABS_AGENT_PRO_ID";
pub const AGENT_CON_VAR: &str = "ELEVENLABS_AGENT_CON_ID";

/// Provider connection settings, read once from the environment.
///
/// Missing variables are kept as empty strings so the connection status
/// report can name them; the `require_*` accessors enforce presence
/// before any network call is made.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub api_key: String,
    pub agent_pro: String,
    pub agent_con: String,
}

impl Env {
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_VAR).unwrap_or_default(),
            agent_pro: env::var(AGENT_PRO_VAR).unwrap_or_default(),
            agent_con: env::var(AGENT_CON_VAR).unwrap_or_default(),
        }
    }

    /// (variable name, set) pairs for the connection status report.
    pub fn status(&self) -> [(&'static str, bool); 3] {
        [
            (API_KEY_VAR, !self.api_key.is_empty()),
            (AGENT_PRO_VAR, !self.agent_pro.is_empty()),
            (AGENT_CON_VAR, !self.agent_con.is_empty()),
        ]
    }

    /// API key alone, for the key check.
    pub fn require_api_key(&self) -> Result<&str, DebateError> {
        if self.api_key.is_empty() {
            return Err(DebateError::Config(format!("Missing {API_KEY_VAR}")));
        }
        Ok(&self.api_key)
    }

    /// API key plus the PRO agent, for the hello test.
    pub fn require_pro(&self) -> Result<(&str, &str), DebateError> {
        if self.api_key.is_empty() || self.agent_pro.is_empty() {
            return Err(DebateError::Config(format!(
                "Missing {API_KEY_VAR} or {AGENT_PRO_VAR}"
            )));
        }
        Ok((&self.api_key, &self.agent_pro))
    }

    /// Everything needed for a PRO/CON turn pair.
    pub fn require_all(&self) -> Result<(&str, &str, &str), DebateError> {
        let missing: Vec<&str> = self
            .status()
            .into_iter()
            .filter(|(_, set)| !set)
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(DebateError::Config(format!(
                "Missing {}",
                missing.join(", ")
            )));
        }

        Ok((&self.api_key, &self.agent_pro, &self.agent_con))
    }
}
