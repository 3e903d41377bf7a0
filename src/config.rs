//! Agent configuration
//!
//! API key, model name and base URL are read once from the environment and
//! injected into the chat client at construction. Nothing here is a shared
//! static.

use std::env;

use crate::error::AgentError;
use crate::Result;

/// Default chat-completions backend (Volcengine Ark).
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com";

/// Configuration for one chat client.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Bearer token for the backend.
    pub api_key: String,
    /// Model identifier (a function-calling capable endpoint).
    pub model: String,
    /// Scheme + host, without the completions path.
    pub base_url: String,
}

impl AgentConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from `EXPENSE_AGENT_API_KEY`, `EXPENSE_AGENT_MODEL`
    /// and optionally `EXPENSE_AGENT_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("EXPENSE_AGENT_API_KEY")
            .map_err(|_| AgentError::Config("EXPENSE_AGENT_API_KEY not configured".to_string()))?;
        let model = env::var("EXPENSE_AGENT_MODEL")
            .map_err(|_| AgentError::Config("EXPENSE_AGENT_MODEL not configured".to_string()))?;

        let mut config = Self::new(api_key, model);
        if let Ok(base_url) = env::var("EXPENSE_AGENT_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_override() {
        let config = AgentConfig::new("key", "model-fc");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = config.with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
