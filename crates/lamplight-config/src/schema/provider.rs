//! Completion provider connection settings.

use serde::{Deserialize, Serialize};

/// Where the chat-completion endpoint lives and how patiently to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model tag requested from the provider.
    pub model_id: String,
    /// Base URL of the local provider.
    pub host: String,
    /// Name the client is registered under in the service registry.
    pub service_id: String,
    /// Per-request timeout in seconds (valid range: 1-3600).
    pub request_timeout_secs: u32,
    /// TCP connect timeout in seconds (valid range: 1-3600).
    pub connect_timeout_secs: u32,
    /// Extra attempts after a timed-out request (valid range: 0-5).
    pub max_retries: u32,
    /// Delay before the first retry; later retries wait proportionally longer.
    pub retry_backoff_ms: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model_id: "llama3.2:latest".into(),
            host: "http://localhost:11434/".into(),
            service_id: "ollama".into(),
            request_timeout_secs: 120,
            connect_timeout_secs: 10,
            max_retries: 1,
            retry_backoff_ms: 500,
        }
    }
}
