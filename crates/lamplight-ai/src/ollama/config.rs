//! Ollama client configuration.

use std::time::Duration;

/// Where the Ollama server lives and which model to ask.
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub host: String,
    pub model: String,
    /// Whole-request timeout enforced by the HTTP client.
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl OllamaConfig {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            model: model.into(),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::new("http://localhost:11434/", "llama3.2:latest")
    }
}
