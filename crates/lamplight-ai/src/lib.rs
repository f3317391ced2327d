//! Chat engine for Lamplight.
//!
//! Provides a local Ollama chat-completion client with:
//! - A validated, append-only conversation transcript
//! - A typed tool registry and the built-in lights plugin
//! - Session management with a bounded tool-call loop
//! - NDJSON streaming, timeouts, retries and cancellation
//! - Token usage tracking

pub mod message;
pub mod ollama;
pub mod plugins;
pub mod services;
pub mod session;
pub mod streaming;
pub mod token_tracker;
pub mod tools;
pub mod transcript;

use async_trait::async_trait;

pub use message::{ContentPart, ImageRef, Message, Role};
pub use ollama::{OllamaClient, OllamaConfig};
pub use plugins::{Light, LightsPlugin};
pub use services::ServiceRegistry;
pub use session::{FunctionChoice, RetryPolicy, Session};
pub use token_tracker::TokenTracker;
pub use tools::{ParamKind, ParamSpec, ToolDescriptor, ToolError, ToolRegistry};
pub use transcript::{Transcript, TranscriptError};

/// Receives streamed content deltas as they arrive.
pub type ChunkCallback<'a> = dyn Fn(String) + Send + Sync + 'a;

/// A completion provider: turns a message list into the next assistant
/// message or a request to call tools.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &GenerationOptions,
    ) -> Result<AiResponse, AiError>;

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &GenerationOptions,
        on_chunk: &ChunkCallback<'_>,
    ) -> Result<AiResponse, AiError>;
}

/// A tool as advertised to the provider: name, description and a JSON
/// schema for its arguments.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Sampling options sent with every request. `None` leaves the model default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub top_p: Option<f64>,
}

impl GenerationOptions {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_tokens.is_none() && self.top_p.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AiResponse {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("rate limited by provider")]
    RateLimited,
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("provider timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("session is busy with another request")]
    Busy,
    #[error("model kept calling tools after {0} rounds")]
    ToolDepthExceeded(u32),
    #[error("no completion service registered as '{0}'")]
    UnknownService(String),
    #[error("image error: {0}")]
    Image(String),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl AiError {
    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AiError::Timeout)
    }
}
