//! AiClient trait implementation for OllamaClient (send_message + streaming).

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::streaming::{map_transport_error, parse_ndjson_stream};
use crate::{AiClient, AiError, AiResponse, ChunkCallback, GenerationOptions, Message, ToolDefinition};

use super::client::{ChunkAccumulator, OllamaClient};

impl OllamaClient {
    async fn post(&self, body: &Value) -> Result<reqwest::Response, AiError> {
        let response = self
            .http
            .post(self.chat_url())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::Provider(format!("HTTP {status}: {text}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl AiClient for OllamaClient {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &GenerationOptions,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools, options, false)?;

        debug!(model = %self.config.model, messages = messages.len(), tools = tools.len(), "Ollama request");

        let response = self.post(&body).await?;
        let json: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::Parse(e.to_string())
            }
        })?;

        self.parse_response(&json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &GenerationOptions,
        on_chunk: &ChunkCallback<'_>,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools, options, true)?;

        debug!(model = %self.config.model, messages = messages.len(), "Ollama streaming request");

        let response = self.post(&body).await?;

        let mut acc = ChunkAccumulator::default();
        parse_ndjson_stream(response, |chunk| {
            if let Some(delta) = acc.push(&chunk)? {
                on_chunk(delta);
            }
            Ok(())
        })
        .await?;

        let response = acc.finish()?;
        if response.usage.total_tokens() == 0 {
            warn!("No usage data received in streaming response");
        }
        Ok(response)
    }
}
