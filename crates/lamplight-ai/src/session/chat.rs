//! Async chat methods for Session: the tool-call loop, timeouts, retries
//! and cancellation.

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::tools::ToolRegistry;
use crate::transcript::TranscriptError;
use crate::{AiClient, AiError, AiResponse, ChunkCallback, Message, ToolCall, ToolDefinition};

use super::manager::Session;
use super::types::BusyGuard;

impl Session {
    /// Send a user message and get the assistant's reply, running any tools
    /// the model asks for along the way.
    pub async fn chat(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        self.run_turn(client, Message::user(user_message), None).await
    }

    /// Like [`Session::chat`], for a prebuilt message (e.g. text plus images).
    pub async fn chat_message(
        &mut self,
        client: &dyn AiClient,
        message: Message,
    ) -> Result<String, AiError> {
        self.run_turn(client, message, None).await
    }

    /// Stream content deltas to `on_chunk` while the reply is generated.
    pub async fn chat_streaming(
        &mut self,
        client: &dyn AiClient,
        message: Message,
        on_chunk: &ChunkCallback<'_>,
    ) -> Result<String, AiError> {
        self.run_turn(client, message, Some(on_chunk)).await
    }

    /// Run a turn that stops with [`AiError::Cancelled`] as soon as `cancel`
    /// fires. A cancelled turn leaves the transcript untouched.
    pub async fn chat_cancellable(
        &mut self,
        client: &dyn AiClient,
        message: Message,
        cancel: &CancellationToken,
    ) -> Result<String, AiError> {
        let id = self.id.clone();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(session = %id, "Turn cancelled");
                Err(AiError::Cancelled)
            }
            result = self.run_turn(client, message, None) => result,
        }
    }

    async fn run_turn(
        &mut self,
        client: &dyn AiClient,
        user: Message,
        on_chunk: Option<&ChunkCallback<'_>>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        if !user.has_content() {
            return Err(TranscriptError::EmptyContent.into());
        }

        let active = self.active_tools();
        let tools = self.tool_definitions();
        let mut working = self.build_messages(&user);
        // Messages committed to the transcript when the turn succeeds.
        let mut pending = vec![user];
        let mut rounds = 0;

        loop {
            let response = self.complete(client, &working, &tools, on_chunk).await?;
            self.tracker.record(&self.service, response.usage);

            let registry = match active.as_deref() {
                Some(registry) if !response.tool_calls.is_empty() => registry,
                _ => {
                    if response.content.trim().is_empty() {
                        return Err(AiError::Provider("model returned an empty reply".into()));
                    }
                    pending.push(Message::assistant(response.content.clone()));
                    self.transcript.extend_atomic(pending)?;
                    debug!(session = %self.id, rounds, messages = self.transcript.len(), "Turn complete");
                    return Ok(response.content);
                }
            };

            rounds += 1;
            if rounds > self.max_tool_rounds {
                warn!(session = %self.id, max = self.max_tool_rounds, "Tool-call limit reached");
                return Err(AiError::ToolDepthExceeded(self.max_tool_rounds));
            }

            working.push(Message::tool_request(
                response.content.clone(),
                response.tool_calls.clone(),
            ));
            for call in &response.tool_calls {
                let output = self.dispatch(registry, call);
                let result = Message::tool_result(call.name.clone(), output);
                working.push(result.clone());
                pending.push(result);
            }
        }
    }

    /// One provider call under the session deadline, retried on timeout.
    async fn complete(
        &self,
        client: &dyn AiClient,
        messages: &[Message],
        tools: &[ToolDefinition],
        on_chunk: Option<&ChunkCallback<'_>>,
    ) -> Result<AiResponse, AiError> {
        let mut attempt = 0;
        loop {
            let call = async {
                match on_chunk {
                    Some(on_chunk) => {
                        client
                            .send_message_streaming(messages, tools, &self.options, on_chunk)
                            .await
                    }
                    None => client.send_message(messages, tools, &self.options).await,
                }
            };
            let result = tokio::time::timeout(self.request_timeout, call)
                .await
                .unwrap_or(Err(AiError::Timeout));

            match result {
                // Streamed deltas may already be on screen; never replay them.
                Err(e) if e.is_retryable() && on_chunk.is_none() && attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(session = %self.id, attempt, ?delay, error = %e, "Retrying provider call");
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }

    /// Run one tool call. Failures are reported back to the model as an
    /// `{"error": ...}` result rather than ending the turn.
    fn dispatch(&self, registry: &ToolRegistry, call: &ToolCall) -> String {
        debug!(session = %self.id, tool = %call.name, id = %call.id, "Executing tool");
        match registry.invoke(&call.name, &call.arguments) {
            Ok(value) => value.to_string(),
            Err(e) => {
                warn!(session = %self.id, tool = %call.name, error = %e, "Tool call failed");
                json!({ "error": e.to_string() }).to_string()
            }
        }
    }
}
