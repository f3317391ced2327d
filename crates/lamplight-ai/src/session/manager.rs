//! Session struct and conversation management.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use lamplight_common::SessionId;

use crate::token_tracker::TokenTracker;
use crate::tools::ToolRegistry;
use crate::transcript::Transcript;
use crate::{GenerationOptions, Message, ToolDefinition};

use super::types::{FunctionChoice, RetryPolicy};

/// A conversation session with a transcript and tool execution.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) transcript: Transcript,
    /// System prompt (prepended to every provider call, never stored).
    pub(super) system_prompt: Option<String>,
    pub(super) tools: Option<Arc<ToolRegistry>>,
    pub(super) function_choice: FunctionChoice,
    pub(super) options: GenerationOptions,
    pub(super) tracker: TokenTracker,
    /// Maximum tool-call rounds per user turn.
    pub(super) max_tool_rounds: u32,
    /// Deadline for each provider call.
    pub(super) request_timeout: Duration,
    pub(super) retry: RetryPolicy,
    /// Service id for token tracking.
    pub(super) service: String,
    /// Whether the session is currently processing a request.
    pub(super) busy: AtomicBool,
}

impl Session {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            transcript: Transcript::new(),
            system_prompt: None,
            tools: None,
            function_choice: FunctionChoice::Auto,
            options: GenerationOptions::default(),
            tracker: TokenTracker::new(),
            max_tool_rounds: 5,
            request_timeout: Duration::from_secs(120),
            retry: RetryPolicy::default(),
            service: service.into(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_tools(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tools = Some(registry);
        self
    }

    pub fn with_function_choice(mut self, choice: FunctionChoice) -> Self {
        self.function_choice = choice;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Start from an existing transcript instead of an empty one.
    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcript = transcript;
        self
    }

    /// The registry the model may call into, if tools are enabled.
    pub(super) fn active_tools(&self) -> Option<Arc<ToolRegistry>> {
        match self.function_choice {
            FunctionChoice::Auto => self.tools.clone(),
            FunctionChoice::None => None,
        }
    }

    pub(crate) fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.active_tools()
            .map(|registry| registry.definitions())
            .unwrap_or_default()
    }

    /// System prompt, then the transcript, then `pending`.
    pub(crate) fn build_messages(&self, pending: &Message) -> Vec<Message> {
        let mut msgs = Vec::with_capacity(self.transcript.len() + 2);
        if let Some(ref system) = self.system_prompt {
            msgs.push(Message::system(system.clone()));
        }
        msgs.extend(self.transcript.all().cloned());
        msgs.push(pending.clone());
        msgs
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Forget the conversation, keeping settings and tools.
    pub fn clear(&mut self) {
        self.transcript = Transcript::new();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("default")
    }
}
