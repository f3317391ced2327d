//! Ollama client struct, request building, and response parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lamplight_common::new_call_id;
use serde_json::{json, Value};

use crate::tools::to_ollama_tool;
use crate::{
    AiError, AiResponse, GenerationOptions, ImageRef, Message, Role, TokenUsage, ToolCall,
    ToolDefinition,
};

use super::config::OllamaConfig;

const CHAT_PATH: &str = "/api/chat";

/// Ollama `/api/chat` client.
pub struct OllamaClient {
    pub(crate) config: OllamaConfig,
    pub(crate) http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AiError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.config.host.trim_end_matches('/'))
    }

    /// Build the JSON request body for `/api/chat`.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        options: &GenerationOptions,
        stream: bool,
    ) -> Result<Value, AiError> {
        let msgs = messages
            .iter()
            .map(message_to_json)
            .collect::<Result<Vec<_>, _>>()?;

        let mut body = json!({
            "model": self.config.model,
            "messages": msgs,
            "stream": stream,
        });

        if !tools.is_empty() {
            let tool_defs: Vec<_> = tools.iter().map(to_ollama_tool).collect();
            body["tools"] = json!(tool_defs);
        }

        if !options.is_empty() {
            let mut opts = serde_json::Map::new();
            if let Some(t) = options.temperature {
                opts.insert("temperature".into(), json!(t));
            }
            if let Some(n) = options.max_tokens {
                opts.insert("num_predict".into(), json!(n));
            }
            if let Some(p) = options.top_p {
                opts.insert("top_p".into(), json!(p));
            }
            body["options"] = Value::Object(opts);
        }

        Ok(body)
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: &Value) -> Result<AiResponse, AiError> {
        check_error(json)?;
        let message = &json["message"];
        if !message.is_object() {
            return Err(AiError::Parse("response has no 'message' object".into()));
        }
        Ok(AiResponse {
            content: message["content"].as_str().unwrap_or_default().to_string(),
            tool_calls: parse_tool_calls(&message["tool_calls"])?,
            usage: parse_usage(json),
        })
    }
}

fn message_to_json(msg: &Message) -> Result<Value, AiError> {
    let mut out = json!({
        "role": msg.role.as_str(),
        "content": msg.text(),
    });

    let images = msg.images().map(encode_image).collect::<Result<Vec<_>, _>>()?;
    if !images.is_empty() {
        out["images"] = json!(images);
    }

    if msg.role == Role::Assistant && !msg.tool_calls.is_empty() {
        let calls: Vec<_> = msg
            .tool_calls
            .iter()
            .map(|c| json!({"function": {"name": c.name, "arguments": c.arguments}}))
            .collect();
        out["tool_calls"] = json!(calls);
    }

    if let Some(ref name) = msg.tool_name {
        out["tool_name"] = json!(name);
    }

    Ok(out)
}

fn encode_image(image: &ImageRef) -> Result<String, AiError> {
    match image {
        ImageRef::Base64(data) if data.is_empty() => Err(AiError::Image("empty image data".into())),
        ImageRef::Base64(data) => Ok(data.clone()),
        ImageRef::Path(path) => std::fs::read(path)
            .map(|bytes| STANDARD.encode(bytes))
            .map_err(|e| AiError::Image(format!("{}: {e}", path.display()))),
    }
}

/// Surface an `{"error": "..."}` body as a provider error.
fn check_error(json: &Value) -> Result<(), AiError> {
    match json.get("error") {
        Some(Value::String(msg)) => Err(AiError::Provider(msg.clone())),
        Some(Value::Null) | None => Ok(()),
        Some(other) => Err(AiError::Provider(other.to_string())),
    }
}

fn parse_tool_calls(raw: &Value) -> Result<Vec<ToolCall>, AiError> {
    let Some(entries) = raw.as_array() else {
        return Ok(Vec::new());
    };

    entries
        .iter()
        .map(|entry| {
            let function = &entry["function"];
            let name = function["name"]
                .as_str()
                .filter(|n| !n.is_empty())
                .ok_or_else(|| AiError::Parse(format!("tool call without a name: {entry}")))?;

            // Some models send the arguments as a JSON-encoded string.
            let arguments = match &function["arguments"] {
                Value::String(s) if s.trim().is_empty() => Value::Null,
                Value::String(s) => serde_json::from_str(s).map_err(|e| {
                    AiError::Parse(format!("arguments for '{name}' are not JSON: {e}"))
                })?,
                other => other.clone(),
            };

            let id = entry["id"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(new_call_id);

            Ok(ToolCall {
                id,
                name: name.to_string(),
                arguments,
            })
        })
        .collect()
}

fn parse_usage(json: &Value) -> TokenUsage {
    TokenUsage {
        input_tokens: json["prompt_eval_count"].as_u64().unwrap_or(0),
        output_tokens: json["eval_count"].as_u64().unwrap_or(0),
    }
}

/// Folds streamed chunks into one response.
#[derive(Debug, Default)]
pub(crate) struct ChunkAccumulator {
    content: String,
    tool_calls: Vec<ToolCall>,
    usage: TokenUsage,
    done: bool,
}

impl ChunkAccumulator {
    /// Absorb one chunk and return its content delta, if any.
    pub(crate) fn push(&mut self, chunk: &Value) -> Result<Option<String>, AiError> {
        check_error(chunk)?;

        let message = &chunk["message"];
        self.tool_calls.extend(parse_tool_calls(&message["tool_calls"])?);

        if chunk["done"].as_bool().unwrap_or(false) {
            self.done = true;
            self.usage = parse_usage(chunk);
        }

        match message["content"].as_str() {
            Some(delta) if !delta.is_empty() => {
                self.content.push_str(delta);
                Ok(Some(delta.to_string()))
            }
            _ => Ok(None),
        }
    }

    pub(crate) fn finish(self) -> Result<AiResponse, AiError> {
        if !self.done {
            return Err(AiError::Parse("stream ended before the final chunk".into()));
        }
        Ok(AiResponse {
            content: self.content,
            tool_calls: self.tool_calls,
            usage: self.usage,
        })
    }
}
