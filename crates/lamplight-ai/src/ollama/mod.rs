//! Ollama chat client.
//!
//! Implements the `AiClient` trait against a local Ollama server's
//! `/api/chat` endpoint, with optional NDJSON streaming.

mod api;
mod client;
mod config;


pub use client::OllamaClient;
pub use config::OllamaConfig;
