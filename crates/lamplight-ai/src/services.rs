//! Named completion services.
//!
//! Clients are registered under a service id (e.g. `"ollama"`); a session
//! looks its client up by that id. The first registered service becomes the
//! default.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{AiClient, AiError};

#[derive(Default)]
pub struct ServiceRegistry {
    clients: HashMap<String, Arc<dyn AiClient>>,
    default_service: Option<String>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` under `service_id`, replacing any previous client
    /// with that id.
    pub fn register(&mut self, service_id: impl Into<String>, client: Arc<dyn AiClient>) {
        let service_id = service_id.into();
        debug!(service = %service_id, "Registered completion service");
        if self.default_service.is_none() {
            self.default_service = Some(service_id.clone());
        }
        self.clients.insert(service_id, client);
    }

    pub fn set_default(&mut self, service_id: &str) -> Result<(), AiError> {
        if !self.clients.contains_key(service_id) {
            return Err(AiError::UnknownService(service_id.to_string()));
        }
        self.default_service = Some(service_id.to_string());
        Ok(())
    }

    pub fn get(&self, service_id: &str) -> Result<Arc<dyn AiClient>, AiError> {
        self.clients
            .get(service_id)
            .cloned()
            .ok_or_else(|| AiError::UnknownService(service_id.to_string()))
    }

    pub fn default_client(&self) -> Result<Arc<dyn AiClient>, AiError> {
        let id = self
            .default_service
            .as_deref()
            .ok_or_else(|| AiError::UnknownService("<default>".into()))?;
        self.get(id)
    }

    pub fn default_service(&self) -> Option<&str> {
        self.default_service.as_deref()
    }

    /// Registered ids, sorted.
    pub fn service_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.clients.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{AiResponse, ChunkCallback, GenerationOptions, Message, ToolDefinition};

    struct Fixed(&'static str);

    #[async_trait]
    impl AiClient for Fixed {
        async fn send_message(
            &self,
            _messages: &[Message],
            _tools: &[ToolDefinition],
            _options: &GenerationOptions,
        ) -> Result<AiResponse, AiError> {
            Ok(AiResponse {
                content: self.0.to_string(),
                ..Default::default()
            })
        }

        async fn send_message_streaming(
            &self,
            messages: &[Message],
            tools: &[ToolDefinition],
            options: &GenerationOptions,
            _on_chunk: &ChunkCallback<'_>,
        ) -> Result<AiResponse, AiError> {
            self.send_message(messages, tools, options).await
        }
    }

    #[tokio::test]
    async fn first_registered_is_default() {
        let mut services = ServiceRegistry::new();
        services.register("ollama", Arc::new(Fixed("a")));
        services.register("backup", Arc::new(Fixed("b")));

        assert_eq!(services.default_service(), Some("ollama"));
        let reply = services
            .default_client()
            .unwrap()
            .send_message(&[], &[], &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(reply.content, "a");
        assert_eq!(services.service_ids(), ["backup", "ollama"]);
    }

    #[tokio::test]
    async fn lookup_by_id() {
        let mut services = ServiceRegistry::new();
        services.register("ollama", Arc::new(Fixed("a")));
        services.register("backup", Arc::new(Fixed("b")));
        services.set_default("backup").unwrap();

        let reply = services
            .get("backup")
            .unwrap()
            .send_message(&[], &[], &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(reply.content, "b");
        assert_eq!(services.default_service(), Some("backup"));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut services = ServiceRegistry::new();
        assert!(matches!(services.default_client(), Err(AiError::UnknownService(_))));
        assert!(matches!(services.get("openai"), Err(AiError::UnknownService(ref id)) if id == "openai"));
        assert!(services.set_default("openai").is_err());
    }
}
