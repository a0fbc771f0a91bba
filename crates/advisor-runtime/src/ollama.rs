//! Ollama Gateway
//!
//! Implementation of `ModelGateway` for local Ollama inference.

use advisor_core::{
    error::{GatewayError, Result},
    gateway::{Completion, FinishReason, GatewayInfo, GenerationOptions, ModelGateway},
};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{ChatMessage, request::ChatMessageRequest},
    Ollama,
};

/// Ollama gateway configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Local model name
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            model: "llama3.2".into(),
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("OLLAMA_HOST").unwrap_or(defaults.host),
            port: lookup("OLLAMA_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            model: lookup("OLLAMA_MODEL").unwrap_or(defaults.model),
        }
    }
}

/// Ollama model gateway
pub struct OllamaGateway {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaGateway {
    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Self {
        Self {
            client: Ollama::new(config.host.clone(), config.port),
            config,
        }
    }

    /// Create with default localhost settings
    pub fn localhost() -> Self {
        Self::from_config(OllamaConfig::default())
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    fn info(&self) -> GatewayInfo {
        GatewayInfo {
            name: "Ollama".into(),
            model: self.config.model.clone(),
            configured: true,
        }
    }

    async fn health_check(&self) -> bool {
        match self.client.list_local_models().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                false
            }
        }
    }

    // Sampling options stay with the Modelfile; only the model override applies.
    async fn invoke(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let request =
            ChatMessageRequest::new(model.clone(), vec![ChatMessage::user(prompt.to_string())]);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(Completion {
            content: response.message.content,
            model,
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        })
    }
}
