//! Model Gateway
//!
//! The single boundary between the advice pipeline and a generative model.
//! The contract is intentionally narrow: given a text prompt, return a text
//! completion or fail.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use advisor_core::gateway::{GenerationOptions, ModelGateway};
//!
//! let gateway = GeminiGateway::from_env()?;
//! let completion = gateway.invoke("VERDICT: ...", &GenerationOptions::default()).await?;
//! ```

mod mock;

pub use mock::{Script, ScriptedGateway};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Sampling parameters sent with each invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model override; `None` uses the gateway's configured model
    #[serde(default)]
    pub model: Option<String>,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Top-k sampling (not every backend honours it)
    #[serde(default = "default_top_k")]
    pub top_k: Option<u32>,
}

fn default_temperature() -> f32 { 0.7 }
fn default_max_tokens() -> u32 { 150 }
fn default_top_p() -> f32 { 0.8 }
#[allow(clippy::unnecessary_wraps)]
fn default_top_k() -> Option<u32> { Some(40) }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

/// Text returned by a successful invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text, possibly empty or off-format
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// Plain completion with no usage data
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
            usage: None,
            finish_reason: Some(FinishReason::Stop),
        }
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Gateway metadata for status reporting
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayInfo {
    /// Backend name (e.g., "Gemini", "Ollama")
    pub name: String,

    /// Model the gateway sends prompts to
    pub model: String,

    /// Whether credentials/endpoint are present at all
    pub configured: bool,
}

/// Strategy trait for model backends
///
/// The pipeline works exclusively through this interface, so any failure
/// surfaces as a `GatewayError` and any success as raw text.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Static description of the backend
    fn info(&self) -> GatewayInfo;

    /// Whether the backend is currently reachable
    async fn health_check(&self) -> bool;

    /// Send a prompt, receive raw completion text
    async fn invoke(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;
}

/// Stand-in used when no backend is configured; every call fails.
#[derive(Clone, Debug)]
pub struct UnconfiguredGateway {
    reason: String,
}

impl UnconfiguredGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl ModelGateway for UnconfiguredGateway {
    fn info(&self) -> GatewayInfo {
        GatewayInfo {
            name: "none".into(),
            model: "none".into(),
            configured: false,
        }
    }

    async fn health_check(&self) -> bool {
        false
    }

    async fn invoke(&self, _prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
        Err(GatewayError::Config(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.max_tokens, 150);
        assert_eq!(opts.top_k, Some(40));
        assert!(opts.model.is_none());
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: GenerationOptions = serde_json::from_str(r#"{"temperature": 0.2}"#).unwrap();
        assert_eq!(opts.temperature, 0.2);
        assert_eq!(opts.max_tokens, 150);
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_always_fails() {
        let gateway = UnconfiguredGateway::new("GEMINI_API_KEY not set");
        assert!(!gateway.info().configured);
        assert!(!gateway.health_check().await);

        let err = gateway
            .invoke("prompt", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
