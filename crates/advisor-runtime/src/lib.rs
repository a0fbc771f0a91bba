//! # advisor-runtime
//!
//! Concrete model gateways for the financial advice service.
//!
//! ## Gateways
//!
//! - **Gemini** (default): Google Generative Language API over HTTPS
//! - **Ollama** (feature `ollama`): local inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! let gateway = advisor_runtime::gateway_from_env();
//! let pipeline = AdvicePipeline::new(gateway);
//! ```

use std::sync::Arc;

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiGateway};

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaGateway};

// Re-export core types for convenience
pub use advisor_core::{
    Completion, GatewayError, GatewayInfo, GenerationOptions, ModelGateway, UnconfiguredGateway,
};

/// Environment variable selecting the backend
pub const PROVIDER_ENV: &str = "ADVISOR_PROVIDER";

/// Select a gateway from the process environment
pub fn gateway_from_env() -> Arc<dyn ModelGateway> {
    gateway_from_lookup(|key| std::env::var(key).ok())
}

/// Select a gateway through an arbitrary key lookup
///
/// Never fails: a missing key, unknown provider, or disabled feature yields an
/// [`UnconfiguredGateway`], which the pipeline routes to its fallback answers.
pub fn gateway_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Arc<dyn ModelGateway> {
    let provider = lookup(PROVIDER_ENV)
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "gemini".into());

    match provider.as_str() {
        #[cfg(feature = "gemini")]
        "gemini" => {
            let Some(config) = GeminiConfig::from_lookup(&lookup) else {
                tracing::warn!("{} not set - model gateway disabled", gemini::GEMINI_API_KEY_ENV);
                return Arc::new(UnconfiguredGateway::new(format!(
                    "{} is not set",
                    gemini::GEMINI_API_KEY_ENV
                )));
            };
            match GeminiGateway::from_config(config) {
                Ok(gateway) => Arc::new(gateway),
                Err(e) => {
                    tracing::warn!("Gemini initialization failed: {}", e);
                    Arc::new(UnconfiguredGateway::new(e.to_string()))
                }
            }
        }
        #[cfg(feature = "ollama")]
        "ollama" => Arc::new(OllamaGateway::from_config(OllamaConfig::from_lookup(&lookup))),
        other => {
            tracing::warn!(provider = other, "Unknown or disabled model provider");
            Arc::new(UnconfiguredGateway::new(format!(
                "provider '{other}' is not available"
            )))
        }
    }
}

#[cfg(all(test, feature = "gemini"))]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_yields_unconfigured() {
        let gateway = gateway_from_lookup(|_: &str| None);
        assert!(!gateway.info().configured);
    }

    #[test]
    fn test_gemini_selected_by_default() {
        let gateway = gateway_from_lookup(|key: &str| {
            (key == "GEMINI_API_KEY").then(|| "test-key".to_string())
        });
        let info = gateway.info();
        assert_eq!(info.name, "Gemini");
        assert!(info.configured);
    }

    #[test]
    fn test_unknown_provider_yields_unconfigured() {
        let gateway = gateway_from_lookup(|key: &str| match key {
            "ADVISOR_PROVIDER" => Some("openai".into()),
            "GEMINI_API_KEY" => Some("test-key".into()),
            _ => None,
        });
        assert!(!gateway.info().configured);
    }
}
