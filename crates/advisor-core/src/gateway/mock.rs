//! Scripted Gateway
//!
//! Deterministic gateway for tests and demos. Replays a fixed script instead
//! of calling a model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{Completion, GatewayInfo, GenerationOptions, ModelGateway};
use crate::error::{GatewayError, Result};

const SCRIPTED_MODEL: &str = "scripted";

/// What the scripted gateway does on every call
#[derive(Clone, Debug)]
pub enum Script {
    /// Succeed with this text
    Reply(String),
    /// Fail as if the service were down
    Unavailable(String),
    /// Fail as if the service rejected the request
    Error(String),
    /// Sleep, then succeed with this text
    Delayed(Duration, String),
}

/// Gateway returning scripted text or scripted failures
pub struct ScriptedGateway {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self::new(Script::Reply(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(Script::Unavailable(message.into()))
    }

    pub fn slow(delay: Duration, text: impl Into<String>) -> Self {
        Self::new(Script::Delayed(delay, text.into()))
    }

    /// Number of times `invoke` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn info(&self) -> GatewayInfo {
        GatewayInfo {
            name: "Scripted".into(),
            model: SCRIPTED_MODEL.into(),
            configured: true,
        }
    }

    async fn health_check(&self) -> bool {
        !matches!(self.script, Script::Unavailable(_))
    }

    async fn invoke(&self, _prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let model = options.model.as_deref().unwrap_or(SCRIPTED_MODEL);

        match &self.script {
            Script::Reply(text) => Ok(Completion::text(text.clone(), model)),
            Script::Unavailable(msg) => Err(GatewayError::Unavailable(msg.clone())),
            Script::Error(msg) => Err(GatewayError::Model(msg.clone())),
            Script::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(Completion::text(text.clone(), model))
            }
        }
    }
}
