//! # advisor-core
//!
//! Provider-agnostic boundary between the advice pipeline and a generative model.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     AdvicePipeline                        │
//! │        prompt ──▶ ModelGateway ──▶ raw text | error       │
//! └──────────────────────────────────────────────────────────┘
//!                          │
//!        ┌─────────────────┼──────────────────┐
//!   GeminiGateway    OllamaGateway    UnconfiguredGateway / ScriptedGateway
//! ```
//!
//! The `ModelGateway` trait lets the pipeline swap backends (or a scripted
//! double in tests) without changing any decision logic.

pub mod error;
pub mod gateway;

pub use error::{ErrorKind, GatewayError, Result};
pub use gateway::{
    Completion, GatewayInfo, GenerationOptions, ModelGateway, ScriptedGateway,
    UnconfiguredGateway,
};
