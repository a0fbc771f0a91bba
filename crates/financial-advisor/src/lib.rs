//! # financial-advisor
//!
//! Conservative DO / DON'T advice for free-text financial questions.
//!
//! ## Philosophy
//!
//! The model is consulted, never trusted blindly:
//!
//! - **Fixed schema** - Every answer is a verdict plus a short reason, whatever the model wrote
//! - **Conservative default** - Ambiguous or malformed output resolves to DON'T
//! - **Always answer** - A failed or slow model yields a canned answer tagged `FALLBACK`
//! - **No state** - Each question is handled in isolation
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  "Should I buy a $2000 TV?"                                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  PromptBuilder   ─▶ VERDICT:/REASON: instruction block      │
//! │  ModelGateway    ─▶ raw text            (or any failure)    │
//! │  ResponseParser  ─▶ {DON'T, "Build an emergency fund..."}   │
//! │  FallbackSelector ─▶ canned answer      (on failure only)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  AdviceResult { question, verdict, reason, createdAt,       │
//! │                 source: MODEL | FALLBACK, model }           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod fallback;
pub mod history;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompt;

pub use error::{AdviceError, Result};
pub use fallback::{Chooser, FallbackSelector, FixedChooser, ThreadRngChooser};
pub use history::{HistoryStore, NoopHistory};
pub use model::{Advice, AdviceRequest, AdviceResult, Source, Verdict};
pub use parser::ResponseParser;
pub use pipeline::{AdvicePipeline, PipelineConfig};
pub use prompt::PromptBuilder;
