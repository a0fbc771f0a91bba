//! Domain Models
//!
//! Request and result values for a single advice exchange. Nothing here is
//! retained between calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AdviceError, Result};

/// Questions longer than this are accepted, but only this many characters are
/// meaningful to a caller-side counter.
pub const MAX_QUESTION_DISPLAY_CHARS: usize = 500;

/// Hard cap on the length of a reason, in characters
pub const MAX_REASON_CHARS: usize = 150;

/// Binary recommendation
///
/// Defaults to `Dont`: when nothing better is known, spending is not endorsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "DO")]
    Do,
    #[default]
    #[serde(rename = "DON'T")]
    Dont,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Do => "DO",
            Verdict::Dont => "DON'T",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Source {
    /// Parsed from model output
    Model,
    /// Canned answer, model not consulted successfully
    Fallback,
}

/// A validated question
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceRequest {
    question: String,
}

impl AdviceRequest {
    /// Trim and validate; blank input is rejected, long input is not.
    pub fn new(raw: &str) -> Result<Self> {
        let question = raw.trim();
        if question.is_empty() {
            return Err(AdviceError::EmptyQuestion);
        }
        Ok(Self {
            question: question.to_string(),
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn into_question(self) -> String {
        self.question
    }

    pub fn exceeds_display_limit(&self) -> bool {
        self.question.chars().count() > MAX_QUESTION_DISPLAY_CHARS
    }
}

/// A verdict with its justification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub verdict: Verdict,
    pub reason: String,
}

impl Advice {
    pub fn new(verdict: Verdict, reason: impl Into<String>) -> Self {
        Self {
            verdict,
            reason: reason.into(),
        }
    }
}

/// The complete answer returned for one question
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResult {
    /// Trimmed question, echoed back
    pub question: String,

    pub verdict: Verdict,

    /// Sentence-case justification, at most `MAX_REASON_CHARS` characters
    pub reason: String,

    /// When the answer was generated
    pub created_at: DateTime<Utc>,

    pub source: Source,

    /// Model that produced the text, or `"fallback"`
    pub model: String,
}

impl AdviceResult {
    /// Stamp an answer with the current time
    pub fn new(request: AdviceRequest, advice: Advice, source: Source, model: impl Into<String>) -> Self {
        Self {
            question: request.into_question(),
            verdict: advice.verdict,
            reason: advice.reason,
            created_at: Utc::now(),
            source,
            model: model.into(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }
}
