//! Response Parser
//!
//! Coerces free-form model text into an [`Advice`]. Parsing is total: every
//! input, including empty or garbled text, yields a verdict and a non-empty
//! reason.
//!
//! ```text
//! raw text ─▶ lines ─▶ verdict rules ─┐
//!                    └▶ reason rules ─┴▶ default ─▶ normalize ─▶ Advice
//! ```

mod rules;

pub use rules::{
    LabeledReason, LabeledVerdict, LongestLine, ReasonRule, VerdictRule,
    MIN_UNLABELED_REASON_CHARS, NEGATIVE_TOKENS,
};

use crate::model::{Advice, Verdict, MAX_REASON_CHARS};
use rules::{default_reason, sentence_case, truncate_chars};

/// Ordered rule lists; the first rule that produces a value wins
pub struct ResponseParser {
    verdict_rules: Vec<Box<dyn VerdictRule>>,
    reason_rules: Vec<Box<dyn ReasonRule>>,
    max_reason_chars: usize,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseParser")
            .field(
                "verdict_rules",
                &self.verdict_rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field(
                "reason_rules",
                &self.reason_rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("max_reason_chars", &self.max_reason_chars)
            .finish()
    }
}

impl ResponseParser {
    /// Labeled lines first, then the longest unlabeled line
    pub fn new() -> Self {
        Self::with_rules(
            vec![Box::new(LabeledVerdict)],
            vec![Box::new(LabeledReason), Box::new(LongestLine::default())],
        )
    }

    pub fn with_rules(
        verdict_rules: Vec<Box<dyn VerdictRule>>,
        reason_rules: Vec<Box<dyn ReasonRule>>,
    ) -> Self {
        Self {
            verdict_rules,
            reason_rules,
            max_reason_chars: MAX_REASON_CHARS,
        }
    }

    pub fn parse(&self, raw: &str) -> Advice {
        let lines: Vec<&str> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let verdict = self
            .verdict_rules
            .iter()
            .find_map(|rule| {
                let verdict = rule.extract(&lines)?;
                tracing::debug!(rule = rule.name(), %verdict, "Verdict matched");
                Some(verdict)
            })
            .unwrap_or_default();

        let reason = self
            .reason_rules
            .iter()
            .find_map(|rule| {
                let reason = rule.extract(&lines)?;
                tracing::debug!(rule = rule.name(), "Reason matched");
                Some(reason)
            })
            .unwrap_or_else(|| {
                tracing::debug!(%verdict, "No reason found, using default");
                default_reason(verdict).to_string()
            });

        Advice {
            verdict,
            reason: self.normalize(&reason, verdict),
        }
    }

    fn normalize(&self, reason: &str, verdict: Verdict) -> String {
        let reason = truncate_chars(&sentence_case(reason.trim()), self.max_reason_chars);
        if reason.trim().is_empty() {
            default_reason(verdict).to_string()
        } else {
            reason
        }
    }
}
