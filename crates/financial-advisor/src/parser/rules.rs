//! Matching Rules
//!
//! Each rule looks at the non-empty, trimmed lines of a model reply and either
//! produces a value or declines. Rules never fail.

use crate::model::Verdict;
use crate::prompt::{REASON_LABEL, VERDICT_LABEL};

/// Tokens that mark a verdict line as negative; checked before `DO`.
pub const NEGATIVE_TOKENS: &[&str] = &["DON'T", "DON\u{2019}T", "DONT", "DO NOT"];

const AFFIRMATIVE_TOKEN: &str = "DO";

/// Unlabeled lines must be longer than this to stand in for a reason.
pub const MIN_UNLABELED_REASON_CHARS: usize = 20;

/// Rule that may determine the verdict
pub trait VerdictRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, lines: &[&str]) -> Option<Verdict>;
}

/// Rule that may determine the reason
pub trait ReasonRule: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, lines: &[&str]) -> Option<String>;
}

/// Remainder of `line` after a case-insensitive `label` prefix
pub fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| &line[label.len()..])
}

/// Classify the text after a verdict label; `None` if it names neither verdict.
pub fn classify_verdict(text: &str) -> Option<Verdict> {
    let upper = text.to_uppercase();
    if NEGATIVE_TOKENS.iter().any(|token| contains_word(&upper, token)) {
        Some(Verdict::Dont)
    } else if upper.contains(AFFIRMATIVE_TOKEN) {
        Some(Verdict::Do)
    } else {
        None
    }
}

/// `token` occurs in `text` and is not the start of a longer word
/// ("DO NOT" matches in "DO NOT BUY" but not in "DO NOTHING").
fn contains_word(text: &str, token: &str) -> bool {
    text.match_indices(token).any(|(idx, _)| {
        text[idx + token.len()..]
            .chars()
            .next()
            .is_none_or(|next| !next.is_alphanumeric())
    })
}

/// Upper-case the first character
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cut to at most `max` characters without splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Verdict-appropriate sentence used when no reason could be recovered
pub fn default_reason(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Do => "This aligns with good financial practices.",
        Verdict::Dont => "This helps avoid unnecessary financial risk.",
    }
}

/// `VERDICT:` line; the last recognizable one wins
#[derive(Clone, Copy, Debug, Default)]
pub struct LabeledVerdict;

impl VerdictRule for LabeledVerdict {
    fn name(&self) -> &'static str {
        "labeled_verdict"
    }

    fn extract(&self, lines: &[&str]) -> Option<Verdict> {
        lines
            .iter()
            .filter_map(|line| strip_label(line, VERDICT_LABEL))
            .filter_map(classify_verdict)
            .last()
    }
}

/// `REASON:` line; the last non-empty one wins
#[derive(Clone, Copy, Debug, Default)]
pub struct LabeledReason;

impl ReasonRule for LabeledReason {
    fn name(&self) -> &'static str {
        "labeled_reason"
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        lines
            .iter()
            .filter_map(|line| strip_label(line, REASON_LABEL))
            .map(str::trim)
            .filter(|rest| !rest.is_empty())
            .last()
            .map(sentence_case)
    }
}

/// Longest content-bearing line that is not a verdict line
#[derive(Clone, Copy, Debug)]
pub struct LongestLine {
    min_chars: usize,
}

impl Default for LongestLine {
    fn default() -> Self {
        Self {
            min_chars: MIN_UNLABELED_REASON_CHARS,
        }
    }
}

impl LongestLine {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl ReasonRule for LongestLine {
    fn name(&self) -> &'static str {
        "longest_line"
    }

    fn extract(&self, lines: &[&str]) -> Option<String> {
        let mut best: Option<(&str, usize)> = None;

        for &line in lines.iter().filter(|l| strip_label(l, VERDICT_LABEL).is_none()) {
            let len = line.chars().count();
            if len <= self.min_chars {
                continue;
            }
            // strict comparison keeps the earliest line on ties
            if best.is_none_or(|(_, best_len)| len > best_len) {
                best = Some((line, len));
            }
        }

        best.map(|(line, _)| line.to_string())
    }
}
