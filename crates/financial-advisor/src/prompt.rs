//! Prompt Construction
//!
//! The two line labels below are the contract between the prompt and the
//! response parser; both sides read them from here.

/// Label of the verdict line the model must emit
pub const VERDICT_LABEL: &str = "VERDICT:";

/// Label of the reason line the model must emit
pub const REASON_LABEL: &str = "REASON:";

/// Turns a question into the instruction text sent to the model
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, question: &str) -> String {
        format!(
            r#"Act as a financial advisor. For the user's financial question, give ONLY a verdict and one-sentence reason in this EXACT format:

{VERDICT_LABEL} [DO or DON'T]
{REASON_LABEL} [One clear reason under 15 words]

Rules:
1. Always start with {VERDICT_LABEL} followed by either DO or DON'T
2. Then on new line: {REASON_LABEL} followed by brief reason
3. Keep reason practical, concise, and under 15 words
4. Consider: saving vs spending, debt avoidance, emergency funds, long-term goals
5. If uncertain, choose DON'T

Question: "{question}"

Response:"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_grammar_and_question() {
        let prompt = PromptBuilder::new().build("Should I buy a $2000 TV?");

        assert!(prompt.starts_with("Act as a financial advisor"));
        assert!(prompt.contains("VERDICT: [DO or DON'T]"));
        assert!(prompt.contains("REASON: [One clear reason under 15 words]"));
        assert!(prompt.contains("If uncertain, choose DON'T"));
        assert!(prompt.contains("emergency funds"));
        assert!(prompt.contains("Question: \"Should I buy a $2000 TV?\""));
    }

    #[test]
    fn test_verdict_line_precedes_reason_line() {
        let prompt = PromptBuilder::new().build("q");
        let verdict = prompt.find("VERDICT: [").unwrap();
        let reason = prompt.find("REASON: [").unwrap();
        assert!(verdict < reason);
    }

    #[test]
    fn test_build_is_pure() {
        let builder = PromptBuilder::new();
        assert_eq!(builder.build("same"), builder.build("same"));
    }
}
