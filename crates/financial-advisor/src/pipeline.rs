//! Advice Pipeline
//!
//! ```text
//! validate ─▶ build prompt ─▶ invoke gateway ─┬─ ok  ─▶ parse    (MODEL)
//!                                             └─ err ─▶ fallback (FALLBACK)
//! ```
//!
//! Once the question passes validation a result is guaranteed: gateway
//! failures, including timeouts, are logged and answered from the fallback
//! table.

use std::sync::Arc;
use std::time::Duration;

use advisor_core::{Completion, GatewayError, GenerationOptions, ModelGateway};

use crate::error::Result;
use crate::fallback::FallbackSelector;
use crate::model::{AdviceRequest, AdviceResult, Source};
use crate::parser::ResponseParser;
use crate::prompt::PromptBuilder;

/// Model name recorded on canned answers
pub const FALLBACK_MODEL: &str = "fallback";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const LOG_PREVIEW_CHARS: usize = 50;

/// Pipeline configuration
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Upper bound on a single gateway call
    pub timeout: Duration,

    /// Sampling parameters passed to the gateway
    pub generation: GenerationOptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            generation: GenerationOptions::default(),
        }
    }
}

/// Orchestrates one question into one [`AdviceResult`]
pub struct AdvicePipeline {
    gateway: Arc<dyn ModelGateway>,
    prompts: PromptBuilder,
    parser: ResponseParser,
    fallback: FallbackSelector,
    config: PipelineConfig,
}

impl AdvicePipeline {
    /// Create with default parser, fallback table, and config
    pub fn new(gateway: Arc<dyn ModelGateway>) -> Self {
        Self {
            gateway,
            prompts: PromptBuilder::new(),
            parser: ResponseParser::new(),
            fallback: FallbackSelector::new(),
            config: PipelineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackSelector) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn ModelGateway> {
        &self.gateway
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Answer a question
    ///
    /// Fails only with `AdviceError::EmptyQuestion`, before any gateway call.
    pub async fn run(&self, question: &str) -> Result<AdviceResult> {
        let request = AdviceRequest::new(question)?;
        if request.exceeds_display_limit() {
            tracing::debug!("Question exceeds display limit, passing through unchanged");
        }

        tracing::info!(question = %preview(request.question()), "Synthesizing advice");
        let prompt = self.prompts.build(request.question());

        let result = match self.invoke(&prompt).await {
            Ok(completion) => {
                tracing::debug!(model = %completion.model, raw = %completion.content, "Model replied");
                let advice = self.parser.parse(&completion.content);
                AdviceResult::new(request, advice, Source::Model, completion.model)
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind(), error = %e, "Model gateway failed, using fallback");
                AdviceResult::new(request, self.fallback.select(), Source::Fallback, FALLBACK_MODEL)
            }
        };

        tracing::info!(verdict = %result.verdict, source = ?result.source, "Advice ready");
        Ok(result)
    }

    async fn invoke(&self, prompt: &str) -> advisor_core::Result<Completion> {
        tokio::time::timeout(
            self.config.timeout,
            self.gateway.invoke(prompt, &self.config.generation),
        )
        .await
        .map_err(|_| GatewayError::Timeout(self.config.timeout))?
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{gateway::Script, ScriptedGateway, UnconfiguredGateway};

    use crate::error::AdviceError;
    use crate::fallback::{FixedChooser, FALLBACK_TABLE};
    use crate::model::Verdict;

    fn pipeline_with(gateway: Arc<ScriptedGateway>) -> AdvicePipeline {
        AdvicePipeline::new(gateway)
    }

    #[tokio::test]
    async fn test_model_answer_is_parsed() {
        let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DO\nREASON: Great time to invest."));
        let pipeline = pipeline_with(gateway.clone());

        let result = pipeline.run("  Should I invest in an index fund?  ").await.unwrap();

        assert_eq!(result.question, "Should I invest in an index fund?");
        assert_eq!(result.verdict, Verdict::Do);
        assert_eq!(result.reason, "Great time to invest.");
        assert_eq!(result.source, Source::Model);
        assert_eq!(result.model, "scripted");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_never_reaches_gateway() {
        let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DO"));
        let pipeline = pipeline_with(gateway.clone());

        for question in ["", "   ", "\n\t"] {
            let err = pipeline.run(question).await.unwrap_err();
            assert!(matches!(err, AdviceError::EmptyQuestion));
        }
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_uses_fallback() {
        let gateway = Arc::new(ScriptedGateway::failing("connection refused"));
        let pipeline = pipeline_with(gateway)
            .with_fallback(FallbackSelector::with_chooser(Arc::new(FixedChooser(3))));

        let result = pipeline.run("Should I pay off my credit card?").await.unwrap();

        assert_eq!(result.source, Source::Fallback);
        assert_eq!(result.model, FALLBACK_MODEL);
        assert_eq!(result.verdict, FALLBACK_TABLE[3].verdict);
        assert_eq!(result.reason, FALLBACK_TABLE[3].reason);
    }

    #[tokio::test]
    async fn test_gateway_error_uses_fallback() {
        let gateway = Arc::new(ScriptedGateway::new(Script::Error("quota exceeded".into())));
        let result = pipeline_with(gateway).run("Buy a boat?").await.unwrap();

        assert!(result.is_fallback());
        assert!(FALLBACK_TABLE
            .iter()
            .any(|e| e.verdict == result.verdict && e.reason == result.reason));
    }

    #[tokio::test]
    async fn test_timeout_uses_fallback() {
        let gateway = Arc::new(ScriptedGateway::slow(
            Duration::from_secs(5),
            "VERDICT: DO\nREASON: Too late.",
        ));
        let pipeline = pipeline_with(gateway.clone()).with_config(PipelineConfig {
            timeout: Duration::from_millis(50),
            ..Default::default()
        });

        let result = pipeline.run("Should I lease a car?").await.unwrap();

        assert_eq!(result.source, Source::Fallback);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_uses_fallback() {
        let pipeline = AdvicePipeline::new(Arc::new(UnconfiguredGateway::new("no key")));
        let result = pipeline.run("Should I rent or buy?").await.unwrap();
        assert_eq!(result.source, Source::Fallback);
    }

    #[tokio::test]
    async fn test_empty_model_reply_is_a_parse_concern() {
        let gateway = Arc::new(ScriptedGateway::reply(""));
        let result = pipeline_with(gateway).run("Buy a TV?").await.unwrap();

        assert_eq!(result.source, Source::Model);
        assert_eq!(result.verdict, Verdict::Dont);
        assert_eq!(result.reason, "This helps avoid unnecessary financial risk.");
    }

    #[tokio::test]
    async fn test_created_at_is_generation_time() {
        let before = chrono::Utc::now();
        let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DO\nREASON: Fine."));
        let result = pipeline_with(gateway).run("q?").await.unwrap();
        assert!(result.created_at >= before);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_runs_are_independent() {
        let gateway = Arc::new(ScriptedGateway::reply("VERDICT: DON'T\nREASON: Wait a month."));
        let pipeline = Arc::new(pipeline_with(gateway.clone()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let pipeline = pipeline.clone();
                tokio::spawn(async move { pipeline.run(&format!("Question {i}?")).await })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result.question, format!("Question {i}?"));
            assert_eq!(result.verdict, Verdict::Dont);
        }
        assert_eq!(gateway.calls(), 16);
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "q".repeat(80);
        assert_eq!(preview(&long).len(), LOG_PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
