//! Advice History
//!
//! Storage of past answers lives outside the pipeline. Only a no-op store
//! exists today; the trait is the seam a persistent backend plugs into.

use async_trait::async_trait;

use crate::model::AdviceResult;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Whether results are actually persisted
    fn enabled(&self) -> bool;

    async fn record(&self, result: &AdviceResult);

    /// Most recent results, newest first
    async fn recent(&self, limit: usize) -> Vec<AdviceResult>;
}

/// Records nothing, returns nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHistory;

#[async_trait]
impl HistoryStore for NoopHistory {
    fn enabled(&self) -> bool {
        false
    }

    async fn record(&self, result: &AdviceResult) {
        tracing::trace!(verdict = %result.verdict, "History disabled, result not stored");
    }

    async fn recent(&self, _limit: usize) -> Vec<AdviceResult> {
        Vec::new()
    }
}
