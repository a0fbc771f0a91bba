//! Application State

use std::sync::Arc;

use financial_advisor::{AdvicePipeline, HistoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Advice pipeline (owns the model gateway)
    pub pipeline: Arc<AdvicePipeline>,

    /// Past answers; a no-op store until persistence exists
    pub history: Arc<dyn HistoryStore>,
}
