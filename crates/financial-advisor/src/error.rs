//! Error Types for the Financial Advisor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdviceError>;

/// Caller-visible failures
///
/// Gateway failures never appear here; the pipeline recovers from them.
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("Please provide a financial question")]
    EmptyQuestion,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdviceError {
    /// Message safe to show to an end user
    pub fn user_message(&self) -> String {
        match self {
            AdviceError::EmptyQuestion => self.to_string(),
            AdviceError::Internal(_) => {
                "Unable to process your request. Please try again in a moment.".into()
            }
        }
    }
}
