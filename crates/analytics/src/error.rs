use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AnalyticsError {
    #[error("Not enough data for {context}: need at least {required} observations, have {available}")]
    InsufficientData {
        context: String,
        required: usize,
        available: usize,
    },

    #[error("Singular design matrix: {0}")]
    SingularMatrix(String),

    #[error("Failed to evaluate a probability distribution: {0}")]
    Distribution(String),
}

impl AnalyticsError {
    pub(crate) fn insufficient(context: impl Into<String>, required: usize, available: usize) -> Self {
        AnalyticsError::InsufficientData {
            context: context.into(),
            required,
            available,
        }
    }
}
