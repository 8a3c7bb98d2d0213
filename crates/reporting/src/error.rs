use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("An error occurred during JSON serialization: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unexpected panel header: expected '{expected}', found '{found}'")]
    Header { expected: String, found: String },

    #[error("Non-finite value {value} for {field} in year {year}")]
    NonFinite { year: i32, field: &'static str, value: f64 },

    #[error("Invalid panel: {0}")]
    Panel(#[from] core_types::CoreError),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}
