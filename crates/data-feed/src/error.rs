use core_types::CoreError;
use thiserror::Error;

/// Any reason the primary feed could not produce a panel.
///
/// These never escape `SourceProvider::load`; they are logged and recorded
/// as the reason for falling back to the built-in table.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to perform the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The feed returned HTTP {status} for series {series}")]
    Status { series: String, status: u16 },

    #[error("Failed to read the CSV response: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed observation for series {series} on line {line}: {message}")]
    Parse {
        series: String,
        line: u64,
        message: String,
    },

    #[error("The feed returned no observations for series {series}")]
    Empty { series: String },

    #[error("Fetching series {series} timed out after {after:?}")]
    Timeout { series: String, after: std::time::Duration },

    #[error("Failed to assemble the panel: {0}")]
    Panel(#[from] CoreError),
}
