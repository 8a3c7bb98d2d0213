use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Year {0} appears more than once in the panel")]
    DuplicateYear(i32),

    #[error("Invalid year range: start {start} is after end {end}")]
    InvalidRange { start: i32, end: i32 },
}
