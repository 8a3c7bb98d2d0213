//! # Heckscher Analytics
//!
//! The numeric core of the pipeline: a simple linear regression of real
//! exports on the capital-labor ratio, Augmented Dickey-Fuller unit-root tests
//! over three series, and descriptive statistics for the summary table.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** this crate has no knowledge of the feed or the file system.
//!   It reads a completed `AnnualPanel` and returns plain report structs.
//! - **Explicit parameters:** the confidence level and the ADF lag settings
//!   arrive in an `AnalysisConfig`; the classification threshold is the
//!   `SIGNIFICANCE_LEVEL` constant.
//! - **Exact least squares:** every fit is a Householder QR solve, so the same
//!   input always yields bit-identical coefficients.
//! - **Independent failure:** `AnalyticsEngine::analyze` never fails as a whole;
//!   a unit that fails is listed in `AnalysisOutcome::failures`.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: runs every analysis over a panel.
//! - `RegressionSummary`, `StationarityResult`, `DescriptiveStats`: the report types.
//! - `AnalyticsError`: `InsufficientData` and `SingularMatrix` are the two
//!   failures callers are expected to handle.

pub mod descriptive;
pub mod engine;
pub mod error;
pub mod mackinnon;
pub mod ols;
pub mod regression;
pub mod report;
pub mod stationarity;

pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use mackinnon::CriticalValues;
pub use regression::{regress_exports_on_capital_labor, simple_regression};
pub use report::{
    AnalysisFailure, AnalysisOutcome, AnalysisUnit, CoefficientEstimate, DescriptiveStats, FittedPoint,
    RegressionSummary, StationarityResult, Verdict,
};
pub use stationarity::{SIGNIFICANCE_LEVEL, adf_test, test_series};
