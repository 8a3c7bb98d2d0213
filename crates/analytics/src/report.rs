use crate::error::AnalyticsError;
use crate::mackinnon::CriticalValues;
use core_types::AnalyzedSeries;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One estimated coefficient of a linear model.
///
/// The inference fields are `None` when the fit leaves no residual degrees of
/// freedom or the standard error is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientEstimate {
    pub name: String,
    pub estimate: f64,
    pub std_error: Option<f64>,
    pub t_stat: Option<f64>,
    pub p_value: Option<f64>,
    /// `(lower, upper)` at the summary's `confidence_level`.
    pub conf_interval: Option<(f64, f64)>,
}

/// Observed and fitted value of the dependent variable for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedPoint {
    pub year: i32,
    pub x: f64,
    pub observed: f64,
    pub fitted: f64,
    pub residual: f64,
}

/// A full OLS summary of a simple linear regression `y = β₀ + β₁·x + ε`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionSummary {
    pub dependent: String,
    pub independent: String,
    pub nobs: usize,
    pub df_resid: usize,
    pub intercept: CoefficientEstimate,
    pub slope: CoefficientEstimate,
    // Option<> because the total sum of squares can be zero.
    pub r_squared: Option<f64>,
    pub adj_r_squared: Option<f64>,
    pub f_statistic: Option<f64>,
    pub f_p_value: Option<f64>,
    pub residual_std_error: Option<f64>,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
    // Option<> because the residuals can all be zero.
    pub durbin_watson: Option<f64>,
    pub confidence_level: f64,
    pub fitted: Vec<FittedPoint>,
}

/// Classification of a series by the ADF test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Stationary,
    NonStationary,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Stationary => write!(f, "stationary"),
            Verdict::NonStationary => write!(f, "non-stationary (unit root present)"),
        }
    }
}

/// The outcome of an Augmented Dickey-Fuller test on one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationarityResult {
    pub series: AnalyzedSeries,
    pub statistic: f64,
    pub p_value: f64,
    /// Number of lagged differences in the final test regression.
    pub used_lag: usize,
    /// Observations in the final test regression.
    pub nobs: usize,
    pub critical_values: CriticalValues,
    /// Best information-criterion value found during lag selection; absent for a fixed lag.
    pub ic_best: Option<f64>,
    pub verdict: Verdict,
}

/// Mean, sample standard deviation and range of one panel column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub field: String,
    pub count: usize,
    pub mean: f64,
    // Option<> because a single value has no sample deviation.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// An independently run piece of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "field", rename_all = "snake_case")]
pub enum AnalysisUnit {
    Regression,
    Stationarity(AnalyzedSeries),
    Descriptive(String),
}

impl fmt::Display for AnalysisUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisUnit::Regression => write!(f, "regression"),
            AnalysisUnit::Stationarity(series) => write!(f, "stationarity({})", series.field_name()),
            AnalysisUnit::Descriptive(field) => write!(f, "descriptive({})", field),
        }
    }
}

/// A unit that failed, kept in the report next to the results that succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub unit: AnalysisUnit,
    pub error: AnalyticsError,
}

/// Everything the analytics engine produces for one panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub regression: Option<RegressionSummary>,
    pub stationarity: Vec<StationarityResult>,
    pub descriptive: Vec<DescriptiveStats>,
    pub failures: Vec<AnalysisFailure>,
}

impl AnalysisOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The stationarity result for `series`, if its test succeeded.
    pub fn verdict_for(&self, series: AnalyzedSeries) -> Option<&StationarityResult> {
        self.stationarity.iter().find(|r| r.series == series)
    }
}
