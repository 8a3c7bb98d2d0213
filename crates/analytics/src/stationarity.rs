//! Augmented Dickey-Fuller unit-root test with a constant in the test regression.
//!
//! For a series `x` the test regression is
//!
//! ```text
//! Δx_t = α + γ·x_{t-1} + Σ_{j=1..p} δ_j·Δx_{t-j} + ε_t
//! ```
//!
//! and the statistic is the t-value of `γ`. The lag order `p` is chosen by
//! minimising an information criterion over `0..=max_lag`, with every
//! candidate fitted on the same trimmed sample; the chosen order is then
//! refitted on the largest sample it allows.

use crate::error::AnalyticsError;
use crate::mackinnon::{self, CriticalValues};
use crate::ols::{self, OlsFit};
use crate::report::{StationarityResult, Verdict};
use configuration::{LagCriterion, StationarityConfig};
use core_types::{AnnualPanel, AnalyzedSeries};
use nalgebra::{DMatrix, DVector};

/// A series is stationary iff its ADF p-value is below this level.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Column of `γ` in the test regression; column 0 is the constant.
const LEVEL_COLUMN: usize = 1;

/// The raw ADF result, independent of which panel column it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct AdfOutcome {
    pub statistic: f64,
    pub p_value: f64,
    pub used_lag: usize,
    pub nobs: usize,
    pub critical_values: CriticalValues,
    pub ic_best: Option<f64>,
}

impl AdfOutcome {
    pub fn verdict(&self) -> Verdict {
        classify(self.p_value)
    }
}

pub fn classify(p_value: f64) -> Verdict {
    if p_value < SIGNIFICANCE_LEVEL {
        Verdict::Stationary
    } else {
        Verdict::NonStationary
    }
}

/// Schwert's rule `ceil(12 · (n / 100)^¼)`.
pub fn schwert_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Largest lag a series of length `n` supports, or `None` if it supports none.
///
/// The bound keeps the largest test regression at `n/2 - 2` lags, so a
/// series must hold at least `2 · (lag + 2)` values to test at `lag`.
pub fn lag_cap(n: usize) -> Option<usize> {
    (n / 2).checked_sub(2)
}

fn resolve_max_lag(n: usize, requested: Option<usize>) -> Result<usize, AnalyticsError> {
    let context = "an augmented Dickey-Fuller test";
    match (requested, lag_cap(n)) {
        (Some(lag), Some(cap)) if lag <= cap => Ok(lag),
        (Some(lag), _) => Err(AnalyticsError::insufficient(context, 2 * (lag + 2), n)),
        (None, Some(cap)) => Ok(schwert_max_lag(n).min(cap)),
        (None, None) => Err(AnalyticsError::insufficient(context, 4, n)),
    }
}

/// Builds the test regression with `lags` lagged differences, dropping the
/// first `trim` differences so that samples with different lag orders align.
fn test_regression(levels: &[f64], diffs: &[f64], trim: usize, lags: usize) -> (DMatrix<f64>, DVector<f64>) {
    let rows = diffs.len() - trim;
    let design = DMatrix::from_fn(rows, 2 + lags, |i, j| {
        let t = trim + i;
        match j {
            0 => 1.0,
            LEVEL_COLUMN => levels[t],
            lag => diffs[t - (lag - 1)],
        }
    });
    let response = DVector::from_iterator(rows, diffs[trim..].iter().copied());
    (design, response)
}

/// Fits every lag in `0..=max_lag` on the sample trimmed for `max_lag` and
/// returns the lowest criterion value with its lag. Ties keep the smaller lag.
fn select_lag(
    levels: &[f64],
    diffs: &[f64],
    max_lag: usize,
    criterion: fn(&OlsFit) -> f64,
) -> Result<(f64, usize), AnalyticsError> {
    let (design, response) = test_regression(levels, diffs, max_lag, 0);
    let mut best = (criterion(&ols::fit(&design, &response)?), 0);
    for lags in 1..=max_lag {
        let (design, response) = test_regression(levels, diffs, max_lag, lags);
        let ic = criterion(&ols::fit(&design, &response)?);
        if ic < best.0 {
            best = (ic, lags);
        }
    }
    Ok(best)
}

/// Runs the ADF test over `values` in the given order.
pub fn adf_test(values: &[f64], config: &StationarityConfig) -> Result<AdfOutcome, AnalyticsError> {
    let n = values.len();
    let max_lag = resolve_max_lag(n, config.max_lag)?;
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    let criterion: Option<fn(&OlsFit) -> f64> = match config.lag_criterion {
        LagCriterion::Aic => Some(OlsFit::aic),
        LagCriterion::Bic => Some(OlsFit::bic),
        LagCriterion::Fixed => None,
    };
    let (used_lag, ic_best) = match criterion {
        Some(criterion) => {
            let (ic, lags) = select_lag(values, &diffs, max_lag, criterion)?;
            (lags, Some(ic))
        }
        None => (max_lag, None),
    };

    let (design, response) = test_regression(values, &diffs, used_lag, used_lag);
    let fit = ols::fit(&design, &response)?;
    let statistic = fit.t_value(LEVEL_COLUMN).ok_or_else(|| {
        AnalyticsError::SingularMatrix("the test regression fits exactly; the ADF statistic is undefined".to_string())
    })?;

    Ok(AdfOutcome {
        statistic,
        p_value: mackinnon::p_value(statistic)?,
        used_lag,
        nobs: fit.nobs,
        critical_values: mackinnon::critical_values(fit.nobs),
        ic_best,
    })
}

/// Tests the non-null values of one panel column, in chronological order.
pub fn test_series(
    panel: &AnnualPanel,
    series: AnalyzedSeries,
    config: &StationarityConfig,
) -> Result<StationarityResult, AnalyticsError> {
    let values = panel.column(|r| series.value(r));
    let outcome = adf_test(&values, config)?;
    let verdict = outcome.verdict();

    tracing::debug!(
        series = series.field_name(),
        statistic = outcome.statistic,
        p_value = outcome.p_value,
        used_lag = outcome.used_lag,
        "ADF test complete: {}",
        verdict
    );

    Ok(StationarityResult {
        series,
        statistic: outcome.statistic,
        p_value: outcome.p_value,
        used_lag: outcome.used_lag,
        nobs: outcome.nobs,
        critical_values: outcome.critical_values,
        ic_best: outcome.ic_best,
        verdict,
    })
}
