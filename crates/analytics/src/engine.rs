use crate::descriptive::{DESCRIBED_FIELDS, describe_column};
use crate::error::AnalyticsError;
use crate::regression::regress_exports_on_capital_labor;
use crate::report::{AnalysisFailure, AnalysisOutcome, AnalysisUnit};
use crate::stationarity::test_series;
use configuration::AnalysisConfig;
use core_types::{AnalyzedSeries, AnnualPanel};

/// Runs every analysis over a completed panel.
///
/// The engine only reads the panel. Each unit (the regression, each ADF
/// series, each descriptive column) runs on its own; a failing unit is
/// recorded in `AnalysisOutcome::failures` and the rest still run.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalysisConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The main entry point: regression, stationarity tests and descriptive statistics.
    pub fn analyze(&self, panel: &AnnualPanel) -> AnalysisOutcome {
        let mut outcome = AnalysisOutcome::default();

        match regress_exports_on_capital_labor(panel, &self.config.regression) {
            Ok(summary) => {
                tracing::info!(
                    nobs = summary.nobs,
                    slope = summary.slope.estimate,
                    intercept = summary.intercept.estimate,
                    "Regression of real_exports on capital_labor_ratio fitted"
                );
                outcome.regression = Some(summary);
            }
            Err(error) => Self::record(&mut outcome, AnalysisUnit::Regression, error),
        }

        for series in AnalyzedSeries::ALL {
            match test_series(panel, series, &self.config.stationarity) {
                Ok(result) => {
                    tracing::info!(
                        series = series.field_name(),
                        p_value = result.p_value,
                        "Stationarity: {}",
                        result.verdict
                    );
                    outcome.stationarity.push(result);
                }
                Err(error) => Self::record(&mut outcome, AnalysisUnit::Stationarity(series), error),
            }
        }

        for (field, accessor) in DESCRIBED_FIELDS {
            match describe_column(panel, field, accessor) {
                Ok(stats) => outcome.descriptive.push(stats),
                Err(error) => Self::record(&mut outcome, AnalysisUnit::Descriptive(field.to_string()), error),
            }
        }

        if !outcome.is_complete() {
            tracing::warn!("{} analysis unit(s) failed; reporting partial results", outcome.failures.len());
        }
        outcome
    }

    fn record(outcome: &mut AnalysisOutcome, unit: AnalysisUnit, error: AnalyticsError) {
        tracing::warn!("Analysis unit {} failed: {}", unit, error);
        outcome.failures.push(AnalysisFailure { unit, error });
    }
}
