use crate::error::ReportError;
use crate::panel_csv::create_file;
use analytics::{AnalysisFailure, AnalysisOutcome, DescriptiveStats, RegressionSummary, SIGNIFICANCE_LEVEL, StationarityResult};
use chrono::{DateTime, Utc};
use core_types::AnnualPanel;
use data_feed::PanelOrigin;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Where the analysed panel came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelSource {
    Feed,
    Fallback { reason: String },
    File { path: PathBuf },
}

impl From<PanelOrigin> for PanelSource {
    fn from(origin: PanelOrigin) -> Self {
        match origin {
            PanelOrigin::Feed => PanelSource::Feed,
            PanelOrigin::Fallback { reason } => PanelSource::Fallback { reason },
        }
    }
}

/// The machine-readable record of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: PanelSource,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub years: usize,
    pub significance_level: f64,
    pub regression: Option<RegressionSummary>,
    pub stationarity: Vec<StationarityResult>,
    pub descriptive: Vec<DescriptiveStats>,
    pub failures: Vec<AnalysisFailure>,
}

impl AnalysisReport {
    pub fn new(source: PanelSource, panel: &AnnualPanel, outcome: AnalysisOutcome) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source,
            first_year: panel.first_year(),
            last_year: panel.last_year(),
            years: panel.len(),
            significance_level: SIGNIFICANCE_LEVEL,
            regression: outcome.regression,
            stationarity: outcome.stationarity,
            descriptive: outcome.descriptive,
            failures: outcome.failures,
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn write_file(&self, path: &Path) -> Result<(), ReportError> {
        let mut file = create_file(path)?;
        self.write_json(&mut file)?;
        file.write_all(b"\n").map_err(|e| ReportError::io(path, e))?;
        tracing::info!(run_id = %self.run_id, "Analysis report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalysisUnit, AnalyticsError, AnalyticsEngine};
    use core_types::YearRecord;
    use serde_json::Value;

    fn report_for(panel: &AnnualPanel, source: PanelSource) -> Value {
        let outcome = AnalyticsEngine::default().analyze(panel);
        let report = AnalysisReport::new(source, panel, outcome);
        let mut buffer = Vec::new();
        report.write_json(&mut buffer).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn fallback_reason_and_failures_are_recorded() {
        let panel = AnnualPanel::new(vec![
            YearRecord {
                capital_labor_ratio: Some(1.0),
                real_exports: Some(3.0),
                ..YearRecord::empty(2000)
            },
            YearRecord::empty(2001),
        ])
        .unwrap();
        let json = report_for(
            &panel,
            PanelOrigin::Fallback {
                reason: "offline mode".to_string(),
            }
            .into(),
        );

        assert_eq!(json["source"]["kind"], "fallback");
        assert_eq!(json["source"]["reason"], "offline mode");
        assert_eq!(json["first_year"], 2000);
        assert_eq!(json["significance_level"], 0.05);
        assert!(json["regression"].is_null());

        let failures = json["failures"].as_array().unwrap();
        assert!(!failures.is_empty());
        assert_eq!(failures[0]["unit"]["unit"], "regression");
        assert_eq!(failures[0]["error"]["kind"], "insufficient_data");
        assert_eq!(failures[0]["error"]["detail"]["available"], 1);
    }

    #[test]
    fn failures_round_trip_through_their_serialized_form() {
        let failure = AnalysisFailure {
            unit: AnalysisUnit::Stationarity(core_types::AnalyzedSeries::CapitalLaborRatio),
            error: AnalyticsError::SingularMatrix("constant series".to_string()),
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["unit"]["field"], "capital_labor_ratio");
        assert_eq!(value["error"]["detail"], "constant series");
        assert_eq!(serde_json::from_value::<AnalysisFailure>(value).unwrap(), failure);
    }

    #[test]
    fn file_source_records_its_path() {
        let json = report_for(
            &AnnualPanel::with_years(1990..=1991).unwrap(),
            PanelSource::File {
                path: PathBuf::from("output/panel.csv"),
            },
        );
        assert_eq!(json["source"]["kind"], "file");
        assert_eq!(json["source"]["path"], "output/panel.csv");
        assert_eq!(json["years"], 2);
        assert!(Uuid::parse_str(json["run_id"].as_str().unwrap()).is_ok());
    }
}
