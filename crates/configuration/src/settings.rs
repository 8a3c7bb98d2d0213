use crate::error::ConfigError;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty configuration is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub feed: FeedConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Checks the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let end_year = self.feed.resolved_end_year();
        if self.feed.start_year > end_year {
            return Err(ConfigError::ValidationError(format!(
                "feed.start_year ({}) is after the end year ({})",
                self.feed.start_year, end_year
            )));
        }
        if self.feed.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "feed.timeout_secs must be greater than zero".to_string(),
            ));
        }
        let level = self.analysis.regression.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.regression.confidence_level must lie in (0, 1), got {}",
                level
            )));
        }
        Ok(())
    }
}

/// Where and how the raw indicators are fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Base URL of the CSV endpoint; the series id and date window are appended as query parameters.
    pub base_url: String,
    /// Upper bound on a single series download.
    pub timeout_secs: u64,
    pub start_year: i32,
    /// Defaults to the current calendar year.
    pub end_year: Option<i32>,
    /// Skip the feed entirely and use the built-in historical table.
    pub offline: bool,
    pub show_progress: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fred.stlouisfed.org/graph/fredgraph.csv".to_string(),
            timeout_secs: 20,
            start_year: 1960,
            end_year: None,
            offline: false,
            show_progress: true,
        }
    }
}

impl FeedConfig {
    pub fn resolved_end_year(&self) -> i32 {
        self.end_year.unwrap_or_else(|| Utc::now().year())
    }

    pub fn year_range(&self) -> RangeInclusive<i32> {
        self.start_year..=self.resolved_end_year()
    }
}

/// Parameters handed to the regression and stationarity analyses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub regression: RegressionConfig,
    pub stationarity: StationarityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Coverage of the coefficient confidence intervals (0.95 gives the 2.5%/97.5% bounds).
    pub confidence_level: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationarityConfig {
    /// Explicit upper bound on the augmentation lag.
    /// When absent, Schwert's rule `ceil(12 * (n / 100)^(1/4))` is used.
    pub max_lag: Option<usize>,
    pub lag_criterion: LagCriterion,
}

/// How the augmentation lag of the ADF regression is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LagCriterion {
    /// Minimise the Akaike information criterion.
    #[default]
    Aic,
    /// Minimise the Bayesian information criterion.
    Bic,
    /// Use the maximum lag without searching.
    Fixed,
}

/// Locations of the files the pipeline writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub panel_file: String,
    pub report_file: String,
    pub fit_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            panel_file: "heckscher_ohlin_data.csv".to_string(),
            report_file: "analysis_report.json".to_string(),
            fit_file: "regression_fit.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn panel_path(&self) -> PathBuf {
        self.dir.join(&self.panel_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(&self.report_file)
    }

    pub fn fit_path(&self) -> PathBuf {
        self.dir.join(&self.fit_file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Optional log file, written in addition to stdout.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
