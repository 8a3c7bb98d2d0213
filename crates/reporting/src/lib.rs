//! # Heckscher Reporting
//!
//! Everything the pipeline hands to the outside world. This crate only reads
//! the completed panel and the analysis results; it never re-derives values.
//!
//! - `panel_csv`: the persisted panel table, written and read back exactly.
//! - `chart_data`: the observed/fitted series behind the regression-fit chart.
//! - `run_report`: the JSON `AnalysisReport` of a run.
//! - `tables`: comfy-table renderings for the terminal.

pub mod chart_data;
pub mod error;
pub mod panel_csv;
pub mod run_report;
pub mod tables;

pub use chart_data::{FitRow, write_fit, write_fit_file};
pub use error::ReportError;
pub use panel_csv::{PANEL_HEADER, read_panel, read_panel_file, write_panel, write_panel_file};
pub use run_report::{AnalysisReport, PanelSource};
