//! Data behind the regression-fit chart: observed and fitted exports against
//! the capital-labor ratio, one row per year used in the fit.

use crate::error::ReportError;
use crate::panel_csv::create_file;
use analytics::RegressionSummary;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitRow {
    pub year: i32,
    pub capital_labor_ratio: f64,
    pub observed_exports: f64,
    pub fitted_exports: f64,
    pub residual: f64,
}

pub fn fit_rows(summary: &RegressionSummary) -> Vec<FitRow> {
    summary
        .fitted
        .iter()
        .map(|point| FitRow {
            year: point.year,
            capital_labor_ratio: point.x,
            observed_exports: point.observed,
            fitted_exports: point.fitted,
            residual: point.residual,
        })
        .collect()
}

pub fn write_fit<W: Write>(summary: &RegressionSummary, writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in fit_rows(summary) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_fit_file(summary: &RegressionSummary, path: &Path) -> Result<(), ReportError> {
    write_fit(summary, create_file(path)?)?;
    tracing::info!("Regression fit data written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::simple_regression;

    #[test]
    fn rows_follow_the_fitted_years() {
        let points = [(1990, 1.0, 2.9), (1991, 2.0, 5.2), (1992, 3.0, 6.8), (1993, 4.0, 9.1)];
        let summary = simple_regression("real_exports", "capital_labor_ratio", &points, 0.95).unwrap();

        let mut buffer = Vec::new();
        write_fit(&summary, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "year,capital_labor_ratio,observed_exports,fitted_exports,residual");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1990,1.0,2.9,"));
        assert!(lines[4].starts_with("1993,4.0,9.1,"));
    }
}
