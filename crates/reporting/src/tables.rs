//! Terminal tables for the end of a run.

use analytics::{AnalysisFailure, CoefficientEstimate, DescriptiveStats, RegressionSummary, StationarityResult};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use core_types::{AnnualPanel, YearRecord};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn fmt_p(value: Option<f64>) -> String {
    match value {
        Some(p) if p < 1e-4 => format!("{:.2e}", p),
        other => fmt_opt(other, 4),
    }
}

fn panel_row(record: &YearRecord) -> Vec<String> {
    vec![
        record.year.to_string(),
        fmt_opt(record.real_gdp, 1),
        fmt_opt(record.labor_force, 0),
        fmt_opt(record.real_investment, 1),
        fmt_opt(record.real_exports, 1),
        fmt_opt(record.capital_deepening_pct, 2),
        fmt_opt(record.capital_labor_ratio, 2),
    ]
}

/// The first and last `rows` years of the panel.
pub fn panel_table(panel: &AnnualPanel, rows: usize) -> Table {
    let mut table = new_table(vec![
        "Year",
        "Real GDP ($bn)",
        "Labor force (k)",
        "Investment ($bn)",
        "Exports ($bn)",
        "Capital deepening (%)",
        "K/L ($/worker)",
    ]);

    let records = panel.records();
    if records.len() <= 2 * rows {
        for record in records {
            table.add_row(panel_row(record));
        }
    } else {
        for record in &records[..rows] {
            table.add_row(panel_row(record));
        }
        table.add_row(vec!["..."; 7]);
        for record in &records[records.len() - rows..] {
            table.add_row(panel_row(record));
        }
    }
    table
}

fn coefficient_row(coefficient: &CoefficientEstimate) -> Vec<String> {
    let interval = coefficient
        .conf_interval
        .map(|(lower, upper)| format!("[{:.4}, {:.4}]", lower, upper))
        .unwrap_or_else(|| "-".to_string());
    vec![
        coefficient.name.clone(),
        format!("{:.6}", coefficient.estimate),
        fmt_opt(coefficient.std_error, 6),
        fmt_opt(coefficient.t_stat, 3),
        fmt_p(coefficient.p_value),
        interval,
    ]
}

/// Coefficient table plus a table of the fit statistics.
pub fn regression_tables(summary: &RegressionSummary) -> (Table, Table) {
    let level = format!("{:.0}% CI", summary.confidence_level * 100.0);
    let mut coefficients = new_table(vec!["Term", "Estimate", "Std. error", "t", "P>|t|", level.as_str()]);
    coefficients.add_row(coefficient_row(&summary.intercept));
    coefficients.add_row(coefficient_row(&summary.slope));

    let mut fit = new_table(vec!["Statistic", "Value"]);
    let rows = [
        ("Dependent variable", summary.dependent.clone()),
        ("Observations", summary.nobs.to_string()),
        ("Residual df", summary.df_resid.to_string()),
        ("R²", fmt_opt(summary.r_squared, 4)),
        ("Adjusted R²", fmt_opt(summary.adj_r_squared, 4)),
        ("F statistic", fmt_opt(summary.f_statistic, 3)),
        ("Prob (F)", fmt_p(summary.f_p_value)),
        ("Residual std. error", fmt_opt(summary.residual_std_error, 4)),
        ("Log-likelihood", fmt_opt(Some(summary.log_likelihood), 3)),
        ("AIC", fmt_opt(Some(summary.aic), 3)),
        ("BIC", fmt_opt(Some(summary.bic), 3)),
        ("Durbin-Watson", fmt_opt(summary.durbin_watson, 3)),
    ];
    for (name, value) in rows {
        fit.add_row(vec![name.to_string(), value]);
    }

    (coefficients, fit)
}

pub fn stationarity_table(results: &[StationarityResult]) -> Table {
    let mut table = new_table(vec![
        "Series",
        "ADF statistic",
        "p-value",
        "Lags",
        "Obs",
        "1%",
        "5%",
        "10%",
        "Verdict",
    ]);
    for result in results {
        table.add_row(vec![
            Cell::new(result.series.field_name()),
            Cell::new(format!("{:.4}", result.statistic)),
            Cell::new(fmt_p(Some(result.p_value))),
            Cell::new(result.used_lag),
            Cell::new(result.nobs),
            Cell::new(format!("{:.4}", result.critical_values.one_pct)),
            Cell::new(format!("{:.4}", result.critical_values.five_pct)),
            Cell::new(format!("{:.4}", result.critical_values.ten_pct)),
            Cell::new(result.verdict),
        ]);
    }
    table
}

pub fn descriptive_table(stats: &[DescriptiveStats]) -> Table {
    let mut table = new_table(vec!["Field", "Count", "Mean", "Std. dev.", "Min", "Max"]);
    for s in stats {
        table.add_row(vec![
            s.field.clone(),
            s.count.to_string(),
            format!("{:.4}", s.mean),
            fmt_opt(s.std_dev, 4),
            format!("{:.4}", s.min),
            format!("{:.4}", s.max),
        ]);
    }
    table
}

pub fn failures_table(failures: &[AnalysisFailure]) -> Table {
    let mut table = new_table(vec!["Analysis", "Error"]);
    for failure in failures {
        table.add_row(vec![failure.unit.to_string(), failure.error.to_string()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_panels_are_elided() {
        let panel = AnnualPanel::with_years(1960..=2024).unwrap();
        let rendered = panel_table(&panel, 3).to_string();
        assert!(rendered.contains("1962"));
        assert!(rendered.contains("..."));
        assert!(rendered.contains("2022"));
        assert!(!rendered.contains("1990"));
    }

    #[test]
    fn missing_values_render_as_dashes() {
        let panel = AnnualPanel::new(vec![YearRecord::raw(1960, Some(3260.0), None, None, None)]).unwrap();
        let rendered = panel_table(&panel, 5).to_string();
        assert!(rendered.contains("3260.0"));
        assert!(rendered.contains(" - "));
    }

    #[test]
    fn p_values_switch_to_scientific_notation() {
        assert_eq!(fmt_p(Some(0.0312)), "0.0312");
        assert_eq!(fmt_p(Some(0.000012)), "1.20e-5");
        assert_eq!(fmt_p(None), "-");
    }
}
