//! # Derivation of the capital-intensity ratios
//!
//! Pure functions over `YearRecord`s. Both outputs are `None` whenever an
//! input is missing or the denominator is zero; no rounding happens here.

use core_types::{AnnualPanel, YearRecord};

/// Investment and GDP are reported in billions of dollars.
pub const DOLLARS_PER_BILLION: f64 = 1e9;
/// The labor force is reported in thousands of persons.
pub const PERSONS_PER_THOUSAND: f64 = 1e3;

/// Investment as a percentage of GDP.
pub fn capital_deepening_pct(real_investment: Option<f64>, real_gdp: Option<f64>) -> Option<f64> {
    ratio(real_investment?, real_gdp?).map(|r| r * 100.0)
}

/// Dollars of investment per worker: `(investment × 10⁹) / (labor force × 10³)`.
pub fn capital_labor_ratio(real_investment: Option<f64>, labor_force: Option<f64>) -> Option<f64> {
    ratio(
        real_investment? * DOLLARS_PER_BILLION,
        labor_force? * PERSONS_PER_THOUSAND,
    )
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Returns `record` with both derived fields recomputed from its raw fields.
pub fn derive_record(record: YearRecord) -> YearRecord {
    YearRecord {
        capital_deepening_pct: capital_deepening_pct(record.real_investment, record.real_gdp),
        capital_labor_ratio: capital_labor_ratio(record.real_investment, record.labor_force),
        ..record
    }
}

/// Applies `derive_record` to every year, producing the completed panel.
pub fn derive_panel(panel: AnnualPanel) -> AnnualPanel {
    let derived = panel.map_records(derive_record);

    let missing_deepening = derived.iter().filter(|r| r.capital_deepening_pct.is_none()).count();
    let missing_ratio = derived.iter().filter(|r| r.capital_labor_ratio.is_none()).count();
    tracing::info!(
        years = derived.len(),
        missing_deepening,
        missing_ratio,
        "Derived capital deepening and capital-labor ratio"
    );

    derived
}
