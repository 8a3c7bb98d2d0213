use crate::error::AnalyticsError;
use crate::report::DescriptiveStats;
use core_types::{AnnualPanel, YearRecord};

/// Columns summarised in the report, with the accessor for each.
pub const DESCRIBED_FIELDS: [(&str, fn(&YearRecord) -> Option<f64>); 4] = [
    ("capital_deepening_pct", |r| r.capital_deepening_pct),
    ("capital_labor_ratio", |r| r.capital_labor_ratio),
    ("real_exports", |r| r.real_exports),
    ("real_gdp", |r| r.real_gdp),
];

/// Summarises a sample. The standard deviation uses the `n - 1` denominator.
pub fn describe(field: &str, values: &[f64]) -> Result<DescriptiveStats, AnalyticsError> {
    if values.is_empty() {
        return Err(AnalyticsError::insufficient(format!("describing {}", field), 1, 0));
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std_dev = (count > 1).then(|| {
        let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    });
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(DescriptiveStats {
        field: field.to_string(),
        count,
        mean,
        std_dev,
        min,
        max,
    })
}

pub fn describe_column(
    panel: &AnnualPanel,
    field: &str,
    accessor: fn(&YearRecord) -> Option<f64>,
) -> Result<DescriptiveStats, AnalyticsError> {
    describe(field, &panel.column(accessor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_a_sample() {
        let stats = describe("x", &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        // Sum of squared deviations is 32.
        assert!((stats.std_dev.unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_deviation() {
        let stats = describe("x", &[3.5]).unwrap();
        assert_eq!(stats.mean, 3.5);
        assert!(stats.std_dev.is_none());
    }

    #[test]
    fn empty_column_is_insufficient() {
        let panel = AnnualPanel::with_years(2000..=2003).unwrap();
        let (field, accessor) = DESCRIBED_FIELDS[0];
        assert!(matches!(
            describe_column(&panel, field, accessor),
            Err(AnalyticsError::InsufficientData { available: 0, .. })
        ));
    }
}
