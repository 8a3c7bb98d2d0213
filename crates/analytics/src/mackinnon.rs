//! MacKinnon response surfaces for the Dickey-Fuller distribution,
//! for the constant-only test regression with a single integrated variable.
//!
//! p-values: MacKinnon (1994), "Approximate asymptotic distribution functions
//! for unit-root and cointegration tests".
//! Critical values: MacKinnon (2010), "Critical values for cointegration tests".

use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Above this statistic the p-value is 1.
const TAU_MAX: f64 = 2.74;
/// Below this statistic the p-value is 0.
const TAU_MIN: f64 = -18.83;
/// Boundary between the small-p and large-p polynomials.
const TAU_STAR: f64 = -1.61;

/// Coefficients in ascending powers of the statistic.
const SMALL_P: [f64; 3] = [2.1659, 1.4412, 0.038269];
const LARGE_P: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

/// Coefficients in ascending powers of `1 / nobs`, per significance level.
const CRIT_1PCT: [f64; 4] = [-3.43035, -6.5393, -16.786, -79.433];
const CRIT_5PCT: [f64; 4] = [-2.86154, -2.8903, -4.234, -40.040];
const CRIT_10PCT: [f64; 4] = [-2.56677, -1.5384, -2.809, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalValues {
    pub one_pct: f64,
    pub five_pct: f64,
    pub ten_pct: f64,
}

fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Approximate p-value of an ADF statistic.
pub fn p_value(statistic: f64) -> Result<f64, AnalyticsError> {
    if statistic > TAU_MAX {
        return Ok(1.0);
    }
    if statistic < TAU_MIN {
        return Ok(0.0);
    }
    let z = if statistic <= TAU_STAR {
        polyval(&SMALL_P, statistic)
    } else {
        polyval(&LARGE_P, statistic)
    };
    let normal = Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    Ok(normal.cdf(z))
}

/// Finite-sample critical values for a test regression with `nobs` observations.
pub fn critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    CriticalValues {
        one_pct: polyval(&CRIT_1PCT, inv),
        five_pct: polyval(&CRIT_5PCT, inv),
        ten_pct: polyval(&CRIT_10PCT, inv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_percent_asymptotic_critical_value_has_p_near_five_percent() {
        let p = p_value(-2.86).unwrap();
        assert!((p - 0.05).abs() < 0.005, "p = {p}");
    }

    #[test]
    fn p_value_is_monotone_and_clamped() {
        let grid = [-25.0, -18.0, -6.0, -3.5, -2.0, -1.61, -1.0, 0.0, 1.5, 2.7, 3.0];
        let ps: Vec<f64> = grid.iter().map(|&t| p_value(t).unwrap()).collect();
        assert!(ps.windows(2).all(|w| w[0] <= w[1]), "{ps:?}");
        assert_eq!(ps[0], 0.0);
        assert_eq!(*ps.last().unwrap(), 1.0);
    }

    #[test]
    fn polynomials_meet_at_the_boundary() {
        let below = p_value(TAU_STAR).unwrap();
        let above = p_value(TAU_STAR + 1e-9).unwrap();
        assert!((below - above).abs() < 1e-3);
    }

    #[test]
    fn critical_values_shrink_towards_asymptotic_values() {
        let cv = critical_values(100);
        assert!((cv.one_pct - -3.4975).abs() < 1e-3);
        assert!((cv.five_pct - -2.8909).abs() < 1e-3);
        assert!((cv.ten_pct - -2.5824).abs() < 1e-3);

        let large = critical_values(1_000_000);
        assert!((large.five_pct - -2.86154).abs() < 1e-4);
        assert!(cv.one_pct < cv.five_pct && cv.five_pct < cv.ten_pct);
    }
}
