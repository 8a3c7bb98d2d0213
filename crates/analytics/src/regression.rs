//! Simple linear regression with a full OLS summary.

use crate::error::AnalyticsError;
use crate::ols::{self, OlsFit};
use crate::report::{CoefficientEstimate, FittedPoint, RegressionSummary};
use configuration::RegressionConfig;
use core_types::AnnualPanel;
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// The smallest sample a line can be fitted through.
pub const MIN_REGRESSION_OBS: usize = 2;

/// Fits `real_exports = β₀ + β₁ · capital_labor_ratio + ε` over the years where both are present.
pub fn regress_exports_on_capital_labor(
    panel: &AnnualPanel,
    config: &RegressionConfig,
) -> Result<RegressionSummary, AnalyticsError> {
    let points = panel.paired(|r| r.capital_labor_ratio, |r| r.real_exports);
    tracing::debug!(
        pairs = points.len(),
        years = panel.len(),
        "Selected years with both capital_labor_ratio and real_exports"
    );
    simple_regression("real_exports", "capital_labor_ratio", &points, config.confidence_level)
}

/// Fits `y` on `x` by least squares. `points` holds `(year, x, y)` triples.
pub fn simple_regression(
    dependent: &str,
    independent: &str,
    points: &[(i32, f64, f64)],
    confidence_level: f64,
) -> Result<RegressionSummary, AnalyticsError> {
    let nobs = points.len();
    if nobs < MIN_REGRESSION_OBS {
        return Err(AnalyticsError::insufficient(
            format!("regressing {} on {}", dependent, independent),
            MIN_REGRESSION_OBS,
            nobs,
        ));
    }

    let first_x = points[0].1;
    if points.iter().all(|&(_, x, _)| x == first_x) {
        return Err(AnalyticsError::SingularMatrix(format!(
            "{} has zero variance ({} in every year)",
            independent, first_x
        )));
    }

    let design = DMatrix::from_fn(nobs, 2, |i, j| if j == 0 { 1.0 } else { points[i].1 });
    let response = DVector::from_iterator(nobs, points.iter().map(|&(_, _, y)| y));
    let fit = ols::fit(&design, &response)?;
    let df_resid = fit.df_resid();

    let mean_y = response.mean();
    let tss: f64 = response.iter().map(|y| (y - mean_y).powi(2)).sum();
    let ess = (tss - fit.ssr).max(0.0);

    let r_squared = (tss > 0.0).then(|| 1.0 - fit.ssr / tss);
    let adj_r_squared = r_squared
        .filter(|_| df_resid > 0)
        .map(|r2| 1.0 - (1.0 - r2) * (nobs - 1) as f64 / df_resid as f64);

    let (f_statistic, f_p_value) = f_test(ess, fit.ssr, tss, df_resid)?;

    let fitted = points
        .iter()
        .enumerate()
        .map(|(i, &(year, x, observed))| FittedPoint {
            year,
            x,
            observed,
            fitted: fit.fitted[i],
            residual: fit.residuals[i],
        })
        .collect();

    Ok(RegressionSummary {
        dependent: dependent.to_string(),
        independent: independent.to_string(),
        nobs,
        df_resid,
        intercept: coefficient(&fit, 0, "const", confidence_level)?,
        slope: coefficient(&fit, 1, independent, confidence_level)?,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_p_value,
        residual_std_error: fit.sigma2().map(f64::sqrt),
        log_likelihood: fit.log_likelihood(),
        aic: fit.aic(),
        bic: fit.bic(),
        durbin_watson: durbin_watson(fit.residuals.as_slice(), fit.ssr),
        confidence_level,
        fitted,
    })
}

fn coefficient(
    fit: &OlsFit,
    index: usize,
    name: &str,
    confidence_level: f64,
) -> Result<CoefficientEstimate, AnalyticsError> {
    let estimate = fit.params[index];
    let df = fit.df_resid();
    let std_error = fit.std_errors().map(|se| se[index]);
    let t_stat = fit.t_value(index);
    let p_value = t_stat.map(|t| ols::two_sided_p_value(t, df)).transpose()?;
    let conf_interval = match std_error {
        Some(se) if df > 0 => {
            let half_width = ols::t_critical(confidence_level, df)? * se;
            Some((estimate - half_width, estimate + half_width))
        }
        _ => None,
    };

    Ok(CoefficientEstimate {
        name: name.to_string(),
        estimate,
        std_error,
        t_stat,
        p_value,
        conf_interval,
    })
}

/// Overall F test of the slope against the intercept-only model.
fn f_test(ess: f64, ssr: f64, tss: f64, df_resid: usize) -> Result<(Option<f64>, Option<f64>), AnalyticsError> {
    if df_resid == 0 || tss <= 0.0 {
        return Ok((None, None));
    }
    if ssr == 0.0 {
        return Ok((Some(f64::INFINITY), Some(0.0)));
    }
    let f = ess / (ssr / df_resid as f64);
    let dist = FisherSnedecor::new(1.0, df_resid as f64).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    Ok((Some(f), Some(dist.sf(f))))
}

fn durbin_watson(residuals: &[f64], ssr: f64) -> Option<f64> {
    if ssr == 0.0 {
        return None;
    }
    let squared_diffs: f64 = residuals.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    Some(squared_diffs / ssr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::YearRecord;

    fn panel_from(pairs: &[(Option<f64>, Option<f64>)]) -> AnnualPanel {
        let records = pairs
            .iter()
            .enumerate()
            .map(|(i, &(ratio, exports))| YearRecord {
                capital_labor_ratio: ratio,
                real_exports: exports,
                ..YearRecord::empty(1960 + i as i32)
            })
            .collect();
        AnnualPanel::new(records).unwrap()
    }

    fn noisy_points() -> Vec<(i32, f64, f64)> {
        let ys = [12.1, 13.8, 16.2, 17.9, 20.4, 21.7, 24.3, 25.8, 28.1, 30.2];
        ys.iter()
            .enumerate()
            .map(|(i, &y)| (2000 + i as i32, i as f64 + 1.0, y))
            .collect()
    }

    #[test]
    fn perfectly_linear_exports_recover_the_line() {
        let pairs: Vec<_> = (0..30)
            .map(|i| {
                let ratio = 1000.0 + 250.0 * i as f64;
                (Some(ratio), Some(2.0 * ratio + 100.0))
            })
            .collect();
        let summary = regress_exports_on_capital_labor(&panel_from(&pairs), &RegressionConfig::default()).unwrap();

        assert!((summary.slope.estimate - 2.0).abs() < 1e-6);
        assert!((summary.intercept.estimate - 100.0).abs() < 1e-6);
        assert!((summary.r_squared.unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(summary.nobs, 30);
        assert_eq!(summary.dependent, "real_exports");
        assert_eq!(summary.slope.name, "capital_labor_ratio");
    }

    #[test]
    fn only_complete_pairs_are_used() {
        let pairs = [
            (Some(1.0), Some(3.0)),
            (None, Some(4.0)),
            (Some(2.0), None),
            (Some(3.0), Some(7.2)),
            (Some(4.0), Some(8.9)),
        ];
        let summary = regress_exports_on_capital_labor(&panel_from(&pairs), &RegressionConfig::default()).unwrap();

        assert_eq!(summary.nobs, 3);
        let years: Vec<i32> = summary.fitted.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1960, 1963, 1964]);
    }

    #[test]
    fn fewer_than_two_pairs_is_insufficient() {
        let panel = panel_from(&[(Some(1.0), Some(2.0)), (None, Some(3.0)), (Some(4.0), None)]);
        let err = regress_exports_on_capital_labor(&panel, &RegressionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::InsufficientData {
                context: "regressing real_exports on capital_labor_ratio".to_string(),
                required: 2,
                available: 1,
            }
        );

        let empty = AnnualPanel::default();
        assert!(matches!(
            regress_exports_on_capital_labor(&empty, &RegressionConfig::default()),
            Err(AnalyticsError::InsufficientData { available: 0, .. })
        ));
    }

    #[test]
    fn zero_variance_regressor_is_singular() {
        let points = [(2000, 5.0, 1.0), (2001, 5.0, 2.0), (2002, 5.0, 4.0)];
        assert!(matches!(
            simple_regression("y", "x", &points, 0.95),
            Err(AnalyticsError::SingularMatrix(_))
        ));
    }

    #[test]
    fn summary_matches_closed_form_statistics() {
        let points = noisy_points();
        let summary = simple_regression("y", "x", &points, 0.95).unwrap();

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.1).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.2).sum::<f64>() / n;
        let sxx: f64 = points.iter().map(|p| (p.1 - mean_x).powi(2)).sum();
        let sxy: f64 = points.iter().map(|p| (p.1 - mean_x) * (p.2 - mean_y)).sum();
        let syy: f64 = points.iter().map(|p| (p.2 - mean_y).powi(2)).sum();
        let slope = sxy / sxx;

        assert!((summary.slope.estimate - slope).abs() < 1e-10);
        assert!((summary.intercept.estimate - (mean_y - slope * mean_x)).abs() < 1e-10);
        assert!((summary.r_squared.unwrap() - sxy * sxy / (sxx * syy)).abs() < 1e-10);
        assert_eq!(summary.df_resid, 8);

        // In simple regression the F statistic is the squared slope t statistic.
        let t = summary.slope.t_stat.unwrap();
        assert!((summary.f_statistic.unwrap() - t * t).abs() < 1e-6 * t * t);
        assert!((summary.f_p_value.unwrap() - summary.slope.p_value.unwrap()).abs() < 1e-9);

        let (lower, upper) = summary.slope.conf_interval.unwrap();
        assert!(lower < summary.slope.estimate && summary.slope.estimate < upper);
        let half_width = ols::t_critical(0.95, 8).unwrap() * summary.slope.std_error.unwrap();
        assert!((upper - lower - 2.0 * half_width).abs() < 1e-10);

        let dw = summary.durbin_watson.unwrap();
        assert!(dw > 0.0 && dw < 4.0);
    }

    #[test]
    fn fitted_points_reconstruct_observations() {
        let summary = simple_regression("y", "x", &noisy_points(), 0.9).unwrap();
        for point in &summary.fitted {
            assert!((point.fitted + point.residual - point.observed).abs() < 1e-10);
            let line = summary.intercept.estimate + summary.slope.estimate * point.x;
            assert!((point.fitted - line).abs() < 1e-10);
        }
        assert_eq!(summary.confidence_level, 0.9);
    }

    #[test]
    fn two_points_fit_exactly_without_inference() {
        let summary = simple_regression("y", "x", &[(2000, 1.0, 3.0), (2001, 2.0, 5.0)], 0.95).unwrap();

        assert_eq!(summary.df_resid, 0);
        assert!((summary.slope.estimate - 2.0).abs() < 1e-12);
        assert!(summary.slope.std_error.is_none());
        assert!(summary.slope.p_value.is_none());
        assert!(summary.slope.conf_interval.is_none());
        assert!(summary.f_statistic.is_none());
        assert!(summary.adj_r_squared.is_none());
        assert!(summary.residual_std_error.is_none());
    }

    #[test]
    fn constant_dependent_variable_has_no_r_squared() {
        let points = [(2000, 1.0, 7.0), (2001, 2.0, 7.0), (2002, 3.0, 7.0), (2003, 4.0, 7.0)];
        let summary = simple_regression("y", "x", &points, 0.95).unwrap();

        assert!(summary.r_squared.is_none());
        assert!(summary.f_statistic.is_none());
        assert!(summary.slope.estimate.abs() < 1e-12);
    }
}
