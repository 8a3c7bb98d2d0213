//! Ordinary least squares via Householder QR.
//!
//! The solve is exact linear algebra (no iteration), so identical inputs give
//! bit-identical coefficients.

use crate::error::AnalyticsError;
use nalgebra::{DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::f64::consts::PI;

/// A fitted linear model `y = X·β + ε`.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub params: DVector<f64>,
    pub fitted: DVector<f64>,
    pub residuals: DVector<f64>,
    /// `(XᵀX)⁻¹`, to be scaled by the residual variance.
    cov_unscaled: DMatrix<f64>,
    pub ssr: f64,
    pub nobs: usize,
    pub n_params: usize,
}

/// Fits `y` on the columns of `x` by least squares.
///
/// Fails with `InsufficientData` when there are fewer rows than columns and
/// with `SingularMatrix` when the columns are linearly dependent.
pub fn fit(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, AnalyticsError> {
    let (nobs, n_params) = x.shape();
    if nobs != y.len() {
        return Err(AnalyticsError::SingularMatrix(format!(
            "design has {} rows but the response has {} values",
            nobs,
            y.len()
        )));
    }
    if n_params == 0 || nobs < n_params {
        return Err(AnalyticsError::insufficient("least squares", n_params.max(1), nobs));
    }

    let qr = x.clone().qr();
    let r = qr.r();
    let q = qr.q();

    // Numerical rank check on the diagonal of R, the same tolerance LAPACK-based solvers use.
    let max_diag = (0..n_params).map(|i| r[(i, i)].abs()).fold(0.0, f64::max);
    let tolerance = max_diag * nobs.max(n_params) as f64 * f64::EPSILON;
    if let Some(col) = (0..n_params).find(|&i| r[(i, i)].abs() <= tolerance) {
        return Err(AnalyticsError::SingularMatrix(format!(
            "column {} is linearly dependent on the preceding columns",
            col
        )));
    }

    let qty = q.transpose() * y;
    let params = r
        .solve_upper_triangular(&qty)
        .ok_or_else(|| AnalyticsError::SingularMatrix("R factor is not invertible".to_string()))?;
    let r_inv = r
        .clone()
        .try_inverse()
        .ok_or_else(|| AnalyticsError::SingularMatrix("R factor is not invertible".to_string()))?;
    let cov_unscaled = &r_inv * r_inv.transpose();

    let fitted = x * &params;
    let residuals = y - &fitted;
    let ssr = residuals.norm_squared();

    Ok(OlsFit {
        params,
        fitted,
        residuals,
        cov_unscaled,
        ssr,
        nobs,
        n_params,
    })
}

impl OlsFit {
    pub fn df_resid(&self) -> usize {
        self.nobs - self.n_params
    }

    /// Unbiased residual variance; absent when the fit leaves no degrees of freedom.
    pub fn sigma2(&self) -> Option<f64> {
        match self.df_resid() {
            0 => None,
            df => Some(self.ssr / df as f64),
        }
    }

    pub fn std_errors(&self) -> Option<Vec<f64>> {
        let sigma2 = self.sigma2()?;
        Some(
            (0..self.n_params)
                .map(|i| (sigma2 * self.cov_unscaled[(i, i)]).sqrt())
                .collect(),
        )
    }

    /// `β_i / se(β_i)`; absent when the standard error is undefined or zero.
    pub fn t_value(&self, i: usize) -> Option<f64> {
        let se = *self.std_errors()?.get(i)?;
        (se > 0.0).then(|| self.params[i] / se)
    }

    /// Gaussian log-likelihood at the fitted parameters.
    pub fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -n / 2.0 * ((2.0 * PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood() + 2.0 * self.n_params as f64
    }

    pub fn bic(&self) -> f64 {
        -2.0 * self.log_likelihood() + self.n_params as f64 * (self.nobs as f64).ln()
    }
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
pub fn two_sided_p_value(t: f64, df: usize) -> Result<f64, AnalyticsError> {
    if t.is_infinite() {
        return Ok(0.0);
    }
    let dist = StudentsT::new(0.0, 1.0, df as f64).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    Ok((2.0 * dist.sf(t.abs())).min(1.0))
}

/// The `(1 + level) / 2` quantile of Student's t, for symmetric confidence intervals.
pub fn t_critical(level: f64, df: usize) -> Result<f64, AnalyticsError> {
    let dist = StudentsT::new(0.0, 1.0, df as f64).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    Ok(dist.inverse_cdf(0.5 + level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design(xs: &[f64]) -> DMatrix<f64> {
        DMatrix::from_fn(xs.len(), 2, |i, j| if j == 0 { 1.0 } else { xs[i] })
    }

    #[test]
    fn recovers_exact_coefficients() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = DVector::from_iterator(xs.len(), xs.iter().map(|x| 3.0 - 0.5 * x));
        let fit = fit(&design(&xs), &y).unwrap();

        assert!((fit.params[0] - 3.0).abs() < 1e-12);
        assert!((fit.params[1] + 0.5).abs() < 1e-12);
        assert!(fit.ssr < 1e-20);
        assert_eq!(fit.df_resid(), 3);
    }

    #[test]
    fn standard_errors_match_the_closed_form() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [1.1, 1.9, 3.2, 3.8, 5.3, 5.9];
        let fit = fit(&design(&xs), &DVector::from_column_slice(&ys)).unwrap();

        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
        let sigma2 = fit.ssr / (n - 2.0);
        let se_slope = (sigma2 / sxx).sqrt();
        let se_intercept = (sigma2 * (1.0 / n + mean_x * mean_x / sxx)).sqrt();

        let se = fit.std_errors().unwrap();
        assert!((se[1] - se_slope).abs() < 1e-12);
        assert!((se[0] - se_intercept).abs() < 1e-12);
    }

    #[test]
    fn collinear_columns_are_singular() {
        let x = DMatrix::from_fn(4, 2, |i, j| (i as f64 + 1.0) * (j as f64 + 1.0));
        let y = DVector::from_column_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert!(matches!(fit(&x, &y), Err(AnalyticsError::SingularMatrix(_))));
    }

    #[test]
    fn fewer_rows_than_columns_is_insufficient() {
        let y = DVector::from_column_slice(&[1.0]);
        assert!(matches!(
            fit(&design(&[1.0]), &y),
            Err(AnalyticsError::InsufficientData { .. })
        ));
    }

    #[test]
    fn exactly_determined_fit_has_no_inference() {
        let y = DVector::from_column_slice(&[1.0, 3.0]);
        let fit = fit(&design(&[0.0, 1.0]), &y).unwrap();
        assert_eq!(fit.df_resid(), 0);
        assert!(fit.sigma2().is_none());
        assert!(fit.t_value(1).is_none());
    }

    #[test]
    fn p_values_are_two_sided() {
        assert!((two_sided_p_value(0.0, 10).unwrap() - 1.0).abs() < 1e-12);
        // t(10) 97.5% quantile is 2.228.
        assert!((two_sided_p_value(2.228_138_85, 10).unwrap() - 0.05).abs() < 1e-6);
        assert!((t_critical(0.95, 10).unwrap() - 2.228_138_85).abs() < 1e-5);
        assert_eq!(two_sided_p_value(f64::INFINITY, 3).unwrap(), 0.0);
    }
}
