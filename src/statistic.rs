//! Chi-squared goodness-of-fit against the true model.
//!
//! ```text
//! χ²       = Σ (yᵢ − 1/xᵢ)² / σ²
//! χ²_red   = χ² / N
//! ```
//!
//! The model has no free parameters, so the degrees of freedom equal `N`.
//! For correctly specified σ, `χ²_red` has mean 1 and standard deviation
//! `√(2/N)`. Overstating σ by a factor `c` scales `χ²_red` by `1/c²`.

use crate::error::{ensure_positive_sigma, ChiSquareError, Result};
use crate::generator::Trial;
use crate::model;
use crate::stats::CompensatedSum;

/// Sum of squared normalized residuals of `y` against `1/x`.
///
/// # Errors
/// - `InvalidParameter` if the inputs are empty, have different lengths,
///   or `sigma` is not finite and positive.
/// - `DivisionHazard` if any `x` is exactly zero.
///
/// # Examples
/// ```
/// use chisq_lab::statistic::chi_squared;
/// // Residuals of 0.1 and -0.1 with σ = 0.1 contribute 1 each.
/// let chi2 = chi_squared(&[1.0, 2.0], &[1.1, 0.4], 0.1).unwrap();
/// assert!((chi2 - 2.0).abs() < 1e-12);
/// ```
pub fn chi_squared(x: &[f64], y: &[f64], sigma: f64) -> Result<f64> {
    if x.is_empty() {
        return Err(ChiSquareError::InvalidParameter(
            "dataset must contain at least one point".into(),
        ));
    }
    if x.len() != y.len() {
        return Err(ChiSquareError::InvalidParameter(format!(
            "x and y lengths differ: {} vs {}",
            x.len(),
            y.len()
        )));
    }
    ensure_positive_sigma("assumed sigma", sigma)?;

    let expected = model::evaluate(x)?;
    let variance = sigma * sigma;
    let sum: CompensatedSum = y
        .iter()
        .zip(&expected)
        .map(|(&obs, &exp)| {
            let r = obs - exp;
            r * r / variance
        })
        .collect();
    Ok(sum.value())
}

/// Chi-squared divided by the number of points.
///
/// # Errors
/// Same as [`chi_squared`].
///
/// # Examples
/// ```
/// use chisq_lab::statistic::compute_reduced_statistic;
/// let x = [1.0, 2.0, 4.0];
/// let y = [1.0, 0.5, 0.25];
/// assert_eq!(compute_reduced_statistic(&x, &y, 0.1).unwrap(), 0.0);
/// ```
pub fn compute_reduced_statistic(x: &[f64], y: &[f64], sigma: f64) -> Result<f64> {
    Ok(chi_squared(x, y, sigma)? / x.len() as f64)
}

impl Trial {
    /// Reduced chi-squared of this trial under the uncertainty
    /// `assumed_sigma`, which may differ from the injected noise.
    pub fn reduced_statistic(&self, assumed_sigma: f64) -> Result<f64> {
        compute_reduced_statistic(self.x(), self.y(), assumed_sigma)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn statistic_non_negative(
            noise in proptest::collection::vec(-1.0_f64..1.0, 1..100),
            sigma in 0.001_f64..10.0,
        ) {
            let x: Vec<f64> = (1..=noise.len()).map(|i| i as f64).collect();
            let y: Vec<f64> = x.iter().zip(&noise).map(|(&xi, &e)| 1.0 / xi + e).collect();
            prop_assert!(compute_reduced_statistic(&x, &y, sigma).unwrap() >= 0.0);
        }

        #[test]
        fn noiseless_data_scores_zero(
            n in 1_usize..200,
            start in 0.01_f64..50.0,
            sigma in 0.001_f64..10.0,
        ) {
            let x: Vec<f64> = (0..n).map(|i| start + i as f64 * 0.5).collect();
            let y: Vec<f64> = x.iter().map(|&v| 1.0 / v).collect();
            prop_assert_eq!(compute_reduced_statistic(&x, &y, sigma).unwrap(), 0.0);
        }
    }
}
