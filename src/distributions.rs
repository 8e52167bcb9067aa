//! Analytic chi-squared distribution.
//!
//! The sampling distribution that a trial collection approximates: for a
//! correct model with correct σ, `χ² ~ ChiSquared(N)` and the reduced
//! statistic is `χ²/N`. Comparing the empirical order statistic with
//! [`ChiSquared::reduced_quantile`] shows how well `M` trials resolve a
//! tail.
//!
//! | Quantity | ChiSquared(k) | Reduced (÷k) |
//! |---|---|---|
//! | Mean | k | 1 |
//! | Variance | 2k | 2/k |

use crate::error::{ChiSquareError, Result};
use crate::special;

/// Chi-squared distribution with `k` degrees of freedom.
///
/// # Mathematical Definition
/// - PDF: x^(k/2−1) e^(−x/2) / (2^(k/2) Γ(k/2)) for x > 0
/// - CDF: P(k/2, x/2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    k: f64,
}

impl ChiSquared {
    /// Creates a chi-squared distribution with `k` degrees of freedom.
    ///
    /// # Errors
    /// `InvalidParameter` if `k` is not finite and positive.
    pub fn new(k: f64) -> Result<Self> {
        if !k.is_finite() || k <= 0.0 {
            return Err(ChiSquareError::InvalidParameter(format!(
                "ChiSquared requires finite k > 0, got k={k}"
            )));
        }
        Ok(Self { k })
    }

    /// The distribution of `χ²` for a zero-parameter fit of `n` points.
    pub fn for_sample_size(n: usize) -> Result<Self> {
        Self::new(n as f64)
    }

    pub fn mean(&self) -> f64 {
        self.k
    }

    pub fn variance(&self) -> f64 {
        2.0 * self.k
    }

    /// Standard deviation of `χ²/k`, i.e. `√(2/k)`.
    pub fn reduced_std_dev(&self) -> f64 {
        (2.0 / self.k).sqrt()
    }

    pub fn cdf(&self, x: f64) -> f64 {
        special::chi_squared_cdf(x, self.k)
    }

    /// Inverse CDF by bisection on [`cdf`](Self::cdf).
    ///
    /// Returns `None` if `p` is outside `(0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use chisq_lab::distributions::ChiSquared;
    /// let d = ChiSquared::new(1.0).unwrap();
    /// assert!((d.quantile(0.95).unwrap() - 3.841).abs() < 1e-3);
    /// ```
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if p.is_nan() || p <= 0.0 || p >= 1.0 {
            return None;
        }
        let mut lo = 0.0;
        let mut hi = self.k.max(1.0);
        while self.cdf(hi) < p {
            lo = hi;
            hi *= 2.0;
        }
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo <= 1e-12 * hi {
                break;
            }
        }
        Some(0.5 * (lo + hi))
    }

    /// Quantile of the reduced statistic `χ²/k`.
    ///
    /// # Examples
    /// ```
    /// use chisq_lab::distributions::ChiSquared;
    /// let d = ChiSquared::for_sample_size(30).unwrap();
    /// let q = d.reduced_quantile(0.999).unwrap();
    /// assert!((q - 59.703 / 30.0).abs() < 1e-3);
    /// ```
    pub fn reduced_quantile(&self, p: f64) -> Option<f64> {
        self.quantile(p).map(|q| q / self.k)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn quantile_inverts_cdf(k in 1.0_f64..400.0, p in 0.001_f64..0.999) {
            let d = ChiSquared::new(k).unwrap();
            let q = d.quantile(p).unwrap();
            prop_assert!((d.cdf(q) - p).abs() < 1e-8, "k={k}, p={p}, q={q}");
        }
    }
}
