//! The true model `f(x) = 1/x`.
//!
//! The same function produces the synthetic observations and the expected
//! values in the residuals, so every fit has zero free parameters and the
//! degrees of freedom equal the number of points.

use crate::error::{ChiSquareError, Result};

/// Evaluates `f(x) = 1/x`.
///
/// No guard against `x == 0`; use [`evaluate`] on untrusted positions.
#[inline]
pub fn reciprocal(x: f64) -> f64 {
    1.0 / x
}

/// Evaluates the model at every position.
///
/// # Errors
/// Returns [`ChiSquareError::DivisionHazard`] naming the first index whose
/// position is exactly zero.
///
/// # Examples
/// ```
/// use chisq_lab::model::evaluate;
/// let f = evaluate(&[1.0, 2.0, 4.0]).unwrap();
/// assert_eq!(f, vec![1.0, 0.5, 0.25]);
/// assert!(evaluate(&[1.0, 0.0]).is_err());
/// ```
pub fn evaluate(x: &[f64]) -> Result<Vec<f64>> {
    x.iter()
        .enumerate()
        .map(|(index, &xi)| {
            if xi == 0.0 {
                Err(ChiSquareError::DivisionHazard { index })
            } else {
                Ok(reciprocal(xi))
            }
        })
        .collect()
}
