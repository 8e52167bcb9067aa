//! Error taxonomy shared by every stage of the simulation.

use thiserror::Error;

/// Errors raised by trial generation, statistic computation, and
/// percentile extraction.
///
/// All variants are unrecoverable at the point of occurrence: callers
/// propagate them and discard any partially built collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChiSquareError {
    /// A sample size, trial count, σ, or spacing parameter is out of its
    /// valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A requested order-statistic rank is not inside `[0, len)`.
    #[error("rank {rank} out of range for collection of length {len}")]
    OutOfRange { rank: usize, len: usize },

    /// An x-position is exactly zero, where `f(x) = 1/x` is undefined.
    #[error("x-position at index {index} is zero; 1/x is undefined")]
    DivisionHazard { index: usize },
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, ChiSquareError>;

/// Fails with [`ChiSquareError::InvalidParameter`] unless `sigma` is finite
/// and strictly positive.
pub(crate) fn ensure_positive_sigma(name: &str, sigma: f64) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ChiSquareError::InvalidParameter(format!(
            "{name} must be finite and > 0, got {sigma}"
        )));
    }
    Ok(())
}

/// Fails with [`ChiSquareError::InvalidParameter`] if `count` is zero.
pub(crate) fn ensure_nonzero(name: &str, count: usize) -> Result<()> {
    if count == 0 {
        return Err(ChiSquareError::InvalidParameter(format!(
            "{name} must be >= 1, got 0"
        )));
    }
    Ok(())
}
