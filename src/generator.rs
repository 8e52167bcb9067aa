//! Sample Generator: synthetic datasets drawn from `y = 1/x` plus Gaussian
//! measurement noise.
//!
//! Positions follow an arithmetic [`Spacing`] that is strictly positive
//! and strictly increasing; observations add independent `Normal(0, σ)`
//! draws from an injected random source.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_nonzero, ensure_positive_sigma, ChiSquareError, Result};
use crate::model;

/// Arithmetic position rule `x_i = start + i·step`.
///
/// Both `start` and `step` are finite and strictly positive, so no
/// generated position can be zero or repeat. Deserialization goes through
/// [`Spacing::new`] and enforces the same bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSpacing")]
pub struct Spacing {
    start: f64,
    step: f64,
}

#[derive(Deserialize)]
struct RawSpacing {
    start: f64,
    step: f64,
}

impl TryFrom<RawSpacing> for Spacing {
    type Error = ChiSquareError;

    fn try_from(raw: RawSpacing) -> Result<Self> {
        Spacing::new(raw.start, raw.step)
    }
}

impl Spacing {
    /// Creates a spacing starting at `start` with increment `step`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` unless both values are finite and > 0.
    pub fn new(start: f64, step: f64) -> Result<Self> {
        if !start.is_finite() || start <= 0.0 {
            return Err(ChiSquareError::InvalidParameter(format!(
                "spacing start must be finite and > 0, got {start}"
            )));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(ChiSquareError::InvalidParameter(format!(
                "spacing step must be finite and > 0, got {step}"
            )));
        }
        Ok(Self { start, step })
    }

    /// Spreads `n` positions evenly over `[start, end)`.
    ///
    /// With `[1, 31)`, `n = 30` gives `1, 2, …, 30` and `n = 300` gives
    /// `1.0, 1.1, …, 30.9`.
    ///
    /// # Examples
    /// ```
    /// use chisq_lab::generator::Spacing;
    /// let s = Spacing::spanning(1.0, 31.0, 30).unwrap();
    /// assert_eq!(s.positions(3), vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn spanning(start: f64, end: f64, n: usize) -> Result<Self> {
        ensure_nonzero("sample size", n)?;
        if !end.is_finite() || end <= start {
            return Err(ChiSquareError::InvalidParameter(format!(
                "spacing range must satisfy end > start, got [{start}, {end})"
            )));
        }
        Self::new(start, (end - start) / n as f64)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Position of point `i`.
    pub fn position(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// The first `n` positions.
    pub fn positions(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| self.position(i)).collect()
    }
}

/// One simulated dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    x: Vec<f64>,
    y: Vec<f64>,
    sigma: f64,
}

impl Trial {
    /// Positions, strictly increasing.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Noisy observations, one per position.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Standard deviation of the noise injected into `y`.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Number of points `N`.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Consumes the trial, returning `(x, y)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

/// Generates one dataset of `sample_size` points.
///
/// `y_i = 1/x_i + ε_i` with `ε_i ~ Normal(0, sigma)` drawn from `rng`.
///
/// # Errors
/// - `InvalidParameter` if `sample_size == 0` or `sigma` is not finite
///   and positive.
/// - `DivisionHazard` if any position is exactly zero.
///
/// # Examples
/// ```
/// use chisq_lab::generator::{generate_trial, Spacing};
/// use chisq_lab::random::create_rng;
/// let spacing = Spacing::new(1.0, 1.0).unwrap();
/// let mut rng = create_rng(42);
/// let trial = generate_trial(30, 0.1, &spacing, &mut rng).unwrap();
/// assert_eq!(trial.len(), 30);
/// assert_eq!(trial.x()[0], 1.0);
/// ```
pub fn generate_trial<R: Rng + ?Sized>(
    sample_size: usize,
    sigma: f64,
    spacing: &Spacing,
    rng: &mut R,
) -> Result<Trial> {
    ensure_nonzero("sample size", sample_size)?;
    ensure_positive_sigma("noise sigma", sigma)?;
    let noise = Normal::new(0.0, sigma)
        .map_err(|e| ChiSquareError::InvalidParameter(format!("noise sigma {sigma}: {e}")))?;

    let x = spacing.positions(sample_size);
    let truth = model::evaluate(&x)?;
    let y = truth.into_iter().map(|f| f + noise.sample(rng)).collect();

    Ok(Trial { x, y, sigma })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn positions_positive_and_increasing(
            start in 0.001_f64..100.0,
            step in 0.001_f64..10.0,
            n in 1_usize..200,
            seed in 0_u64..10000,
        ) {
            let spacing = Spacing::new(start, step).unwrap();
            let trial = generate_trial(n, 0.1, &spacing, &mut create_rng(seed)).unwrap();
            prop_assert_eq!(trial.len(), n);
            prop_assert!(trial.x().iter().all(|&x| x > 0.0));
            prop_assert!(trial.x().windows(2).all(|w| w[1] > w[0]));
            prop_assert!(trial.y().iter().all(|y| y.is_finite()));
        }
    }
}
