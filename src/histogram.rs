//! Density-normalized histograms of trial collections.
//!
//! This is the binned form a plotting front end overlays for two sample
//! sizes. Bins are equal-width over `[lo, hi]`; every bin is half-open
//! except the last, which also includes `hi`. Values outside the range
//! are not counted.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_nonzero, ChiSquareError, Result};
use crate::stats;

/// Bins per trial used when no explicit count is given.
pub const BINS_PER_TRIAL: f64 = 0.05;

/// Default bin count for `trials` values: `round(0.05 · trials)`, at
/// least 1.
///
/// # Examples
/// ```
/// use chisq_lab::histogram::default_bin_count;
/// assert_eq!(default_bin_count(1000), 50);
/// assert_eq!(default_bin_count(5), 1);
/// ```
pub fn default_bin_count(trials: usize) -> usize {
    ((trials as f64 * BINS_PER_TRIAL).round() as usize).max(1)
}

/// Equal-width histogram with counts and probability densities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
    densities: Vec<f64>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins.
    ///
    /// `range` defaults to `(min, max)` of the data; a degenerate range
    /// (all values equal) is widened by 0.5 on each side.
    ///
    /// # Errors
    /// `InvalidParameter` if `values` is empty or contains NaN/Inf,
    /// `bins == 0`, or `range` is not a finite increasing interval.
    ///
    /// # Examples
    /// ```
    /// use chisq_lab::histogram::Histogram;
    /// let h = Histogram::new(&[0.0, 0.5, 1.0, 1.0], 2, None).unwrap();
    /// assert_eq!(h.counts(), &[1, 3]);
    /// assert_eq!(h.edges(), &[0.0, 0.5, 1.0]);
    /// ```
    pub fn new(values: &[f64], bins: usize, range: Option<(f64, f64)>) -> Result<Self> {
        ensure_nonzero("bin count", bins)?;
        let (lo, hi) = match range {
            Some((lo, hi)) => {
                if !lo.is_finite() || !hi.is_finite() || hi <= lo {
                    return Err(ChiSquareError::InvalidParameter(format!(
                        "histogram range must be finite with hi > lo, got [{lo}, {hi}]"
                    )));
                }
                (lo, hi)
            }
            None => data_range(values)?,
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0_usize; bins];
        for &v in values {
            if !v.is_finite() {
                return Err(ChiSquareError::InvalidParameter(format!(
                    "cannot bin non-finite value {v}"
                )));
            }
            if v < lo || v > hi {
                continue;
            }
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total: usize = counts.iter().sum();
        let densities = counts
            .iter()
            .map(|&c| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 / (total as f64 * width)
                }
            })
            .collect();

        Ok(Self {
            edges,
            counts,
            densities,
        })
    }

    /// `bins + 1` bin edges, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Counts divided by `(in-range total · bin width)`; integrates to 1
    /// whenever any value fell inside the range.
    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Center of the bin with the highest count (first one on ties).
    pub fn mode(&self) -> f64 {
        let best = self
            .counts
            .iter()
            .enumerate()
            .fold(0, |best, (i, &c)| if c > self.counts[best] { i } else { best });
        0.5 * (self.edges[best] + self.edges[best + 1])
    }
}

fn data_range(values: &[f64]) -> Result<(f64, f64)> {
    let bounds = stats::min(values).zip(stats::max(values));
    match bounds {
        Some((lo, hi)) if lo.is_finite() && hi.is_finite() => {
            if lo == hi {
                Ok((lo - 0.5, hi + 0.5))
            } else {
                Ok((lo, hi))
            }
        }
        _ => Err(ChiSquareError::InvalidParameter(
            "histogram needs at least one finite value".into(),
        )),
    }
}
