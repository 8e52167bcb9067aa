//! Percentile Extractor: empirical order statistics of a trial
//! collection.
//!
//! Extraction sorts an index permutation rather than the data, so the
//! collection keeps its trial order. The sort is stable: equal values keep
//! their original relative order, which makes the permutation fully
//! deterministic.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChiSquareError, Result};
use crate::experiment::TrialCollection;

/// Tolerance absorbed before flooring `confidence · trials`.
const RANK_EPSILON: f64 = 1e-9;

/// Returns the stable ascending permutation of `values`.
///
/// `values[perm[0]]` is the smallest element. Ordering uses
/// [`f64::total_cmp`], so NaN sorts after every finite value.
///
/// # Examples
/// ```
/// use chisq_lab::percentile::argsort;
/// assert_eq!(argsort(&[0.3, 0.1, 0.2, 0.1]), vec![1, 3, 2, 0]);
/// ```
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    indices
}

/// Returns the `rank`-th smallest value (0-indexed) of `collection`.
///
/// `rank = 0` is the minimum and `rank = len − 1` the maximum. The input
/// is not modified.
///
/// # Errors
/// [`ChiSquareError::OutOfRange`] if `rank >= collection.len()`.
///
/// # Examples
/// ```
/// use chisq_lab::percentile::extract_percentile;
/// let data = [0.9, 1.4, 0.7, 1.1];
/// assert_eq!(extract_percentile(&data, 0).unwrap(), 0.7);
/// assert_eq!(extract_percentile(&data, 3).unwrap(), 1.4);
/// assert!(extract_percentile(&data, 4).is_err());
/// ```
pub fn extract_percentile(collection: &[f64], rank: usize) -> Result<f64> {
    if rank >= collection.len() {
        return Err(ChiSquareError::OutOfRange {
            rank,
            len: collection.len(),
        });
    }
    let order = argsort(collection);
    let value = collection[order[rank]];
    trace!(rank, len = collection.len(), value, "extracted order statistic");
    Ok(value)
}

/// Rank of the empirical `confidence` quantile among `trials` values:
/// `floor(confidence · trials) − 1`.
///
/// The floor tolerates `1e-9` of binary representation error, so a
/// product such as `0.999 · 1000` always floors to 999.
///
/// # Errors
/// - `InvalidParameter` if `confidence` is outside `(0, 1]` or
///   `trials == 0`.
/// - `OutOfRange` if `confidence · trials < 1`, leaving no rank.
///
/// # Examples
/// ```
/// use chisq_lab::percentile::rank_for_confidence;
/// assert_eq!(rank_for_confidence(0.999, 1000).unwrap(), 998);
/// assert_eq!(rank_for_confidence(0.5, 10).unwrap(), 4);
/// assert_eq!(rank_for_confidence(1.0, 10).unwrap(), 9);
/// ```
pub fn rank_for_confidence(confidence: f64, trials: usize) -> Result<usize> {
    if confidence.is_nan() || confidence <= 0.0 || confidence > 1.0 {
        return Err(ChiSquareError::InvalidParameter(format!(
            "confidence must lie in (0, 1], got {confidence}"
        )));
    }
    if trials == 0 {
        return Err(ChiSquareError::InvalidParameter(
            "trials must be >= 1, got 0".into(),
        ));
    }
    let count = (confidence * trials as f64 + RANK_EPSILON).floor() as usize;
    match count.min(trials).checked_sub(1) {
        Some(rank) => Ok(rank),
        None => Err(ChiSquareError::OutOfRange {
            rank: 0,
            len: trials,
        }),
    }
}

/// One extracted order statistic, labelled with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileReport {
    pub sample_size: usize,
    pub trials: usize,
    /// 0-indexed rank of the reported value.
    pub rank: usize,
    pub value: f64,
}

impl PercentileReport {
    /// Extracts the `rank`-th smallest reduced statistic of `collection`.
    ///
    /// # Errors
    /// `OutOfRange` if `rank >= collection.len()`.
    pub fn from_collection(collection: &TrialCollection, rank: usize) -> Result<Self> {
        Ok(Self {
            sample_size: collection.sample_size(),
            trials: collection.len(),
            rank,
            value: extract_percentile(collection.values(), rank)?,
        })
    }

    /// Fraction of the collection at or below the reported value,
    /// `(rank + 1) / trials`.
    pub fn coverage(&self) -> f64 {
        (self.rank + 1) as f64 / self.trials as f64
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn argsort_is_sorting_permutation(
            data in proptest::collection::vec(0.0_f64..10.0, 0..100),
        ) {
            let order = argsort(&data);
            let mut seen = order.clone();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..data.len()).collect::<Vec<_>>());
            prop_assert!(order.windows(2).all(|w| data[w[0]] <= data[w[1]]));
        }

        #[test]
        fn extract_matches_sorted_copy(
            data in proptest::collection::vec(0.0_f64..10.0, 1..100),
            rank in 0_usize..100,
        ) {
            let rank = rank % data.len();
            let mut sorted = data.clone();
            sorted.sort_by(f64::total_cmp);
            prop_assert_eq!(extract_percentile(&data, rank).unwrap(), sorted[rank]);
        }

        #[test]
        fn rank_is_in_bounds(confidence in 0.001_f64..=1.0, trials in 1_usize..5000) {
            if let Ok(rank) = rank_for_confidence(confidence, trials) {
                prop_assert!(rank < trials);
            }
        }
    }
}
