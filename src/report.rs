//! Reports comparing trial collections across sample sizes.
//!
//! A report holds everything a presentation layer needs for one sample
//! size: the configuration, summary statistics, the extracted order
//! statistic, the matching analytic quantile, and a density histogram
//! with its peak.
//! Rendering is left to the consumer; [`fmt::Display`] gives a plain-text
//! line per report.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distributions::ChiSquared;
use crate::error::{ChiSquareError, Result};
use crate::experiment::{run_experiment, ExperimentConfig, TrialCollection};
use crate::histogram::{default_bin_count, Histogram};
use crate::percentile::{rank_for_confidence, PercentileReport};
use crate::stats::Summary;

/// How the reported order statistic is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RankSelector {
    /// A fixed 0-indexed rank.
    Fixed(usize),
    /// `floor(confidence · trials) − 1`.
    Confidence(f64),
}

impl RankSelector {
    pub fn resolve(&self, trials: usize) -> Result<usize> {
        match *self {
            RankSelector::Fixed(rank) => Ok(rank),
            RankSelector::Confidence(c) => rank_for_confidence(c, trials),
        }
    }
}

/// Everything reported about one trial collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub config: ExperimentConfig,
    pub summary: Summary,
    pub percentile: PercentileReport,
    /// Reduced chi-squared quantile at the percentile's coverage, when the
    /// coverage is strictly below 1.
    pub theoretical_quantile: Option<f64>,
    pub histogram: Histogram,
    /// Center of the most populated histogram bin.
    pub peak: f64,
}

impl CollectionReport {
    /// Builds the report for a collection produced by `config`.
    ///
    /// # Errors
    /// `OutOfRange` if the selected rank does not fit the collection;
    /// `InvalidParameter` if the collection is empty or `bins == 0`.
    pub fn build(
        config: &ExperimentConfig,
        collection: &TrialCollection,
        selector: RankSelector,
        bins: Option<usize>,
    ) -> Result<Self> {
        let summary = collection.summary().ok_or_else(|| {
            ChiSquareError::InvalidParameter("cannot report an empty collection".into())
        })?;
        let rank = selector.resolve(collection.len())?;
        let percentile = PercentileReport::from_collection(collection, rank)?;
        let theoretical_quantile = ChiSquared::for_sample_size(collection.sample_size())?
            .reduced_quantile(percentile.coverage());
        let bins = bins.unwrap_or_else(|| default_bin_count(collection.len()));
        let histogram = Histogram::new(collection.values(), bins, None)?;
        let peak = histogram.mode();

        Ok(Self {
            config: config.clone(),
            summary,
            percentile,
            theoretical_quantile,
            histogram,
            peak,
        })
    }
}

impl fmt::Display for CollectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.percentile;
        writeln!(
            f,
            "Reduced chi^2 for {:.1}% confidence for N={}: {:.6}",
            100.0 * p.coverage(),
            p.sample_size,
            p.value
        )?;
        write!(
            f,
            "  rank {} of {}, mean {:.4}, std dev {:.4}, range [{:.4}, {:.4}], peak {:.4}",
            p.rank,
            p.trials,
            self.summary.mean,
            self.summary.std_dev,
            self.summary.min,
            self.summary.max,
            self.peak
        )?;
        if let Some(q) = self.theoretical_quantile {
            write!(f, ", chi-squared theory {q:.4}")?;
        }
        Ok(())
    }
}

/// Runs one experiment per sample size, all sharing `template`'s other
/// parameters, and reports each.
///
/// Every collection is built and reported before anything is returned, so
/// a failure at any size yields no reports at all.
///
/// # Errors
/// `InvalidParameter` if `sample_sizes` is empty, plus any error from
/// [`run_experiment`] or [`CollectionReport::build`].
pub fn compare(
    sample_sizes: &[usize],
    template: &ExperimentConfig,
    selector: RankSelector,
    bins: Option<usize>,
) -> Result<Vec<CollectionReport>> {
    if sample_sizes.is_empty() {
        return Err(ChiSquareError::InvalidParameter(
            "at least one sample size is required".into(),
        ));
    }
    sample_sizes
        .iter()
        .map(|&n| {
            let config = ExperimentConfig {
                sample_size: n,
                ..template.clone()
            };
            let collection = run_experiment(&config)?;
            let report = CollectionReport::build(&config, &collection, selector, bins)?;
            debug!(
                sample_size = n,
                rank = report.percentile.rank,
                value = report.percentile.value,
                "reported collection"
            );
            Ok(report)
        })
        .collect()
}
