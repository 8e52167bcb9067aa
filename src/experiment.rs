//! Statistic Accumulator: repeated trials collected into a
//! [`TrialCollection`] of reduced chi-squared values.
//!
//! Trial `i` draws its noise from [`trial_rng`]`(seed, i)`, so a
//! collection is a pure function of its [`ExperimentConfig`]. With the
//! `parallel` feature, trials run on the rayon pool and are collected by
//! index; the result is identical to the sequential run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ensure_nonzero, ensure_positive_sigma, Result};
use crate::generator::{generate_trial, Spacing};
use crate::random::trial_rng;
use crate::stats::{self, Summary};

/// Default lower bound of the x range.
pub const DEFAULT_X_START: f64 = 1.0;
/// Default (exclusive) upper bound of the x range.
pub const DEFAULT_X_END: f64 = 31.0;

/// Parameters of one Monte Carlo experiment at a fixed sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Points per trial, `N`.
    pub sample_size: usize,
    /// Standard deviation of the noise injected into the data.
    pub noise_sigma: f64,
    /// Uncertainty assumed when computing the statistic.
    pub assumed_sigma: f64,
    /// Number of independent trials, `M`.
    pub trials: usize,
    /// Positions are spread evenly over `[x_start, x_end)`.
    pub x_start: f64,
    pub x_end: f64,
    /// Base seed; trial `i` is seeded from `(seed, i)`.
    pub seed: u64,
}

impl ExperimentConfig {
    /// A correctly specified experiment: assumed σ equals the noise σ.
    pub fn new(sample_size: usize, sigma: f64, trials: usize) -> Self {
        Self {
            sample_size,
            noise_sigma: sigma,
            assumed_sigma: sigma,
            trials,
            x_start: DEFAULT_X_START,
            x_end: DEFAULT_X_END,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the σ used in the statistic, leaving the injected noise
    /// unchanged.
    pub fn with_assumed_sigma(mut self, sigma: f64) -> Self {
        self.assumed_sigma = sigma;
        self
    }

    pub fn with_x_range(mut self, start: f64, end: f64) -> Self {
        self.x_start = start;
        self.x_end = end;
        self
    }

    /// Checks every parameter and returns the position rule.
    ///
    /// # Errors
    /// `InvalidParameter` if `sample_size` or `trials` is zero, either σ is
    /// not finite and positive, or the x range is not a positive interval.
    pub fn validate(&self) -> Result<Spacing> {
        ensure_nonzero("sample size", self.sample_size)?;
        ensure_nonzero("trials", self.trials)?;
        ensure_positive_sigma("noise sigma", self.noise_sigma)?;
        ensure_positive_sigma("assumed sigma", self.assumed_sigma)?;
        Spacing::spanning(self.x_start, self.x_end, self.sample_size)
    }
}

/// Reduced chi-squared values of `M` independent trials at a fixed `N`,
/// in trial order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialCollection {
    sample_size: usize,
    values: Vec<f64>,
}

impl TrialCollection {
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// The reduced statistics as a plain slice.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Mean, spread, and range of the collection.
    pub fn summary(&self) -> Option<Summary> {
        stats::summarize(&self.values)
    }
}

/// Runs `config.trials` trials and collects their reduced statistics.
///
/// # Errors
/// Fails before any trial runs if the configuration is invalid; a failing
/// trial aborts the run and no partial collection is returned.
///
/// # Examples
/// ```
/// use chisq_lab::experiment::{run_experiment, ExperimentConfig};
/// let config = ExperimentConfig::new(30, 0.1, 50).with_seed(1);
/// let collection = run_experiment(&config).unwrap();
/// assert_eq!(collection.len(), 50);
/// assert!(collection.values().iter().all(|&v| v >= 0.0));
/// ```
pub fn run_experiment(config: &ExperimentConfig) -> Result<TrialCollection> {
    let spacing = config.validate()?;
    let values = collect_trials(config, &spacing)?;
    debug!(
        sample_size = config.sample_size,
        trials = config.trials,
        seed = config.seed,
        "built trial collection"
    );
    Ok(TrialCollection {
        sample_size: config.sample_size,
        values,
    })
}

/// Builds a collection of `trials` reduced statistics for sample size
/// `sample_size`, with σ both injected and assumed.
///
/// # Errors
/// `InvalidParameter` if `sample_size < 1`, `trials < 1`, or `sigma ≤ 0`.
pub fn build_trial_collection(
    sample_size: usize,
    sigma: f64,
    trials: usize,
    seed: u64,
) -> Result<Vec<f64>> {
    let config = ExperimentConfig::new(sample_size, sigma, trials).with_seed(seed);
    run_experiment(&config).map(TrialCollection::into_values)
}

fn run_trial(config: &ExperimentConfig, spacing: &Spacing, index: usize) -> Result<f64> {
    let mut rng = trial_rng(config.seed, index);
    let trial = generate_trial(config.sample_size, config.noise_sigma, spacing, &mut rng)?;
    trial.reduced_statistic(config.assumed_sigma)
}

#[cfg(not(feature = "parallel"))]
fn collect_trials(config: &ExperimentConfig, spacing: &Spacing) -> Result<Vec<f64>> {
    sequential_trials(config, spacing)
}

#[cfg(feature = "parallel")]
fn collect_trials(config: &ExperimentConfig, spacing: &Spacing) -> Result<Vec<f64>> {
    use rayon::prelude::*;

    (0..config.trials)
        .into_par_iter()
        .map(|i| run_trial(config, spacing, i))
        .collect()
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn sequential_trials(config: &ExperimentConfig, spacing: &Spacing) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(config.trials);
    for i in 0..config.trials {
        values.push(run_trial(config, spacing, i)?);
    }
    Ok(values)
}
