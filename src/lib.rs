//! # chisq-lab
//!
//! Monte Carlo demonstration of the reduced chi-squared statistic.
//!
//! Synthetic datasets are drawn from `y = 1/x` plus Gaussian noise of known
//! σ, scored against the same model, and repeated many times. The
//! resulting reduced chi-squared values cluster around 1.0, and the
//! cluster narrows as the number of points grows.
//!
//! ## Modules
//!
//! - [`generator`] — synthetic datasets (Sample Generator)
//! - [`statistic`] — chi-squared and reduced chi-squared of one dataset
//! - [`experiment`] — repeated trials into a [`TrialCollection`]
//!   (Statistic Accumulator)
//! - [`percentile`] — empirical order statistics (Percentile Extractor)
//! - [`distributions`] — analytic chi-squared distribution for comparison
//! - [`histogram`] — density histograms for a plotting consumer
//! - [`report`] — per-sample-size reports
//! - [`stats`], [`special`], [`random`], [`model`] — supporting numerics
//!
//! ## Example
//!
//! ```
//! use chisq_lab::{build_trial_collection, extract_percentile};
//!
//! let n30 = build_trial_collection(30, 0.1, 1000, 7).unwrap();
//! let n300 = build_trial_collection(300, 0.1, 1000, 7).unwrap();
//! let p30 = extract_percentile(&n30, 998).unwrap();
//! let p300 = extract_percentile(&n300, 998).unwrap();
//! assert!(p300 < p30);
//! ```

pub mod cli;
pub mod distributions;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod histogram;
pub mod model;
pub mod percentile;
pub mod random;
pub mod report;
pub mod special;
pub mod statistic;
pub mod stats;

pub use error::{ChiSquareError, Result};
pub use experiment::{build_trial_collection, run_experiment, ExperimentConfig, TrialCollection};
pub use generator::{generate_trial, Spacing, Trial};
pub use percentile::{extract_percentile, rank_for_confidence, PercentileReport};
pub use statistic::compute_reduced_statistic;
