//! End-to-end scenarios: the statistical behavior the demonstration is
//! meant to show, at the reference parameters (σ = 0.1, 1000 trials).

use chisq_lab::distributions::ChiSquared;
use chisq_lab::experiment::{run_experiment, ExperimentConfig};
use chisq_lab::histogram::Histogram;
use chisq_lab::stats;
use chisq_lab::{build_trial_collection, extract_percentile, rank_for_confidence};

const SIGMA: f64 = 0.1;
const TRIALS: usize = 1000;
const SEED: u64 = 2016;

fn collection(n: usize) -> Vec<f64> {
    build_trial_collection(n, SIGMA, TRIALS, SEED).expect("valid parameters")
}

#[test]
fn collections_have_one_non_negative_value_per_trial() {
    for n in [1, 30, 300] {
        let values = collection(n);
        assert_eq!(values.len(), TRIALS);
        assert!(values.iter().all(|&v| v >= 0.0));
    }
}

#[test]
fn mean_reduced_chi2_is_near_one() {
    let mean = stats::mean(&collection(30)).unwrap();
    assert!((0.7..=1.3).contains(&mean), "mean = {mean}");
}

#[test]
fn spread_narrows_with_sample_size() {
    let sd30 = stats::std_dev(&collection(30)).unwrap();
    let sd300 = stats::std_dev(&collection(300)).unwrap();
    assert!(sd300 < sd30, "sd30 = {sd30}, sd300 = {sd300}");

    // Both close to the analytic √(2/N).
    let expected30 = ChiSquared::for_sample_size(30).unwrap().reduced_std_dev();
    let expected300 = ChiSquared::for_sample_size(300).unwrap().reduced_std_dev();
    assert!((sd30 / expected30 - 1.0).abs() < 0.15, "sd30 = {sd30}");
    assert!((sd300 / expected300 - 1.0).abs() < 0.15, "sd300 = {sd300}");
}

#[test]
fn rank_998_tail_value() {
    let c30 = collection(30);
    let c300 = collection(300);
    let p30 = extract_percentile(&c30, 998).unwrap();
    let p300 = extract_percentile(&c300, 998).unwrap();

    assert!(p30 > 1.5 && p30 < 3.0, "N=30 rank 998 = {p30}");
    assert!((p300 - 1.0).abs() < (p30 - 1.0).abs(), "p30 = {p30}, p300 = {p300}");
}

#[test]
fn empirical_tail_tracks_analytic_quantile() {
    let c30 = collection(30);
    let rank = rank_for_confidence(0.99, TRIALS).unwrap();
    let empirical = extract_percentile(&c30, rank).unwrap();
    let theory = ChiSquared::for_sample_size(30)
        .unwrap()
        .reduced_quantile(0.99)
        .unwrap();
    assert!(
        (empirical - theory).abs() < 0.2,
        "empirical {empirical} vs theory {theory}"
    );
}

#[test]
fn extraction_leaves_collection_in_trial_order() {
    let c30 = collection(30);
    let before = c30.clone();
    let first = extract_percentile(&c30, 998).unwrap();
    let second = extract_percentile(&c30, 998).unwrap();
    assert_eq!(first, second);
    assert_eq!(c30, before);
    assert_eq!(
        extract_percentile(&c30, 0).unwrap(),
        stats::min(&c30).unwrap()
    );
    assert_eq!(
        extract_percentile(&c30, TRIALS - 1).unwrap(),
        stats::max(&c30).unwrap()
    );
}

#[test]
fn overestimated_sigma_quarters_the_mean() {
    let correct = ExperimentConfig::new(30, SIGMA, TRIALS).with_seed(SEED);
    let inflated = correct.clone().with_assumed_sigma(2.0 * SIGMA);

    let mean_correct = run_experiment(&correct).unwrap().summary().unwrap().mean;
    let mean_inflated = run_experiment(&inflated).unwrap().summary().unwrap().mean;

    assert!(mean_inflated < 1.0);
    assert!(
        (mean_inflated / mean_correct - 0.25).abs() < 1e-9,
        "ratio = {}",
        mean_inflated / mean_correct
    );
}

#[test]
fn histograms_are_comparable_densities() {
    let range = Some((0.0, 2.5));
    let h30 = Histogram::new(&collection(30), 50, range).unwrap();
    let h300 = Histogram::new(&collection(300), 50, range).unwrap();

    let peak30 = h30.densities().iter().cloned().fold(0.0, f64::max);
    let peak300 = h300.densities().iter().cloned().fold(0.0, f64::max);
    // The narrower N=300 distribution piles up higher around 1.
    assert!(peak300 > peak30);
    assert!((h300.mode() - 1.0).abs() < 0.15, "mode = {}", h300.mode());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential_reference() {
    use chisq_lab::generator::{generate_trial, Spacing};
    use chisq_lab::random::trial_rng;

    let config = ExperimentConfig::new(30, SIGMA, 256).with_seed(SEED);
    let parallel = run_experiment(&config).unwrap();

    let spacing = Spacing::spanning(1.0, 31.0, 30).unwrap();
    let sequential: Vec<f64> = (0..256)
        .map(|i| {
            generate_trial(30, SIGMA, &spacing, &mut trial_rng(SEED, i))
                .unwrap()
                .reduced_statistic(SIGMA)
                .unwrap()
        })
        .collect();
    assert_eq!(parallel.values(), &sequential[..]);
}
