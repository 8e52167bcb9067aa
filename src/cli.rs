//! CLI argument parsing for chisq-lab

use clap::{Parser, ValueEnum};

use crate::experiment::{ExperimentConfig, DEFAULT_X_END, DEFAULT_X_START};
use crate::report::RankSelector;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON, including histograms
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "chisq-lab")]
#[command(version)]
#[command(about = "Monte Carlo distributions of reduced chi-squared for y = 1/x", long_about = None)]
pub struct Cli {
    /// Sample sizes to compare
    #[arg(long, value_delimiter = ',', default_values_t = [30_usize, 300])]
    pub sizes: Vec<usize>,

    /// Standard deviation of the injected noise
    #[arg(long, default_value_t = 0.1)]
    pub sigma: f64,

    /// Uncertainty assumed in the statistic (defaults to --sigma)
    #[arg(long)]
    pub assumed_sigma: Option<f64>,

    /// Trials per sample size
    #[arg(short = 'm', long, default_value_t = 1000)]
    pub trials: usize,

    /// 0-indexed rank of the reported order statistic
    #[arg(long, default_value_t = 998, conflicts_with = "confidence")]
    pub rank: usize,

    /// Derive the rank as floor(confidence * trials) - 1 instead of --rank
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Base seed (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lower bound of the x range
    #[arg(long, default_value_t = DEFAULT_X_START)]
    pub x_start: f64,

    /// Upper (exclusive) bound of the x range
    #[arg(long, default_value_t = DEFAULT_X_END)]
    pub x_end: f64,

    /// Histogram bins (defaults to 5% of --trials)
    #[arg(long)]
    pub bins: Option<usize>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Experiment template shared by every sample size. The sample size
    /// field is overwritten per run.
    pub fn template(&self, seed: u64) -> ExperimentConfig {
        let sample_size = self.sizes.first().copied().unwrap_or_default();
        ExperimentConfig::new(sample_size, self.sigma, self.trials)
            .with_assumed_sigma(self.assumed_sigma.unwrap_or(self.sigma))
            .with_x_range(self.x_start, self.x_end)
            .with_seed(seed)
    }

    pub fn rank_selector(&self) -> RankSelector {
        match self.confidence {
            Some(c) => RankSelector::Confidence(c),
            None => RankSelector::Fixed(self.rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let cli = Cli::parse_from(["chisq-lab"]);
        assert_eq!(cli.sizes, vec![30, 300]);
        assert_eq!(cli.sigma, 0.1);
        assert_eq!(cli.trials, 1000);
        assert_eq!(cli.rank_selector(), RankSelector::Fixed(998));
        assert_eq!(cli.format, OutputFormat::Text);

        let t = cli.template(5);
        assert_eq!(t.assumed_sigma, 0.1);
        assert_eq!((t.x_start, t.x_end), (1.0, 31.0));
        assert_eq!(t.seed, 5);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "chisq-lab",
            "--sizes",
            "10,20,40",
            "--assumed-sigma",
            "0.2",
            "--confidence",
            "0.95",
            "--format",
            "json",
        ]);
        assert_eq!(cli.sizes, vec![10, 20, 40]);
        assert_eq!(cli.template(0).assumed_sigma, 0.2);
        assert_eq!(cli.rank_selector(), RankSelector::Confidence(0.95));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_rank_conflicts_with_confidence() {
        let result = Cli::try_parse_from(["chisq-lab", "--rank", "5", "--confidence", "0.9"]);
        assert!(result.is_err());
    }
}
