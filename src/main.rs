use anyhow::{Context, Result};
use chisq_lab::cli::{Cli, OutputFormat};
use chisq_lab::report;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, "starting comparison");

    let reports = report::compare(
        &cli.sizes,
        &cli.template(seed),
        cli.rank_selector(),
        cli.bins,
    )
    .context("simulation failed")?;

    match cli.format {
        OutputFormat::Text => {
            for r in &reports {
                println!("{r}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reports).context("serializing reports")?;
            println!("{json}");
        }
    }
    Ok(())
}
