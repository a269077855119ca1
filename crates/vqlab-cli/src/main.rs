//! vqlab command-line interface
//!
//! ```text
//! vqlab [--config config.yaml] [-v...]
//! ```
//!
//! Loads the configuration, installs logging and runs the experiment. A bad
//! configuration exits non-zero; a failed experiment is logged with its cause
//! chain.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use console::style;
use vqlab_cli::{AppContext, Config, RunReport, init_logging, run_experiment};

/// vqlab - variational quantum eigensolver experiments
#[derive(Parser)]
#[command(name = "vqlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Increase verbosity over the configured level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let ctx = AppContext::new(config, cli.verbose);
    init_logging(&ctx.logging())?;

    match run_experiment(&ctx).await {
        Ok(reports) => print_summary(&reports),
        Err(e) => tracing::error!("Experiment failed: {e:#}"),
    }

    Ok(())
}

fn print_summary(reports: &[RunReport]) {
    println!("\n{} Experiment complete", style("✓").green().bold());
    for (index, report) in reports.iter().enumerate() {
        let stats = &report.metrics.statistics;
        println!(
            "  {} final cost {}  mean {:.6}  std {:.6}  → {}",
            style(format!("run {index}")).bold(),
            style(format!("{:.6}", report.metrics.final_cost)).cyan(),
            stats.mean,
            stats.std_dev,
            style(report.artifacts.html_report.display()).dim()
        );
    }
}
