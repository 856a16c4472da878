//! Background removal CLI
//!
//! Argument parsing and the command entry point: two positional paths in,
//! one confirmation line out.

use crate::{
    tracing_config::{TracingConfig, TracingFormat},
    transform::ImglyRemover,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Background removal CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "removebg")]
pub struct Cli {
    /// Input image file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output image file (created or truncated)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    run(&cli).await
}

/// Run the single-shot removal pipeline and print the confirmation line
pub async fn run(cli: &Cli) -> Result<()> {
    info!(
        "Removing background: {} -> {}",
        cli.input.display(),
        cli.output.display()
    );

    let remover = ImglyRemover::new();
    crate::remove_background_file(&cli.input, &cli.output, &remover)
        .await
        .context("Failed to remove background")?;

    println!(
        "Background removed: {} -> {}",
        cli.input.display(),
        cli.output.display()
    );

    Ok(())
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")
}
