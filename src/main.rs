//! zenbmpfx - apply filters to a 24-bit BMP

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zenbmpfx::{Unstoppable, parse_filter_args};

#[derive(Parser)]
#[command(name = "zenbmpfx")]
#[command(author, version, about = "Apply filters to a 24-bit BMP image")]
#[command(long_about = "
Reads a 24-bit uncompressed BMP, applies the filters in the order given,
and writes the result as a 24-bit BMP.

Filters:
  -crop W H            keep the top-left W x H region
  -gs                  grayscale
  -neg                 negative
  -sharp               sharpen
  -edge T              edge detection, threshold T in [0, 1]
  -blur S              Gaussian blur with sigma S
  -circular_blur R     disc blur with radius R
  -image_split B       pixelate into B x B blocks

Examples:
  zenbmpfx in.bmp out.bmp -crop 800 600 -gs
  zenbmpfx in.bmp out.bmp -blur 1.5 -edge 0.2
")]
struct Cli {
    /// Input BMP file
    input: PathBuf,

    /// Output BMP file
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Filters, applied left to right
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FILTER")]
    filters: Vec<String>,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // -v may also trail the filter list
    let before = cli.filters.len();
    cli.filters.retain(|a| a != "-v" && a != "--verbose");
    let verbose = cli.verbose || cli.filters.len() != before;

    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    #[cfg(feature = "parallel")]
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }
    #[cfg(not(feature = "parallel"))]
    if cli.threads > 1 {
        tracing::warn!(threads = cli.threads, "built without the parallel feature; running single-threaded");
    }

    let parsed = parse_filter_args(&cli.filters).context("Invalid filter arguments")?;
    for name in &parsed.unknown {
        tracing::warn!("ignoring unknown filter {name:?}");
    }

    let pipeline = parsed.into_pipeline();
    tracing::info!(filters = pipeline.filters().len(), "running pipeline");
    pipeline
        .run_file(&cli.input, &cli.output, Unstoppable)
        .with_context(|| format!("Failed to process {}", cli.input.display()))?;
    Ok(())
}
