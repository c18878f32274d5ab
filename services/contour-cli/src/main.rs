//! Contour tracer
//!
//! Reads a PPM image, traces the boundary between dark and light regions with
//! marching squares on a fixed pool of worker threads, and writes the result
//! as a PPM image.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use marching::{ContourConfig, ContourMap};
use raster::{ppm, PpmFormat};

/// Exit status for pipeline and I/O failures. Usage errors exit with 1.
const EXIT_FAILURE: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "contour")]
#[command(about = "Trace marching-squares contours over a PPM image")]
struct Args {
    /// Input image (P3 or P6)
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Number of worker threads
    workers: NonZeroUsize,

    /// Directory holding the stencils 0.ppm .. 15.ppm
    #[arg(long, default_value = "contours", env = "CONTOUR_ASSETS")]
    contours: PathBuf,

    /// JSON configuration file; CONTOUR_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the output as ASCII (P3) instead of binary (P6)
    #[arg(long)]
    ascii: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version go to stdout and are not failures
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(args) {
        error!("{:#}", err);
        std::process::exit(EXIT_FAILURE);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    let source = ppm::read_file(&args.input)
        .with_context(|| format!("Failed to read input image {}", args.input.display()))?;
    let contour_map = ContourMap::load(&args.contours)
        .with_context(|| format!("Failed to load contours from {}", args.contours.display()))?;

    let output = marching::run(source, args.workers.get(), &contour_map, &config)
        .context("Contour pipeline failed")?;

    let histogram = output.grid.configuration_histogram();
    info!(
        squares = output.grid.square_count(),
        rescaled = output.rescaled,
        ?histogram,
        "configuration summary"
    );

    let format = if args.ascii {
        PpmFormat::Ascii
    } else {
        PpmFormat::Binary
    };
    ppm::write_file(&output.image, &args.output, format)
        .with_context(|| format!("Failed to write output image {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        width = output.image.width(),
        height = output.image.height(),
        "wrote contour image"
    );
    Ok(())
}

/// Defaults, then the optional JSON file, then `CONTOUR_*` variables.
fn load_config(path: Option<&PathBuf>) -> Result<ContourConfig> {
    let config = match path {
        Some(path) => ContourConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ContourConfig::default(),
    }
    .with_env_overrides();

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
