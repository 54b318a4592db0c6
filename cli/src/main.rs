use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use facecrop::{BatchCropper, PipelineConfig, RustfaceDetector};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "facecrop", version)]
#[command(about = "Crop the most prominent face out of every photo in a directory")]
struct Args {
    /// Directory containing the input photos
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Directory the crops are written into (created if missing)
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Pixels of padding added on every side of the detected face box
    #[arg(
        short,
        long,
        default_value_t = facecrop::DEFAULT_PADDING,
        allow_negative_numbers = true
    )]
    padding: i32,

    /// Worker threads per pipeline stage
    #[arg(short, long, default_value_t = facecrop::DEFAULT_WORKERS)]
    workers: usize,

    /// Path to the SeetaFace detection model file
    #[arg(short, long)]
    model: PathBuf,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let files = facecrop::discover_inputs(&args.input_dir)
        .with_context(|| format!("failed to scan {}", args.input_dir.display()))?;
    if files.is_empty() {
        warn!("no jpg, jpeg, or png files in {}", args.input_dir.display());
        return Ok(());
    }

    let detector = RustfaceDetector::from_model_file(&args.model)
        .context("failed to load face detection model")?;
    let config = PipelineConfig::new(args.input_dir, args.output_dir)
        .with_padding(args.padding)
        .with_workers(args.workers);

    let report = BatchCropper::new(config, Box::new(detector))
        .run(&files)
        .context("batch run failed")?;

    info!(
        "done: {} written, {} without a face, {} failed",
        report.written.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}
