//! PlateReader - license plate recognition prototype
//!
//! Annotates an image with the text detections of a recorded OCR response,
//! keeping only confident detections inside the centered area of interest.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use uuid::Uuid;

use plate_reader::config::{self, AppConfig};
use plate_reader::overlay::{annotate, ResultsTable};
use plate_reader::storage;
use plate_reader::vision::{detect_features, select, AreaOfInterest, FeatureType, RecordedResponse};

/// PlateReader - filter and annotate OCR detections
#[derive(Parser, Debug)]
#[command(name = "plate-reader")]
#[command(about = "Annotate license plate images with OCR detections inside a centered area of interest")]
struct Args {
    /// Path to the input image (png, jpg, jpeg)
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Saved OCR response (JSON) for the image
    #[arg(short, long, value_name = "JSON")]
    response: PathBuf,

    /// Where to write the annotated image [default: <IMAGE stem>-annotated.png]
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Configuration file [default: platform config dir]/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Minimum confidence score (0.0 - 1.0)
    #[arg(long)]
    confidence: Option<f32>,

    /// AOI width as a ratio of the image width
    #[arg(long)]
    width_ratio: Option<f64>,

    /// AOI height as a ratio of the image height
    #[arg(long)]
    height_ratio: Option<f64>,

    /// Keep detections anywhere in the image
    #[arg(long)]
    no_area_filter: bool,

    /// Reject ratios outside [0.0, 1.0]
    #[arg(long)]
    strict_ratios: bool,

    /// Detection granularity: page, block, paragraph, word, symbol
    #[arg(long)]
    feature: Option<FeatureType>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    job_id: String,
    output: &'a Path,
    aoi: Option<AreaOfInterest>,
    results: &'a ResultsTable,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let job_id = Uuid::new_v4();
    info!("Job {} starting for {:?}", job_id, args.image);

    let mut config = load_or_create_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("Failed to read image: {:?}", args.image))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode image: {:?}", args.image))?;
    info!("Image loaded: {}x{}", image.width(), image.height());

    let detector = RecordedResponse::new(&args.response);
    let detections = detect_features(&detector, &bytes, config.detection.feature)?;
    info!("OCR returned {} {:?} detections", detections.len(), config.detection.feature);

    let selection = select(
        &detections,
        image.width(),
        image.height(),
        &config.detection.filter_config(),
        config.detection.aoi_mode(),
    )?;
    info!(
        "Kept {} of {} detections (AOI x {}..={}, y {}..={})",
        selection.detections.len(),
        detections.len(),
        selection.aoi.xmin,
        selection.aoi.xmax,
        selection.aoi.ymin,
        selection.aoi.ymax
    );

    let annotated = annotate(&image, &selection, &config.render.style());
    let output = args.output.clone().unwrap_or_else(|| default_output_path(&args.image));
    annotated
        .save(&output)
        .with_context(|| format!("Failed to save annotated image: {:?}", output))?;
    info!("Annotated image written to {:?}", output);

    let table = ResultsTable::from_detections(&selection.detections);
    if args.json {
        let report = Report {
            job_id: job_id.to_string(),
            output: &output,
            aoi: selection.area_filtered.then_some(selection.aoi),
            results: &table,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Detected Labels & Confidences:");
        print!("{table}");
    }

    info!("Job {} complete", job_id);
    Ok(())
}

/// Load configuration from an explicit path, the default location, or
/// fall back to defaults
fn load_or_create_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return config::load_config(path);
    }

    match storage::default_config_path() {
        Ok(path) if path.exists() => match config::load_config(&path) {
            Ok(config) => return Ok(config),
            Err(e) => warn!("Ignoring unreadable config {:?}: {:#}", path, e),
        },
        Ok(_) => {}
        Err(e) => warn!("No config directory: {}", e),
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let detection = &mut config.detection;
    if let Some(confidence) = args.confidence {
        detection.confidence_threshold = confidence;
    }
    if let Some(ratio) = args.width_ratio {
        detection.width_ratio = ratio;
    }
    if let Some(ratio) = args.height_ratio {
        detection.height_ratio = ratio;
    }
    if args.no_area_filter {
        detection.apply_area_filter = false;
    }
    if args.strict_ratios {
        detection.strict_ratios = true;
    }
    if let Some(feature) = args.feature {
        detection.feature = feature;
    }
}

fn default_output_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    image.with_file_name(format!("{stem}-annotated.png"))
}
