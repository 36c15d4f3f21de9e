//! OCR provider seam
//!
//! Text recognition is delegated to an external service. The application
//! only consumes its response, so providers are modeled as a trait; the
//! bundled implementation replays a response saved to disk.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::document::{FeatureType, TextAnnotation};
use super::geometry::Detection;

/// Source of document text annotations for an encoded image
pub trait TextDetector {
    fn detect(&self, image: &[u8]) -> Result<TextAnnotation>;
}

/// Replays a saved OCR response regardless of the image passed in
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    path: PathBuf,
}

impl RecordedResponse {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextDetector for RecordedResponse {
    fn detect(&self, image: &[u8]) -> Result<TextAnnotation> {
        info!(
            "Loading recorded OCR response from {:?} ({} image bytes)",
            self.path,
            image.len()
        );
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read OCR response: {:?}", self.path))?;
        TextAnnotation::from_json(&content)
            .with_context(|| format!("Failed to load OCR response: {:?}", self.path))
    }
}

/// Run the detector and flatten its result at the requested granularity
pub fn detect_features(
    detector: &dyn TextDetector,
    image: &[u8],
    feature: FeatureType,
) -> Result<Vec<Detection>> {
    let annotation = detector.detect(image)?;
    Ok(annotation.collect_features(feature))
}
