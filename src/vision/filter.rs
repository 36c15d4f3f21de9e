//! Detection filtering by confidence and area of interest

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aoi::{compute_aoi_with_mode, AoiMode, AreaOfInterest};
use super::error::ValidationError;
use super::geometry::Detection;

/// Per-invocation filter settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum confidence, inclusive (0.0 - 1.0)
    pub confidence_threshold: f32,
    /// Keep only detections fully inside the AOI
    pub apply_area_filter: bool,
    /// AOI width as a ratio of the image width
    pub width_ratio: f64,
    /// AOI height as a ratio of the image height
    pub height_ratio: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.01,
            apply_area_filter: true,
            width_ratio: 0.8,
            height_ratio: 0.5,
        }
    }
}

impl FilterConfig {
    /// Copy with both ratios clamped into [0.0, 1.0]
    pub fn clamped(self) -> Self {
        Self {
            width_ratio: clamp_ratio(self.width_ratio),
            height_ratio: clamp_ratio(self.height_ratio),
            ..self
        }
    }
}

fn clamp_ratio(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Select the detections that pass the confidence threshold and, when
/// `apply_area_filter` is set, lie entirely inside `aoi`.
///
/// Output keeps input order and borrows from `detections`. Any polygon that
/// is not a quadrilateral fails the whole call.
pub fn filter_detections<'a>(
    detections: &'a [Detection],
    aoi: &AreaOfInterest,
    confidence_threshold: f32,
    apply_area_filter: bool,
) -> Result<Vec<&'a Detection>, ValidationError> {
    let mut kept = Vec::new();

    for (index, detection) in detections.iter().enumerate() {
        detection.polygon.ensure_quad(index)?;

        if detection.confidence < confidence_threshold {
            continue;
        }
        if apply_area_filter && !aoi.contains_polygon(&detection.polygon) {
            continue;
        }
        kept.push(detection);
    }

    debug!(
        "Filtered detections: kept {} of {} (threshold={}, area_filter={})",
        kept.len(),
        detections.len(),
        confidence_threshold,
        apply_area_filter
    );

    Ok(kept)
}

/// AOI and filtered detections for one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<'a> {
    pub aoi: AreaOfInterest,
    pub area_filtered: bool,
    pub detections: Vec<&'a Detection>,
}

/// Compute the AOI for an image and filter `detections` against it
pub fn select<'a>(
    detections: &'a [Detection],
    image_width: u32,
    image_height: u32,
    config: &FilterConfig,
    mode: AoiMode,
) -> Result<Selection<'a>, ValidationError> {
    let aoi = compute_aoi_with_mode(
        saturating_i32(image_width),
        saturating_i32(image_height),
        config.width_ratio,
        config.height_ratio,
        mode,
    )?;
    let kept = filter_detections(
        detections,
        &aoi,
        config.confidence_threshold,
        config.apply_area_filter,
    )?;

    Ok(Selection {
        aoi,
        area_filtered: config.apply_area_filter,
        detections: kept,
    })
}

fn saturating_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
