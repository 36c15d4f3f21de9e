//! Application Configuration
//!
//! Detection and rendering settings stored in TOML format.

use anyhow::{Context, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::overlay::RenderStyle;
use crate::vision::{AoiMode, FeatureType, FilterConfig};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detection settings
    pub detection: DetectionSettings,
    /// Render settings
    pub render: RenderSettings,
}

/// Detection filtering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Minimum confidence score for a detection to be kept (0.0 - 1.0)
    pub confidence_threshold: f32,
    /// Only keep detections inside the area of interest
    pub apply_area_filter: bool,
    /// AOI width as a ratio of the image width, measured from the center
    pub width_ratio: f64,
    /// AOI height as a ratio of the image height, measured from the center
    pub height_ratio: f64,
    /// Reject ratios outside [0.0, 1.0] instead of accepting them
    pub strict_ratios: bool,
    /// Granularity of the detections to filter
    pub feature: FeatureType,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.01,
            apply_area_filter: true,
            width_ratio: 0.8,
            height_ratio: 0.5,
            strict_ratios: false,
            feature: FeatureType::Word,
        }
    }
}

impl DetectionSettings {
    /// Filter parameters for one invocation. Without the area filter the
    /// AOI spans the whole image.
    pub fn filter_config(&self) -> FilterConfig {
        let (width_ratio, height_ratio) = if self.apply_area_filter {
            (self.width_ratio, self.height_ratio)
        } else {
            (1.0, 1.0)
        };

        FilterConfig {
            confidence_threshold: self.confidence_threshold,
            apply_area_filter: self.apply_area_filter,
            width_ratio,
            height_ratio,
        }
    }

    pub fn aoi_mode(&self) -> AoiMode {
        if self.strict_ratios {
            AoiMode::Strict
        } else {
            AoiMode::Permissive
        }
    }
}

/// Annotation rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Polygon color as [r, g, b]
    pub box_color: [u8; 3],
    /// Polygon line thickness in pixels
    pub thickness: u32,
    /// Strength of the dimming outside the AOI (0.0 - 1.0)
    pub mask_opacity: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            box_color: [0, 255, 0],
            thickness: 2,
            mask_opacity: 0.4,
        }
    }
}

impl RenderSettings {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            box_color: Rgb(self.box_color),
            thickness: self.thickness,
            mask_opacity: self.mask_opacity,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    let config: AppConfig =
        toml::from_str(&content).with_context(|| format!("Invalid config: {:?}", path))?;
    info!("Loaded configuration from {:?}", path);
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
