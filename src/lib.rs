//! PlateReader - license plate recognition prototype
//!
//! Filters word detections returned by an external OCR service to those
//! that are confident enough and lie inside a centered area of interest,
//! then renders them over the source image.

pub mod config;
pub mod overlay;
pub mod storage;
pub mod vision;

pub use config::AppConfig;
pub use overlay::{annotate, RenderStyle, ResultsTable};
pub use vision::{
    compute_aoi, filter_detections, select, AreaOfInterest, Detection, FilterConfig, Point,
    Polygon, ValidationError,
};
