//! Vision Layer
//!
//! Area-of-interest geometry and detection filtering over OCR results.
//! Recognition itself is delegated to an external provider through
//! [`ocr::TextDetector`]; everything else here is pure and stateless, so it
//! can be called from any thread without locking.

pub mod aoi;
pub mod document;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod ocr;

pub use aoi::{compute_aoi, compute_aoi_with_mode, AoiMode, AreaOfInterest};
pub use document::{FeatureType, TextAnnotation};
pub use error::{Axis, ValidationError};
pub use filter::{filter_detections, select, FilterConfig, Selection};
pub use geometry::{Detection, Point, Polygon};
pub use ocr::{detect_features, RecordedResponse, TextDetector};
