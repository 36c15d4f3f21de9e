//! Overlay Layer
//!
//! Turns a selection of detections into what the user sees: the annotated
//! image and the results table.

pub mod render;
pub mod table;

pub use render::{annotate, dim_outside_aoi, draw_detections, RenderStyle};
pub use table::{ResultRow, ResultsTable};
