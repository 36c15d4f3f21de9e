//! Geometry value types shared by the filter and the renderer

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Number of vertices every detection polygon must carry
pub const QUAD_VERTICES: usize = 4;

/// A point in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Bounding polygon of a detection, vertices in the winding order the
/// detector produced them.
///
/// The vertex count is not checked on construction since polygons arrive
/// from an external provider; [`Polygon::ensure_quad`] enforces it at the
/// filter boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle spanning `(x0, y0)` to `(x1, y1)`, clockwise
    /// from the top-left corner
    pub fn rectangle(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fail unless the polygon is a quadrilateral. `index` is the position
    /// of the owning detection, reported back in the error.
    pub fn ensure_quad(&self, index: usize) -> Result<(), ValidationError> {
        if self.vertices.len() == QUAD_VERTICES {
            Ok(())
        } else {
            Err(ValidationError::PolygonVertexCount {
                index,
                found: self.vertices.len(),
            })
        }
    }
}

impl<P: Into<Point>> FromIterator<P> for Polygon {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// One recognized unit of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Bounding polygon
    pub polygon: Polygon,
    /// Recognized text (may be empty)
    pub label: String,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
}

impl Detection {
    pub fn new(polygon: Polygon, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            polygon,
            label: label.into(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_winding() {
        let poly = Polygon::rectangle(1, 2, 3, 4);
        assert_eq!(
            poly.vertices(),
            &[
                Point::new(1, 2),
                Point::new(3, 2),
                Point::new(3, 4),
                Point::new(1, 4)
            ]
        );
    }

    #[test]
    fn test_ensure_quad() {
        assert!(Polygon::rectangle(0, 0, 1, 1).ensure_quad(0).is_ok());

        let triangle: Polygon = [(0, 0), (5, 0), (0, 5)].into_iter().collect();
        assert_eq!(
            triangle.ensure_quad(7),
            Err(ValidationError::PolygonVertexCount { index: 7, found: 3 })
        );

        let empty = Polygon::default();
        assert!(empty.ensure_quad(0).is_err());
    }

    #[test]
    fn test_point_missing_coordinates_default_to_zero() {
        let point: Point = serde_json::from_str(r#"{"y": 12}"#).unwrap();
        assert_eq!(point, Point::new(0, 12));

        let origin: Point = serde_json::from_str("{}").unwrap();
        assert_eq!(origin, Point::default());
    }

    #[test]
    fn test_polygon_serializes_as_vertex_list() {
        let poly = Polygon::rectangle(0, 0, 2, 2);
        let json = serde_json::to_string(&poly).unwrap();
        assert!(json.starts_with('['));

        let parsed: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, poly);
    }
}
