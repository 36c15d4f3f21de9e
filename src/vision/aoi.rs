//! Area of interest calculation
//!
//! The AOI is a rectangle centered on the image whose size is a ratio of the
//! image size on each axis. All halving uses floor division so results match
//! integer arithmetic exactly; ratios are applied with truncation toward zero.

use serde::{Deserialize, Serialize};

use super::error::{Axis, ValidationError};
use super::geometry::{Point, Polygon};

/// How out-of-range ratios are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AoiMode {
    /// Accept any ratio; values outside [0, 1] yield an oversized or
    /// inverted rectangle
    #[default]
    Permissive,
    /// Reject ratios outside [0, 1] (and NaN)
    Strict,
}

/// Rectangle of interest in pixel coordinates, bounds inclusive on all sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaOfInterest {
    pub xmin: i32,
    pub xmax: i32,
    pub ymin: i32,
    pub ymax: i32,
}

impl AreaOfInterest {
    pub fn width(&self) -> i64 {
        i64::from(self.xmax) - i64::from(self.xmin)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.ymax) - i64::from(self.ymin)
    }

    /// Whether the point lies inside, boundary included
    pub fn contains(&self, point: Point) -> bool {
        self.xmin <= point.x && point.x <= self.xmax && self.ymin <= point.y && point.y <= self.ymax
    }

    /// All-or-nothing containment: every vertex must be inside
    pub fn contains_polygon(&self, polygon: &Polygon) -> bool {
        polygon.vertices().iter().all(|&v| self.contains(v))
    }
}

/// Compute the centered AOI, accepting any ratio
pub fn compute_aoi(
    image_width: i32,
    image_height: i32,
    width_ratio: f64,
    height_ratio: f64,
) -> Result<AreaOfInterest, ValidationError> {
    compute_aoi_with_mode(
        image_width,
        image_height,
        width_ratio,
        height_ratio,
        AoiMode::Permissive,
    )
}

/// Compute the centered AOI with an explicit ratio policy
pub fn compute_aoi_with_mode(
    image_width: i32,
    image_height: i32,
    width_ratio: f64,
    height_ratio: f64,
    mode: AoiMode,
) -> Result<AreaOfInterest, ValidationError> {
    if image_width <= 0 || image_height <= 0 {
        return Err(ValidationError::ImageDimensions {
            width: image_width,
            height: image_height,
        });
    }

    if mode == AoiMode::Strict {
        check_ratio(Axis::Width, width_ratio)?;
        check_ratio(Axis::Height, height_ratio)?;
    }

    let (xmin, xmax) = centered_span(image_width, width_ratio);
    let (ymin, ymax) = centered_span(image_height, height_ratio);

    Ok(AreaOfInterest {
        xmin,
        xmax,
        ymin,
        ymax,
    })
}

fn check_ratio(axis: Axis, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::RatioOutOfRange { axis, value })
    }
}

/// Returns (min, max) of a span of `extent * ratio` centered on `extent / 2`
fn centered_span(extent: i32, ratio: f64) -> (i32, i32) {
    let center = extent.div_euclid(2);
    // `as` truncates toward zero and saturates, NaN maps to 0
    let scaled = (f64::from(extent) * ratio) as i32;
    let half = scaled.div_euclid(2);
    (center.saturating_sub(half), center.saturating_add(half))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aoi(xmin: i32, xmax: i32, ymin: i32, ymax: i32) -> AreaOfInterest {
        AreaOfInterest {
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    #[test]
    fn test_default_ratios_on_1000x800() {
        let result = compute_aoi(1000, 800, 0.8, 0.5).unwrap();
        assert_eq!(result, aoi(100, 900, 200, 600));
    }

    #[test]
    fn test_zero_ratios_collapse_to_center() {
        let result = compute_aoi(1000, 800, 0.0, 0.0).unwrap();
        assert_eq!(result, aoi(500, 500, 400, 400));
        assert_eq!(result.width(), 0);
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_odd_dimensions_floor() {
        // center 500, scaled floor(1001 * 0.5) = 500, half 250
        let result = compute_aoi(1001, 7, 0.5, 1.0).unwrap();
        assert_eq!(result, aoi(250, 750, 0, 6));

        // center 3, scaled 7, half 3
        assert_eq!(compute_aoi(7, 7, 1.0, 1.0).unwrap(), aoi(0, 6, 0, 6));
    }

    #[test]
    fn test_scaled_size_truncates() {
        // 999 * 0.3 = 299.7 -> 299, half 149
        let result = compute_aoi(999, 10, 0.3, 0.0).unwrap();
        assert_eq!(result.xmin, 499 - 149);
        assert_eq!(result.xmax, 499 + 149);
    }

    #[test]
    fn test_full_ratio_covers_image() {
        let result = compute_aoi(640, 480, 1.0, 1.0).unwrap();
        assert_eq!(result, aoi(0, 640, 0, 480));
    }

    #[test]
    fn test_non_positive_dimensions_rejected() {
        assert_eq!(
            compute_aoi(0, 800, 0.5, 0.5),
            Err(ValidationError::ImageDimensions { width: 0, height: 800 })
        );
        assert!(compute_aoi(100, -1, 0.5, 0.5).is_err());
    }

    #[test]
    fn test_out_of_range_ratios_permissive() {
        let oversized = compute_aoi(100, 100, 2.0, 1.0).unwrap();
        assert_eq!(oversized, aoi(-50, 150, 0, 100));

        // negative ratio inverts the rectangle; halving floors toward -inf
        let inverted = compute_aoi(100, 100, -0.25, 1.0).unwrap();
        assert_eq!(inverted, aoi(63, 37, 0, 100));
        assert!(inverted.width() < 0);
    }

    #[test]
    fn test_out_of_range_ratios_strict() {
        let err = compute_aoi_with_mode(100, 100, 1.5, 0.5, AoiMode::Strict).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RatioOutOfRange {
                axis: Axis::Width,
                value: 1.5
            }
        );

        let err = compute_aoi_with_mode(100, 100, 0.5, -0.1, AoiMode::Strict).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::RatioOutOfRange {
                axis: Axis::Height,
                ..
            }
        ));

        assert!(compute_aoi_with_mode(100, 100, f64::NAN, 0.5, AoiMode::Strict).is_err());
        assert!(compute_aoi_with_mode(100, 100, 0.0, 1.0, AoiMode::Strict).is_ok());
    }

    #[test]
    fn test_deterministic() {
        for &(w, h, rw, rh) in &[(1000, 800, 0.8, 0.5), (3, 5, 0.33, 0.77), (1, 1, 1.0, 0.0)] {
            assert_eq!(compute_aoi(w, h, rw, rh), compute_aoi(w, h, rw, rh));
        }
    }

    #[test]
    fn test_monotonic_in_ratio() {
        for &(w, h) in &[(1000, 800), (1001, 799), (17, 3)] {
            let mut prev_w = i64::MIN;
            let mut prev_h = i64::MIN;
            for step in 0..=100 {
                let r = f64::from(step) / 100.0;
                let area = compute_aoi(w, h, r, r).unwrap();
                assert!(area.width() >= prev_w, "width shrank at ratio {r} for {w}x{h}");
                assert!(area.height() >= prev_h, "height shrank at ratio {r} for {w}x{h}");
                prev_w = area.width();
                prev_h = area.height();
            }
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let area = aoi(100, 900, 200, 600);
        assert!(area.contains(Point::new(100, 200)));
        assert!(area.contains(Point::new(900, 600)));
        assert!(!area.contains(Point::new(99, 200)));
        assert!(!area.contains(Point::new(100, 601)));
    }

    #[test]
    fn test_contains_polygon_all_or_nothing() {
        let area = aoi(100, 900, 200, 600);
        let inside: Polygon = [(150, 250), (850, 250), (850, 550), (150, 550)]
            .into_iter()
            .collect();
        assert!(area.contains_polygon(&inside));

        let straddling: Polygon = [(150, 250), (950, 250), (850, 550), (150, 550)]
            .into_iter()
            .collect();
        assert!(!area.contains_polygon(&straddling));
    }
}
