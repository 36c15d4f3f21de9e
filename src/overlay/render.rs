//! Annotation rendering
//!
//! Draws detection polygons onto the image and dims everything outside the
//! area of interest.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::vision::{AreaOfInterest, Detection, Point, Selection};

/// Drawing parameters for annotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Polygon outline color
    pub box_color: Rgb<u8>,
    /// Outline width in pixels
    pub thickness: u32,
    /// Weight of the white mask blended over the area outside the AOI
    pub mask_opacity: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            box_color: Rgb([0, 255, 0]),
            thickness: 2,
            mask_opacity: 0.4,
        }
    }
}

/// Draw each detection as a closed polyline
pub fn draw_detections(img: &mut RgbImage, detections: &[&Detection], style: &RenderStyle) {
    for detection in detections {
        let vertices = detection.polygon.vertices();
        for (i, p1) in vertices.iter().enumerate() {
            let p2 = &vertices[(i + 1) % vertices.len()];

            for t in 0..style.thickness.max(1) {
                let offset = t as f32;
                let (x1, y1) = (p1.x as f32, p1.y as f32);
                let (x2, y2) = (p2.x as f32, p2.y as f32);
                draw_line_segment_mut(img, (x1 + offset, y1), (x2 + offset, y2), style.box_color);
                draw_line_segment_mut(img, (x1, y1 + offset), (x2, y2 + offset), style.box_color);
            }
        }
    }
}

/// Lighten every pixel outside the AOI by blending in white at `opacity`.
///
/// Pixels on the AOI boundary count as inside and are left untouched.
pub fn dim_outside_aoi(img: &mut RgbImage, aoi: &AreaOfInterest, opacity: f32) {
    let lift = 255.0 * opacity;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let point = Point::new(to_i32(x), to_i32(y));
        if aoi.contains(point) {
            continue;
        }
        for channel in pixel.0.iter_mut() {
            *channel = (f32::from(*channel) + lift).round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Render the selection onto a copy of `image`: polygons first, then the
/// AOI mask when the area filter was applied
pub fn annotate(image: &DynamicImage, selection: &Selection<'_>, style: &RenderStyle) -> RgbImage {
    let mut output = image.to_rgb8();

    draw_detections(&mut output, &selection.detections, style);
    if selection.area_filtered {
        dim_outside_aoi(&mut output, &selection.aoi, style.mask_opacity);
    }

    output
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::Polygon;

    fn gray(width: u32, height: u32, level: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([level, level, level]))
    }

    #[test]
    fn test_dim_outside_aoi() {
        let mut img = gray(10, 10, 100);
        let aoi = AreaOfInterest {
            xmin: 2,
            xmax: 7,
            ymin: 3,
            ymax: 6,
        };

        dim_outside_aoi(&mut img, &aoi, 0.4);

        // inside and on the boundary: unchanged
        assert_eq!(img.get_pixel(2, 3), &Rgb([100, 100, 100]));
        assert_eq!(img.get_pixel(7, 6), &Rgb([100, 100, 100]));
        assert_eq!(img.get_pixel(5, 5), &Rgb([100, 100, 100]));
        // outside: 100 + 255 * 0.4
        assert_eq!(img.get_pixel(1, 3), &Rgb([202, 202, 202]));
        assert_eq!(img.get_pixel(7, 7), &Rgb([202, 202, 202]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([202, 202, 202]));
    }

    #[test]
    fn test_dim_saturates() {
        let mut img = gray(2, 2, 250);
        let aoi = AreaOfInterest {
            xmin: 100,
            xmax: 200,
            ymin: 100,
            ymax: 200,
        };
        dim_outside_aoi(&mut img, &aoi, 0.4);
        assert!(img.pixels().all(|p| *p == Rgb([255, 255, 255])));
    }

    #[test]
    fn test_dim_with_off_image_aoi_covering_everything() {
        let mut img = gray(4, 4, 10);
        let aoi = AreaOfInterest {
            xmin: -50,
            xmax: 150,
            ymin: -50,
            ymax: 150,
        };
        dim_outside_aoi(&mut img, &aoi, 0.4);
        assert!(img.pixels().all(|p| *p == Rgb([10, 10, 10])));
    }

    #[test]
    fn test_draw_detections_outlines_polygon() {
        let mut img = gray(20, 20, 0);
        let detection = Detection::new(Polygon::rectangle(5, 5, 15, 12), "X", 1.0);
        let style = RenderStyle::default();

        draw_detections(&mut img, &[&detection], &style);

        // corners and edges drawn in the box color
        assert_eq!(img.get_pixel(5, 5), &style.box_color);
        assert_eq!(img.get_pixel(10, 5), &style.box_color);
        assert_eq!(img.get_pixel(15, 8), &style.box_color);
        assert_eq!(img.get_pixel(10, 12), &style.box_color);
        // second pixel of thickness
        assert_eq!(img.get_pixel(10, 6), &style.box_color);
        // interior and outside untouched
        assert_eq!(img.get_pixel(10, 9), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(1, 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_skips_mask_without_area_filter() {
        let image = DynamicImage::ImageRgb8(gray(8, 8, 50));
        let detection = Detection::new(Polygon::rectangle(2, 2, 5, 5), "X", 1.0);
        let aoi = AreaOfInterest {
            xmin: 3,
            xmax: 4,
            ymin: 3,
            ymax: 4,
        };
        let style = RenderStyle::default();

        let unmasked = annotate(
            &image,
            &Selection {
                aoi,
                area_filtered: false,
                detections: vec![&detection],
            },
            &style,
        );
        assert_eq!(unmasked.get_pixel(0, 0), &Rgb([50, 50, 50]));
        assert_eq!(unmasked.get_pixel(2, 2), &style.box_color);

        let masked = annotate(
            &image,
            &Selection {
                aoi,
                area_filtered: true,
                detections: vec![&detection],
            },
            &style,
        );
        assert_eq!(masked.get_pixel(0, 0), &Rgb([152, 152, 152]));
        // outline outside the AOI is lightened too: 0 + 102 on red/blue
        assert_eq!(masked.get_pixel(2, 2), &Rgb([102, 255, 102]));
    }
}
