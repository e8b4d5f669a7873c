//! Software rasterizer for a [`Drawing`].
//!
//! egui's painter only blends source-over, so the canvas is composited here
//! into an [`RgbaImage`] and uploaded as a texture. Pen strokes are blended
//! source-over; eraser strokes use destination-out and punch through whatever
//! was drawn before them. The same surface is what gets exported on submit.

use egui::{Pos2, Rect};
use image::{Rgba, RgbaImage};

use crate::drawing::Drawing;
use crate::stroke::Stroke;

/// How a stroke combines with the pixels already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Paint over the destination
    SourceOver,
    /// Remove the destination where the stroke covers it
    DestinationOut,
}

impl BlendMode {
    pub fn for_stroke(stroke: &Stroke) -> Self {
        if stroke.is_eraser() {
            BlendMode::DestinationOut
        } else {
            BlendMode::SourceOver
        }
    }
}

/// Composite every stroke of `drawing` onto a transparent surface of `size`.
pub fn composite(drawing: &Drawing, size: [u32; 2]) -> RgbaImage {
    let mut surface = RgbaImage::new(size[0], size[1]);
    for stroke in drawing.strokes() {
        apply_stroke(&mut surface, stroke);
    }
    surface
}

/// Rasterize one stroke onto `surface` with its blend mode.
pub fn apply_stroke(surface: &mut RgbaImage, stroke: &Stroke) {
    let points = stroke.points();
    if points.is_empty() || surface.width() == 0 || surface.height() == 0 {
        return;
    }

    let radius = stroke.width() / 2.0;
    let Some(area) = PixelArea::covering(calculate_bounds(points, radius + 1.0), surface) else {
        return;
    };

    // Coverage is accumulated per stroke first so overlapping segments of the
    // same stroke don't blend twice.
    let mut coverage = vec![0.0f32; area.len()];
    if points.len() == 1 {
        cover_segment(&mut coverage, &area, points[0], points[0], radius);
    } else {
        for segment in points.windows(2) {
            cover_segment(&mut coverage, &area, segment[0], segment[1], radius);
        }
    }

    let mode = BlendMode::for_stroke(stroke);
    let color = stroke.color().to_color32();
    let source = [color.r(), color.g(), color.b()];

    for (index, &amount) in coverage.iter().enumerate() {
        if amount <= 0.0 {
            continue;
        }
        let (x, y) = area.pixel(index);
        let pixel = surface.get_pixel_mut(x, y);
        *pixel = blend(*pixel, source, amount, mode);
    }
}

/// Blend an opaque source color with `coverage` into `dst` (straight alpha).
fn blend(dst: Rgba<u8>, source: [u8; 3], coverage: f32, mode: BlendMode) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;
    match mode {
        BlendMode::SourceOver => {
            let out_alpha = coverage + dst_alpha * (1.0 - coverage);
            if out_alpha <= 0.0 {
                return Rgba([0, 0, 0, 0]);
            }
            let mut out = [0u8; 4];
            for channel in 0..3 {
                let src = source[channel] as f32;
                let below = dst[channel] as f32 * dst_alpha * (1.0 - coverage);
                out[channel] = ((src * coverage + below) / out_alpha).round().clamp(0.0, 255.0) as u8;
            }
            out[3] = (out_alpha * 255.0).round() as u8;
            Rgba(out)
        }
        BlendMode::DestinationOut => {
            let out_alpha = dst_alpha * (1.0 - coverage);
            let alpha = (out_alpha * 255.0).round() as u8;
            if alpha == 0 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([dst[0], dst[1], dst[2], alpha])
            }
        }
    }
}

/// Integer pixel rectangle clipped to a surface
struct PixelArea {
    min_x: u32,
    min_y: u32,
    width: u32,
    height: u32,
}

impl PixelArea {
    fn covering(bounds: Rect, surface: &RgbaImage) -> Option<Self> {
        let min_x = bounds.min.x.floor().max(0.0) as u32;
        let min_y = bounds.min.y.floor().max(0.0) as u32;
        let max_x = (bounds.max.x.ceil().max(0.0) as u32).min(surface.width());
        let max_y = (bounds.max.y.ceil().max(0.0) as u32).min(surface.height());
        if min_x >= max_x || min_y >= max_y {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }

    fn len(&self) -> usize {
        (self.width * self.height) as usize
    }

    fn pixel(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (self.min_x + index % self.width, self.min_y + index / self.width)
    }
}

/// Raise `coverage` for pixels within `radius` of the segment, anti-aliased over one pixel
fn cover_segment(coverage: &mut [f32], area: &PixelArea, start: Pos2, end: Pos2, radius: f32) {
    let bounds = calculate_bounds(&[start, end], radius + 1.0);
    let x0 = bounds.min.x.floor().max(area.min_x as f32) as u32;
    let y0 = bounds.min.y.floor().max(area.min_y as f32) as u32;
    let x1 = (bounds.max.x.ceil().max(0.0) as u32).min(area.min_x + area.width);
    let y1 = (bounds.max.y.ceil().max(0.0) as u32).min(area.min_y + area.height);

    for y in y0..y1 {
        for x in x0..x1 {
            let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let distance = distance_to_line_segment(centre, start, end);
            let amount = (radius - distance + 0.5).clamp(0.0, 1.0);
            if amount > 0.0 {
                let index = ((y - area.min_y) * area.width + (x - area.min_x)) as usize;
                if amount > coverage[index] {
                    coverage[index] = amount;
                }
            }
        }
    }
}

/// Distance from a point to a line segment
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Bounding box for a set of points, grown by `padding` on every side
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let start = Pos2::new(0.0, 0.0);
        let end = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_line_segment(Pos2::new(5.0, 3.0), start, end), 3.0);
        assert_eq!(distance_to_line_segment(Pos2::new(14.0, 3.0), start, end), 5.0);
        assert_eq!(distance_to_line_segment(Pos2::new(0.0, 2.0), start, start), 2.0);
    }

    #[test]
    fn test_bounds_include_padding() {
        let rect = calculate_bounds(&[Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0)], 2.0);
        assert_eq!(rect.min, Pos2::new(8.0, 8.0));
        assert_eq!(rect.max, Pos2::new(22.0, 32.0));
    }

    #[test]
    fn test_destination_out_fully_covered_clears() {
        let out = blend(Rgba([10, 20, 30, 255]), [0, 0, 0], 1.0, BlendMode::DestinationOut);
        assert_eq!(out, Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_destination_out_partial_keeps_color() {
        let out = blend(Rgba([10, 20, 30, 255]), [0, 0, 0], 0.5, BlendMode::DestinationOut);
        assert_eq!(out.0[..3], [10, 20, 30]);
        assert_eq!(out[3], 128);
    }

    #[test]
    fn test_source_over_on_transparent_takes_source() {
        let out = blend(Rgba([0, 0, 0, 0]), [255, 165, 0], 1.0, BlendMode::SourceOver);
        assert_eq!(out, Rgba([255, 165, 0, 255]));
    }

    #[test]
    fn test_stroke_outside_surface_is_ignored() {
        let mut surface = RgbaImage::new(10, 10);
        let stroke = Stroke::new(crate::stroke::Tool::Pen, crate::stroke::PenColor::Red, Pos2::new(500.0, 500.0));
        apply_stroke(&mut surface, &stroke);
        assert!(surface.pixels().all(|p| p[3] == 0));
    }
}
