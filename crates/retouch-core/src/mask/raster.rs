//! Binary rasterization into the working buffer.
//!
//! A pixel is covered when its center `(x + 0.5, y + 0.5)` lies inside the
//! shape. No anti-aliasing: the mask is two-state.

use image::{Rgba, RgbaImage};

use crate::geometry::Point;

pub(crate) fn fill_circle(buf: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    fill_capsule(buf, center, center, radius, color);
}

/// Segment `a`-`b` thickened by `radius`, with round caps.
pub(crate) fn fill_capsule(buf: &mut RgbaImage, a: Point, b: Point, radius: f32, color: Rgba<u8>) {
    if !(radius > 0.0) || !a.is_finite() || !b.is_finite() {
        return;
    }
    let Some((x0, y0, x1, y1)) = pixel_span(
        buf,
        a.x.min(b.x) - radius,
        a.y.min(b.y) - radius,
        a.x.max(b.x) + radius,
        a.y.max(b.y) + radius,
    ) else {
        return;
    };

    let ab = b - a;
    let len2 = ab.dot(ab);
    let r2 = radius * radius;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let t = if len2 > 0.0 {
                ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let d = p - (a + ab * t);
            if d.dot(d) <= r2 {
                buf.put_pixel(x, y, color);
            }
        }
    }
}

/// Fill a closed polygon with the nonzero winding rule.
pub(crate) fn fill_polygon(buf: &mut RgbaImage, vertices: &[Point], color: Rgba<u8>) {
    if vertices.len() < 3 || vertices.iter().any(|v| !v.is_finite()) {
        return;
    }

    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for v in vertices {
        min_x = min_x.min(v.x);
        min_y = min_y.min(v.y);
        max_x = max_x.max(v.x);
        max_y = max_y.max(v.y);
    }
    let Some((x0, y0, x1, y1)) = pixel_span(buf, min_x, min_y, max_x, max_y) else {
        return;
    };

    let n = vertices.len();
    let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(n);

    for y in y0..=y1 {
        let sy = y as f32 + 0.5;
        crossings.clear();

        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            // Half-open in y so shared vertices count once.
            if (a.y <= sy) != (b.y <= sy) {
                let t = (sy - a.y) / (b.y - a.y);
                let winding = if b.y > a.y { 1 } else { -1 };
                crossings.push((a.x + t * (b.x - a.x), winding));
            }
        }
        crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding != 0 {
                fill_span(buf, y, pair[0].0, pair[1].0, x0, x1, color);
            }
        }
    }
}

/// Pixels in row `y` whose centers fall in `[from, to)`, limited to `x0..=x1`.
fn fill_span(buf: &mut RgbaImage, y: u32, from: f32, to: f32, x0: u32, x1: u32, color: Rgba<u8>) {
    let start = (from - 0.5).ceil().max(x0 as f32);
    let end = (to - 0.5).ceil().min(x1 as f32 + 1.0);
    if !(start < end) {
        return;
    }
    for x in start as u32..end as u32 {
        buf.put_pixel(x, y, color);
    }
}

/// Pixel index range whose centers may lie in the float rectangle, clipped
/// to the buffer. `None` when nothing overlaps.
fn pixel_span(buf: &RgbaImage, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Option<(u32, u32, u32, u32)> {
    let (w, h) = buf.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let x0 = (min_x - 0.5).ceil().max(0.0);
    let y0 = (min_y - 0.5).ceil().max(0.0);
    let x1 = (max_x - 0.5).floor().min(w as f32 - 1.0);
    let y1 = (max_y - 0.5).floor().min(h as f32 - 1.0);
    if !(x0 <= x1 && y0 <= y1) {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ON: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn covered(buf: &RgbaImage) -> usize {
        buf.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn test_pixel_span_outside_is_none() {
        let buf = RgbaImage::new(10, 10);
        assert!(pixel_span(&buf, 20.0, 20.0, 30.0, 30.0).is_none());
        assert!(pixel_span(&buf, -10.0, -10.0, -1.0, -1.0).is_none());
    }

    #[test]
    fn test_pixel_span_clips_to_buffer() {
        let buf = RgbaImage::new(10, 10);
        assert_eq!(pixel_span(&buf, -5.0, 2.0, 50.0, 4.0), Some((0, 2, 9, 3)));
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut buf = RgbaImage::new(20, 20);
        fill_circle(&mut buf, Point::new(10.0, 10.0), 3.0, ON);
        for y in 0..20 {
            for x in 0..20 {
                let mirrored = buf.get_pixel(19 - x, y).0[3];
                assert_eq!(buf.get_pixel(x, y).0[3], mirrored, "asymmetric at ({x},{y})");
            }
        }
        assert!(covered(&buf) > 0);
    }

    #[test]
    fn test_zero_length_capsule_equals_circle() {
        let mut a = RgbaImage::new(16, 16);
        let mut b = RgbaImage::new(16, 16);
        fill_circle(&mut a, Point::new(8.0, 8.0), 4.0, ON);
        fill_capsule(&mut b, Point::new(8.0, 8.0), Point::new(8.0, 8.0), 4.0, ON);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_radius_paints_nothing() {
        let mut buf = RgbaImage::new(8, 8);
        fill_capsule(&mut buf, Point::new(1.0, 1.0), Point::new(6.0, 6.0), 0.0, ON);
        assert_eq!(covered(&buf), 0);
    }

    #[test]
    fn test_axis_aligned_square_polygon() {
        let mut buf = RgbaImage::new(10, 10);
        let square = [
            Point::new(2.0, 2.0),
            Point::new(6.0, 2.0),
            Point::new(6.0, 6.0),
            Point::new(2.0, 6.0),
        ];
        fill_polygon(&mut buf, &square, ON);
        assert_eq!(covered(&buf), 16);
        assert_eq!(buf.get_pixel(2, 2).0[3], 255);
        assert_eq!(buf.get_pixel(5, 5).0[3], 255);
        assert_eq!(buf.get_pixel(6, 6).0[3], 0);
    }

    #[test]
    fn test_polygon_winding_direction_irrelevant() {
        let cw = [
            Point::new(1.0, 1.0),
            Point::new(9.0, 1.0),
            Point::new(5.0, 9.0),
        ];
        let ccw = [cw[2], cw[1], cw[0]];
        let mut a = RgbaImage::new(12, 12);
        let mut b = RgbaImage::new(12, 12);
        fill_polygon(&mut a, &cw, ON);
        fill_polygon(&mut b, &ccw, ON);
        assert_eq!(a, b);
    }

    #[test]
    fn test_self_overlapping_polygon_fills_nonzero() {
        // Pentagram: the center has winding number 2 and is filled.
        let star: Vec<Point> = (0..5)
            .map(|i| {
                let angle = std::f32::consts::FRAC_PI_2 + i as f32 * 4.0 * std::f32::consts::PI / 5.0;
                Point::new(20.0 + 15.0 * angle.cos(), 20.0 - 15.0 * angle.sin())
            })
            .collect();
        let mut buf = RgbaImage::new(40, 40);
        fill_polygon(&mut buf, &star, ON);
        assert_eq!(buf.get_pixel(20, 20).0[3], 255);
    }

    #[test]
    fn test_degenerate_polygon_ignored() {
        let mut buf = RgbaImage::new(8, 8);
        fill_polygon(&mut buf, &[Point::new(1.0, 1.0), Point::new(5.0, 5.0)], ON);
        assert_eq!(covered(&buf), 0);
    }
}
