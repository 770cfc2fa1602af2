//! Crop rectangle arithmetic. Every function returns a region that already
//! satisfies the bounds and minimum-size invariants.
//!
//! Aspect ratios passed here are *normalized* (width / height measured in
//! normalized units); callers convert pixel ratios with
//! [`AspectRatio::normalized`](super::AspectRatio::normalized).

use crate::geometry::Point;

use super::handle::Handle;
use super::region::CropRegion;

/// Bring `region` back inside the unit square.
///
/// Negative extents are flipped, extents are raised to `min_size` (and capped
/// at 1), then the origin is translated so the box lies in `[0, 1]²`.
/// Non-finite input collapses to the full frame.
pub fn clamp_region(region: CropRegion, min_size: f32) -> CropRegion {
    let CropRegion {
        mut x,
        mut y,
        mut width,
        mut height,
    } = region;
    if ![x, y, width, height].iter().all(|v| v.is_finite()) {
        return CropRegion::FULL;
    }
    let min_size = if min_size.is_finite() { min_size.clamp(0.0, 1.0) } else { 0.0 };

    if width < 0.0 {
        x += width;
        width = -width;
    }
    if height < 0.0 {
        y += height;
        height = -height;
    }

    width = width.clamp(min_size, 1.0);
    height = height.clamp(min_size, 1.0);
    x = x.clamp(0.0, 1.0 - width);
    y = y.clamp(0.0, 1.0 - height);

    CropRegion { x, y, width, height }
}

/// Unconstrained resize of `start` by `delta` (normalized, measured from the
/// drag origin). `Move` translates the whole box.
pub fn resize_free(start: CropRegion, handle: Handle, delta: Point, min_size: f32) -> CropRegion {
    if handle == Handle::Move {
        let moved = CropRegion {
            x: start.x + delta.x,
            y: start.y + delta.y,
            ..start
        };
        return clamp_region(moved, min_size);
    }

    let (sx, sy) = handle.sides();
    let (x, width) = resolve_axis(start.x, start.width, sx, delta.x, min_size);
    let (y, height) = resolve_axis(start.y, start.height, sy, delta.y, min_size);
    clamp_region(CropRegion { x, y, width, height }, min_size)
}

/// Move one side of the `[pos, pos + extent]` interval, keeping the other
/// fixed. The moving side is clipped to `[0, 1]` and may cross the fixed one.
fn resolve_axis(pos: f32, extent: f32, side: i8, delta: f32, min_size: f32) -> (f32, f32) {
    let (anchor, moving) = match side {
        1 => (pos, pos + extent + delta),
        -1 => (pos + extent, pos + delta),
        _ => return (pos, extent),
    };
    let signed = enforce_min(moving.clamp(0.0, 1.0) - anchor, side, min_size);
    (anchor.min(anchor + signed), signed.abs())
}

/// Grow a signed extent to at least `min_size` in magnitude, keeping its
/// direction (or the handle's side when it is zero).
fn enforce_min(signed: f32, side: i8, min_size: f32) -> f32 {
    if signed.abs() >= min_size {
        return signed;
    }
    min_size * direction(signed, side)
}

fn direction(signed: f32, side: i8) -> f32 {
    if signed != 0.0 {
        signed.signum()
    } else {
        f32::from(side)
    }
}

/// Smallest `(width, height)` with `width / height == ratio` and both
/// extents at least `min_size`, not smaller than the given width.
fn ensure_min_locked(width: f32, ratio: f32, min_size: f32) -> (f32, f32) {
    let width = width.max(min_size).max(min_size * ratio);
    (width, width / ratio)
}

/// Resize `start` with the normalized aspect `ratio` held.
///
/// Corners pivot on the opposite corner and take whichever pointer extent
/// dominates under the ratio. Edges set the dimension they drive and derive
/// the other from the ratio, centered on the box's prior center. `Move`
/// translates as in [`resize_free`].
pub fn resize_locked(start: CropRegion, handle: Handle, delta: Point, ratio: f32, min_size: f32) -> CropRegion {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return resize_free(start, handle, delta, min_size);
    }
    if handle.is_corner() {
        resize_corner_locked(start, handle, delta, ratio, min_size)
    } else if handle.is_edge() {
        let (sx, _) = handle.sides();
        if sx != 0 {
            resize_edge_locked(start, sx, delta.x, ratio, min_size)
        } else {
            // Solve the vertical edge as a horizontal one on the transposed box.
            let (_, sy) = handle.sides();
            let r = resize_edge_locked(transpose(start), sy, delta.y, 1.0 / ratio, min_size);
            transpose(r)
        }
    } else {
        resize_free(start, handle, delta, min_size)
    }
}

fn resize_corner_locked(start: CropRegion, handle: Handle, delta: Point, ratio: f32, min_size: f32) -> CropRegion {
    let (sx, sy) = handle.sides();
    let (ax, px) = if sx > 0 { (start.x, start.right()) } else { (start.right(), start.x) };
    let (ay, py) = if sy > 0 { (start.y, start.bottom()) } else { (start.bottom(), start.y) };

    let dx = (px + delta.x).clamp(0.0, 1.0) - ax;
    let dy = (py + delta.y).clamp(0.0, 1.0) - ay;
    let dir_x = direction(dx, sx);
    let dir_y = direction(dy, sy);

    let (mut w, mut h) = if dx.abs() >= dy.abs() * ratio {
        (dx.abs(), dx.abs() / ratio)
    } else {
        (dy.abs() * ratio, dy.abs())
    };

    let room_x = if dir_x > 0.0 { 1.0 - ax } else { ax };
    let room_y = if dir_y > 0.0 { 1.0 - ay } else { ay };
    if w > room_x {
        w = room_x;
        h = w / ratio;
    }
    if h > room_y {
        h = room_y;
        w = h * ratio;
    }
    (w, h) = ensure_min_locked(w, ratio, min_size);

    let x = if dir_x > 0.0 { ax } else { ax - w };
    let y = if dir_y > 0.0 { ay } else { ay - h };
    clamp_region(CropRegion { x, y, width: w, height: h }, min_size)
}

/// Left/right edge with the ratio held. `side` is -1 for left, 1 for right.
fn resize_edge_locked(start: CropRegion, side: i8, dx: f32, ratio: f32, min_size: f32) -> CropRegion {
    let (anchor, moving) = if side > 0 {
        (start.x, start.right() + dx)
    } else {
        (start.right(), start.x + dx)
    };
    let signed = moving.clamp(0.0, 1.0) - anchor;
    let dir = direction(signed, side);

    let cy = start.center().y;
    let room_h = 2.0 * cy.min(1.0 - cy);

    let mut w = signed.abs();
    let mut h = w / ratio;
    if h > room_h {
        h = room_h;
        w = h * ratio;
    }
    (w, h) = ensure_min_locked(w, ratio, min_size);

    let x = if dir > 0.0 { anchor } else { anchor - w };
    clamp_region(
        CropRegion {
            x,
            y: cy - h / 2.0,
            width: w,
            height: h,
        },
        min_size,
    )
}

fn transpose(r: CropRegion) -> CropRegion {
    CropRegion {
        x: r.y,
        y: r.x,
        width: r.height,
        height: r.width,
    }
}

/// Refit `region` to the normalized `ratio`, keeping its center and width
/// and shrinking when the derived height does not fit.
pub fn fit_to_ratio(region: CropRegion, ratio: f32, min_size: f32) -> CropRegion {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return clamp_region(region, min_size);
    }

    let c = region.center();
    // Widest box of this ratio that fits the unit square.
    let max_w = ratio.min(1.0);
    let (w, h) = ensure_min_locked(region.width.min(max_w), ratio, min_size);

    clamp_region(
        CropRegion {
            x: c.x - w / 2.0,
            y: c.y - h / 2.0,
            width: w,
            height: h,
        },
        min_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const MIN: f32 = 0.05;

    fn assert_region(r: CropRegion, x: f32, y: f32, w: f32, h: f32) {
        assert_abs_diff_eq!(r.x, x, epsilon = 1e-5);
        assert_abs_diff_eq!(r.y, y, epsilon = 1e-5);
        assert_abs_diff_eq!(r.width, w, epsilon = 1e-5);
        assert_abs_diff_eq!(r.height, h, epsilon = 1e-5);
    }

    #[test]
    fn test_clamp_flips_negative_extent() {
        let r = clamp_region(CropRegion::new(0.6, 0.5, -0.4, 0.2), MIN);
        assert_region(r, 0.2, 0.5, 0.4, 0.2);
    }

    #[test]
    fn test_clamp_raises_to_min_and_translates_inside() {
        let r = clamp_region(CropRegion::new(0.99, -0.2, 0.01, 0.3), MIN);
        assert_region(r, 0.95, 0.0, 0.05, 0.3);
    }

    #[test]
    fn test_clamp_non_finite_gives_full_frame() {
        let r = clamp_region(CropRegion::new(f32::NAN, 0.0, 0.5, 0.5), MIN);
        assert_eq!(r, CropRegion::FULL);
    }

    #[test]
    fn test_resolve_axis_crossing_flips() {
        // Right edge of [0.2, 0.6] dragged to 0.1 crosses the left edge.
        let (pos, extent) = resolve_axis(0.2, 0.4, 1, -0.5, MIN);
        assert_abs_diff_eq!(pos, 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(extent, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_resolve_axis_collapse_keeps_min() {
        let (pos, extent) = resolve_axis(0.2, 0.4, 1, -0.4, MIN);
        assert_abs_diff_eq!(pos, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(extent, MIN, epsilon = 1e-6);
    }

    #[test]
    fn test_free_right_edge_clipped_at_image_border() {
        let start = CropRegion::new(0.2, 0.2, 0.5, 0.5);
        let r = resize_free(start, Handle::Right, Point::new(0.9, 0.3), MIN);
        assert_region(r, 0.2, 0.2, 0.8, 0.5);
    }

    #[test]
    fn test_move_clamps_to_border() {
        let start = CropRegion::new(0.1, 0.1, 0.5, 0.5);
        let r = resize_free(start, Handle::Move, Point::new(0.6, 0.0), MIN);
        assert_region(r, 0.5, 0.1, 0.5, 0.5);
    }

    #[test]
    fn test_locked_corner_keeps_anchor_and_ratio() {
        let start = CropRegion::new(0.1, 0.1, 0.4, 0.2);
        let r = resize_locked(start, Handle::BottomRight, Point::new(0.2, 0.0), 2.0, MIN);
        assert_region(r, 0.1, 0.1, 0.6, 0.3);
    }

    #[test]
    fn test_locked_corner_limited_by_room() {
        let start = CropRegion::new(0.5, 0.5, 0.2, 0.2);
        let r = resize_locked(start, Handle::BottomRight, Point::new(0.9, 0.9), 1.0, MIN);
        assert_region(r, 0.5, 0.5, 0.5, 0.5);
    }

    #[test]
    fn test_locked_edge_recenters_perpendicular() {
        let start = CropRegion::new(0.2, 0.4, 0.2, 0.2);
        let r = resize_locked(start, Handle::Right, Point::new(0.2, 0.0), 1.0, MIN);
        // Width 0.4 from x = 0.2, height 0.4 centered on y = 0.5.
        assert_region(r, 0.2, 0.3, 0.4, 0.4);
    }

    #[test]
    fn test_locked_bottom_edge_uses_transposed_math() {
        let start = CropRegion::new(0.4, 0.2, 0.2, 0.2);
        let r = resize_locked(start, Handle::Bottom, Point::new(0.0, 0.2), 2.0, MIN);
        // Height 0.4, width 0.8 centered on x = 0.5.
        assert_region(r, 0.1, 0.2, 0.8, 0.4);
    }

    #[test]
    fn test_locked_edge_limited_by_perpendicular_room() {
        let start = CropRegion::new(0.1, 0.1, 0.2, 0.2);
        let r = resize_locked(start, Handle::Right, Point::new(0.6, 0.0), 1.0, MIN);
        // Center y = 0.2 leaves 0.4 of vertical room.
        assert_region(r, 0.1, 0.0, 0.4, 0.4);
    }

    #[test]
    fn test_fit_to_ratio_wide_on_full_frame() {
        let r = fit_to_ratio(CropRegion::FULL, 16.0 / 9.0, MIN);
        assert_region(r, 0.0, 0.21875, 1.0, 0.5625);
    }

    #[test]
    fn test_fit_to_ratio_tall_shrinks_width() {
        let r = fit_to_ratio(CropRegion::FULL, 0.5, MIN);
        assert_region(r, 0.25, 0.0, 0.5, 1.0);
    }

    #[test]
    fn test_fit_to_ratio_keeps_width_that_fits() {
        let r = fit_to_ratio(CropRegion::new(0.2, 0.0, 0.3, 1.0), 1.0, MIN);
        assert_region(r, 0.2, 0.35, 0.3, 0.3);
    }

    #[test]
    fn test_ensure_min_locked_wide_ratio() {
        let (w, h) = ensure_min_locked(0.0, 4.0, MIN);
        assert_abs_diff_eq!(w, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(h, 0.05, epsilon = 1e-6);
    }
}
