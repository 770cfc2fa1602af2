use crate::cursor::CursorHint;
use crate::geometry::{Point, Size};

use super::region::CropRegion;

/// Hit-testable part of a crop box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Interior: drags the whole box.
    Move,
}

impl Handle {
    pub const CORNERS: [Handle; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];
    pub const EDGES: [Handle; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    pub fn is_edge(self) -> bool {
        Self::EDGES.contains(&self)
    }

    /// Which sides the handle drives: -1 = left/top, 1 = right/bottom,
    /// 0 = that axis is untouched.
    pub fn sides(self) -> (i8, i8) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (0, -1),
            Self::TopRight => (1, -1),
            Self::Right => (1, 0),
            Self::BottomRight => (1, 1),
            Self::Bottom => (0, 1),
            Self::BottomLeft => (-1, 1),
            Self::Left => (-1, 0),
            Self::Move => (0, 0),
        }
    }

    /// Where the handle sits on a box with top-left `min` and `size`.
    pub fn position(self, min: Point, size: Size) -> Point {
        let (sx, sy) = self.sides();
        Point::new(
            min.x + size.width * (sx as f32 + 1.0) / 2.0,
            min.y + size.height * (sy as f32 + 1.0) / 2.0,
        )
    }

    pub fn cursor(self) -> CursorHint {
        match self {
            Self::TopLeft | Self::BottomRight => CursorHint::NwseResize,
            Self::TopRight | Self::BottomLeft => CursorHint::NeswResize,
            Self::Top | Self::Bottom => CursorHint::NsResize,
            Self::Left | Self::Right => CursorHint::EwResize,
            Self::Move => CursorHint::Move,
        }
    }
}

/// Find the handle under `point` (canvas pixels).
///
/// Handles are squares of half-side `handle_size / zoom` canvas units, so
/// they keep a constant on-screen size. Corners win over edges, edges over
/// the interior.
pub fn handle_at(point: Point, region: &CropRegion, image: Size, zoom: f32, handle_size: f32) -> Option<Handle> {
    if image.is_empty() || !(zoom > 0.0) || !point.is_finite() {
        return None;
    }

    let tolerance = handle_size / zoom;
    let (min, size) = region.to_canvas(image);
    let near = |h: Handle| {
        let p = h.position(min, size);
        (point.x - p.x).abs() <= tolerance && (point.y - p.y).abs() <= tolerance
    };

    Handle::CORNERS
        .iter()
        .chain(Handle::EDGES.iter())
        .copied()
        .find(|&h| near(h))
        .or_else(|| {
            let inside = point.x >= min.x
                && point.x <= min.x + size.width
                && point.y >= min.y
                && point.y <= min.y + size.height;
            inside.then_some(Handle::Move)
        })
}
