use tracing::{debug, info, trace};

use crate::config::CropConfig;
use crate::cursor::CursorHint;
use crate::geometry::{Point, Size};

use super::aspect::AspectRatio;
use super::handle::{handle_at, Handle};
use super::region::CropRegion;
use super::resize::{clamp_region, fit_to_ratio, resize_free, resize_locked};

#[derive(Clone, Copy, Debug)]
enum DragState {
    Idle,
    Dragging {
        handle: Handle,
        /// Normalized pointer position at drag start.
        origin: Point,
        start: CropRegion,
    },
}

/// Interactive crop box over one image.
///
/// Pointer positions come in as canvas pixels; the region is kept
/// normalized. Each drag recomputes from the region captured at drag start,
/// so rounding does not accumulate.
#[derive(Clone, Debug)]
pub struct CropEditor {
    region: CropRegion,
    aspect: AspectRatio,
    image: Size,
    min_size: f32,
    handle_size: f32,
    drag: DragState,
}

impl CropEditor {
    /// Full-frame box, fitted to `aspect`.
    pub fn new(image: Size, config: &CropConfig, aspect: AspectRatio) -> Self {
        let mut editor = Self {
            region: CropRegion::FULL,
            aspect,
            image,
            min_size: config.min_size,
            handle_size: config.handle_size,
            drag: DragState::Idle,
        };
        editor.refit();
        editor
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    pub fn image_size(&self) -> Size {
        self.image
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.drag {
            DragState::Dragging { handle, .. } => Some(handle),
            DragState::Idle => None,
        }
    }

    pub fn handle_at(&self, canvas: Point, zoom: f32) -> Option<Handle> {
        handle_at(canvas, &self.region, self.image, zoom, self.handle_size)
    }

    /// Start a drag if `canvas` hits a handle. Returns the grabbed handle.
    pub fn begin_drag(&mut self, canvas: Point, zoom: f32) -> Option<Handle> {
        if self.is_dragging() {
            debug!("crop drag already active, ending it first");
            self.end_drag();
        }

        let handle = self.handle_at(canvas, zoom)?;
        self.drag = DragState::Dragging {
            handle,
            origin: self.normalize(canvas),
            start: self.region,
        };
        debug!(?handle, "crop drag started");
        Some(handle)
    }

    /// Recompute the region for the pointer at `canvas`. Returns whether the
    /// region changed.
    pub fn drag_to(&mut self, canvas: Point) -> bool {
        let DragState::Dragging { handle, origin, start } = self.drag else {
            trace!("crop drag_to while idle ignored");
            return false;
        };
        if !canvas.is_finite() {
            return false;
        }

        let delta = self.normalize(canvas) - origin;
        let next = match self.aspect.normalized(self.image) {
            Some(ratio) if handle != Handle::Move => resize_locked(start, handle, delta, ratio, self.min_size),
            _ => resize_free(start, handle, delta, self.min_size),
        };

        let changed = next != self.region;
        self.region = next;
        changed
    }

    /// Finish the drag and return the committed region, or `None` when idle.
    pub fn end_drag(&mut self) -> Option<CropRegion> {
        let DragState::Dragging { handle, .. } = self.drag else {
            return None;
        };
        self.drag = DragState::Idle;
        self.region = clamp_region(self.region, self.min_size);

        let r = self.region;
        info!(?handle, x = r.x, y = r.y, width = r.width, height = r.height, "crop committed");
        Some(r)
    }

    /// Abort the drag and restore the region it started from.
    pub fn cancel_drag(&mut self) -> bool {
        let DragState::Dragging { start, .. } = self.drag else {
            return false;
        };
        self.region = start;
        self.drag = DragState::Idle;
        debug!("crop drag cancelled");
        true
    }

    /// Cursor for a pointer hovering at `canvas`.
    pub fn cursor(&self, canvas: Point, zoom: f32) -> CursorHint {
        match self.drag {
            DragState::Dragging {
                handle: Handle::Move, ..
            } => CursorHint::Grabbing,
            DragState::Dragging { handle, .. } => handle.cursor(),
            DragState::Idle => self.handle_at(canvas, zoom).map_or(CursorHint::Default, Handle::cursor),
        }
    }

    /// Change the constraint. While idle the box is refitted around its
    /// center; during a drag the new ratio applies from the next move.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        if self.is_dragging() {
            debug!(%aspect, "aspect ratio changed mid-drag");
            return;
        }
        self.refit();
        debug!(%aspect, "aspect ratio set");
    }

    /// Replace the region (clamped). Ignored during a drag.
    pub fn set_region(&mut self, region: CropRegion) {
        if self.is_dragging() {
            trace!("set_region during drag ignored");
            return;
        }
        self.region = clamp_region(region, self.min_size);
    }

    fn refit(&mut self) {
        self.region = match self.aspect.normalized(self.image) {
            Some(ratio) => fit_to_ratio(self.region, ratio, self.min_size),
            None => clamp_region(self.region, self.min_size),
        };
    }

    fn normalize(&self, canvas: Point) -> Point {
        Point::new(canvas.x / self.image.width, canvas.y / self.image.height)
    }
}
