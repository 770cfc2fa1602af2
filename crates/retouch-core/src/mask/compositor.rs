use std::fmt;

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::alpha::{finalize, AlphaMask};
use super::raster;
use crate::config::MaskConfig;
use crate::error::{RetouchError, Result};
use crate::geometry::Point;

/// Drawing model for a stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawTool {
    /// Round brush of `brush_size` diameter.
    #[default]
    Brush,
    /// Freehand polygon, filled on release.
    Lasso,
}

impl fmt::Display for DrawTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brush => write!(f, "Brush"),
            Self::Lasso => write!(f, "Lasso"),
        }
    }
}

struct Stroke {
    tool: DrawTool,
    last: Point,
    /// Lasso vertices; empty for brush strokes.
    vertices: Vec<Point>,
    /// Working buffer as it was before the stroke began.
    before: RgbaImage,
}

enum StrokeState {
    Idle,
    Drawing(Stroke),
}

/// Accumulates brush strokes and lasso fills into a working buffer the size
/// of the base image, and finalizes it into an [`AlphaMask`] on every
/// stroke end.
pub struct MaskCompositor {
    working: RgbaImage,
    overlay: Rgba<u8>,
    brush_size: f32,
    lasso_width: f32,
    state: StrokeState,
    committed: Option<AlphaMask>,
    revision: u64,
}

impl MaskCompositor {
    pub fn new(width: u32, height: u32, config: &MaskConfig) -> Self {
        let [r, g, b] = config.overlay_color;
        Self {
            working: RgbaImage::new(width, height),
            overlay: Rgba([r, g, b, 255]),
            brush_size: config.brush_size,
            lasso_width: config.lasso_feedback_width,
            state: StrokeState::Idle,
            committed: None,
            revision: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.working.width()
    }

    pub fn height(&self) -> u32 {
        self.working.height()
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Set the brush diameter. Non-positive or non-finite sizes are ignored.
    pub fn set_brush_size(&mut self, size: f32) {
        if size > 0.0 && size.is_finite() {
            self.brush_size = size;
        } else {
            trace!(size, "brush size ignored");
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing(_))
    }

    /// Vertices of the lasso being traced, for hosts that draw their own outline.
    pub fn lasso_vertices(&self) -> &[Point] {
        match &self.state {
            StrokeState::Drawing(stroke) => &stroke.vertices,
            StrokeState::Idle => &[],
        }
    }

    /// Colorized buffer for live overlay rendering.
    pub fn working_buffer(&self) -> &RgbaImage {
        &self.working
    }

    /// Last committed selection. `None` means nothing is selected.
    pub fn mask(&self) -> Option<&AlphaMask> {
        self.committed.as_ref()
    }

    /// Bumped on every working-buffer change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn begin_stroke(&mut self, point: Point, tool: DrawTool) {
        if self.is_drawing() {
            warn!("stroke already in progress, committing it first");
            self.end_stroke();
        }

        let before = self.working.clone();
        let vertices = match tool {
            DrawTool::Brush => {
                raster::fill_circle(&mut self.working, point, self.brush_size / 2.0, self.overlay);
                Vec::new()
            }
            DrawTool::Lasso => {
                clear_buffer(&mut self.working);
                vec![point]
            }
        };

        self.state = StrokeState::Drawing(Stroke {
            tool,
            last: point,
            vertices,
            before,
        });
        self.revision += 1;
        debug!(%tool, x = point.x, y = point.y, "stroke started");
    }

    pub fn continue_stroke(&mut self, point: Point) {
        let StrokeState::Drawing(stroke) = &mut self.state else {
            trace!("continue_stroke while idle ignored");
            return;
        };

        match stroke.tool {
            DrawTool::Brush => {
                raster::fill_capsule(&mut self.working, stroke.last, point, self.brush_size / 2.0, self.overlay);
            }
            DrawTool::Lasso => {
                raster::fill_capsule(&mut self.working, stroke.last, point, self.lasso_width / 2.0, self.overlay);
                stroke.vertices.push(point);
            }
        }
        stroke.last = point;
        self.revision += 1;
    }

    /// Close the stroke and finalize. Returns `false` when idle.
    pub fn end_stroke(&mut self) -> bool {
        let StrokeState::Drawing(stroke) = std::mem::replace(&mut self.state, StrokeState::Idle) else {
            trace!("end_stroke while idle ignored");
            return false;
        };

        if stroke.tool == DrawTool::Lasso {
            if stroke.vertices.len() >= 3 {
                clear_buffer(&mut self.working);
                raster::fill_polygon(&mut self.working, &stroke.vertices, self.overlay);
            } else {
                debug!(vertices = stroke.vertices.len(), "lasso too short, discarded");
                self.working = stroke.before;
            }
            self.revision += 1;
        }

        self.committed = finalize(&self.working);
        info!(
            tool = %stroke.tool,
            selected = self.committed.as_ref().map_or(0, AlphaMask::selected_count),
            "mask committed"
        );
        true
    }

    /// Drop the open stroke and restore the buffer without finalizing.
    pub fn cancel_stroke(&mut self) -> bool {
        let StrokeState::Drawing(stroke) = std::mem::replace(&mut self.state, StrokeState::Idle) else {
            return false;
        };
        self.working = stroke.before;
        self.revision += 1;
        debug!(tool = %stroke.tool, "stroke cancelled");
        true
    }

    /// Remove the whole selection.
    pub fn clear(&mut self) {
        self.state = StrokeState::Idle;
        clear_buffer(&mut self.working);
        self.committed = None;
        self.revision += 1;
    }

    /// Replace the selection with a previously exported mask.
    pub fn load_mask(&mut self, mask: &AlphaMask) -> Result<()> {
        if mask.width() != self.width() || mask.height() != self.height() {
            return Err(RetouchError::InvalidDimensions {
                width: mask.width(),
                height: mask.height(),
            });
        }

        self.state = StrokeState::Idle;
        let overlay = self.overlay;
        for (x, y, px) in self.working.enumerate_pixels_mut() {
            *px = if mask.is_selected(x, y) {
                overlay
            } else {
                Rgba([0, 0, 0, 0])
            };
        }
        self.committed = finalize(&self.working);
        self.revision += 1;
        Ok(())
    }
}

fn clear_buffer(buf: &mut RgbaImage) {
    for px in buf.pixels_mut() {
        *px = Rgba([0, 0, 0, 0]);
    }
}
