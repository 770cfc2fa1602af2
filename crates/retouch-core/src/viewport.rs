//! Canvas <-> screen transform.
//!
//! One uniform scale (`zoom`) plus a translation (`pan`, the screen position
//! of the canvas origin):
//!
//! ```text
//! screen = canvas * zoom + pan
//! canvas = (screen - pan) / zoom
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ViewportConfig;
use crate::geometry::{Point, Size};

/// View transform snapshot handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub zoom: f32,
    pub pan: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ZERO,
        }
    }
}

impl ViewportState {
    pub fn to_canvas(&self, screen: Point) -> Point {
        (screen - self.pan) / self.zoom
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        canvas * self.zoom + self.pan
    }
}

/// Texture filtering the renderer should use at the current zoom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    Smooth,
    Pixelated,
}

#[derive(Clone, Debug)]
pub struct ViewportTransform {
    state: ViewportState,
    config: ViewportConfig,
}

impl ViewportTransform {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            state: ViewportState::default(),
            config,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn zoom(&self) -> f32 {
        self.state.zoom
    }

    pub fn pan(&self) -> Point {
        self.state.pan
    }

    pub fn to_canvas(&self, screen: Point) -> Point {
        self.state.to_canvas(screen)
    }

    pub fn to_screen(&self, canvas: Point) -> Point {
        self.state.to_screen(canvas)
    }

    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    /// Scale the image to fit `container` (never above 1:1), shrink by the
    /// fit padding, and center it.
    pub fn fit_to_container(&mut self, image: Size, container: Size) {
        if image.is_empty() || container.is_empty() {
            trace!(?image, ?container, "fit skipped for empty size");
            return;
        }

        let scale = (container.width / image.width)
            .min(container.height / image.height)
            .min(1.0)
            * self.config.fit_padding;
        let zoom = scale.clamp(self.config.min_zoom, self.config.max_zoom);

        self.state.zoom = zoom;
        self.state.pan = Point::new(
            (container.width - image.width * zoom) / 2.0,
            (container.height - image.height * zoom) / 2.0,
        );
        debug!(zoom, pan_x = self.state.pan.x, pan_y = self.state.pan.y, "viewport fitted");
    }

    /// Multiply zoom by `factor`, keeping the canvas point under `screen`
    /// fixed. Returns `false` when the clamped zoom is unchanged.
    pub fn zoom_at(&mut self, screen: Point, factor: f32) -> bool {
        if !(factor > 0.0 && factor.is_finite()) || !screen.is_finite() {
            trace!(factor, "zoom ignored");
            return false;
        }

        let new_zoom = (self.state.zoom * factor).clamp(self.config.min_zoom, self.config.max_zoom);
        if new_zoom == self.state.zoom {
            return false;
        }

        let canvas = self.state.to_canvas(screen);
        self.state.zoom = new_zoom;
        self.state.pan = screen - canvas * new_zoom;
        true
    }

    /// Wheel zoom. Positive `delta` zooms in.
    pub fn zoom_by_wheel(&mut self, screen: Point, delta: f32) -> bool {
        self.zoom_at(screen, (delta * self.config.wheel_sensitivity).exp())
    }

    pub fn pan_by(&mut self, delta: Point) {
        if delta.is_finite() {
            self.state.pan += delta;
        }
    }

    pub fn sampling(&self) -> Sampling {
        if self.state.zoom >= self.config.pixelated_zoom_threshold {
            Sampling::Pixelated
        } else {
            Sampling::Smooth
        }
    }

    /// Screen-space top-left and size of an image of `image` pixels.
    pub fn image_screen_rect(&self, image: Size) -> (Point, Size) {
        (
            self.state.pan,
            Size::new(image.width * self.state.zoom, image.height * self.state.zoom),
        )
    }
}
