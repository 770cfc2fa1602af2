//! One editing session over one base image.
//!
//! [`EditSession`] owns the viewport, mask, crop and annotation components
//! and feeds them raw host events through the input router. Screen
//! coordinates are relative to the top-left of the host's viewport
//! container.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, trace, warn};

use crate::annotation::AnnotationLayer;
use crate::config::EditorConfig;
use crate::crop::{crop_image, AspectRatio, CropEditor, CropRegion};
use crate::cursor::CursorHint;
use crate::error::{RetouchError, Result};
use crate::geometry::{Point, Size};
use crate::input::{route_pointer_down, Gesture, InputRouter, Key, Mode, Target};
use crate::mask::{AlphaMask, MaskCompositor};
use crate::viewport::{Sampling, ViewportState, ViewportTransform};

/// Result handed to the host when a gesture completes.
#[derive(Clone, Debug, PartialEq)]
pub enum Commit {
    /// Finalized selection; `None` when nothing is selected.
    Mask(Option<AlphaMask>),
    Crop(CropRegion),
    /// Id of a freshly placed annotation.
    Annotation(u64),
}

pub struct EditSession {
    config: EditorConfig,
    image: Option<RgbaImage>,
    container: Size,
    viewport: ViewportTransform,
    mask: Option<MaskCompositor>,
    /// Revisions consumed by compositors that have since been replaced.
    mask_revision_base: u64,
    crop: Option<CropEditor>,
    annotations: AnnotationLayer,
    router: InputRouter,
    brush_size: f32,
    aspect: AspectRatio,
    /// Last pointer position in screen pixels.
    hover: Option<Point>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            viewport: ViewportTransform::new(config.viewport.clone()),
            router: InputRouter::new(&config.input),
            brush_size: config.mask.brush_size,
            aspect: config.crop.aspect_ratio,
            image: None,
            container: Size::default(),
            mask: None,
            mask_revision_base: 0,
            crop: None,
            annotations: AnnotationLayer::new(),
            hover: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replace the base image. Resets the viewport, mask and crop state;
    /// annotations are kept. On error nothing changes.
    pub fn load_image(&mut self, image: RgbaImage) -> Result<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RetouchError::InvalidDimensions { width, height });
        }

        if self.router.is_busy() {
            debug!("gesture dropped by image load");
            self.router.finish();
        }

        self.image = Some(image);
        let mode = self.router.mode();
        self.reset_mask(mode.is_draw());
        self.crop = None;
        if mode == Mode::Crop {
            self.crop = self.new_crop_editor();
        }
        self.viewport.reset();
        self.fit_view();

        info!(width, height, "image loaded");
        Ok(())
    }

    pub fn load_image_path(&mut self, path: &Path) -> Result<()> {
        let image = crate::io::load_image(path)?;
        self.load_image(image)
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image.as_ref().map(|img| Size::from(img.dimensions()))
    }

    pub fn container_size(&self) -> Size {
        self.container
    }

    /// Record the host container size. The view is fitted the first time a
    /// usable size arrives after an image load; later resizes keep the
    /// current zoom and pan.
    pub fn set_container_size(&mut self, size: Size) {
        let first = self.container.is_empty() && !size.is_empty();
        self.container = size;
        if first {
            self.fit_view();
        }
    }

    pub fn fit_view(&mut self) {
        if let Some(image) = self.image_size() {
            self.viewport.fit_to_container(image, self.container);
        }
    }

    pub fn mode(&self) -> Mode {
        self.router.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        let current = self.router.mode();
        if mode == current {
            return;
        }
        if self.router.is_busy() {
            warn!(from = %current, to = %mode, "mode switched during a gesture, completing it");
            self.complete_gesture();
        }

        if current == Mode::Crop {
            self.crop = None;
        }
        if mode.is_draw() && !current.is_draw() {
            self.reset_mask(true);
        }
        if mode == Mode::Crop {
            self.crop = self.new_crop_editor();
        }

        self.router.set_mode(mode);
        debug!(%mode, "mode set");
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    /// Non-positive or non-finite sizes are ignored.
    pub fn set_brush_size(&mut self, size: f32) {
        if !(size > 0.0 && size.is_finite()) {
            trace!(size, "brush size ignored");
            return;
        }
        self.brush_size = size;
        if let Some(mask) = &mut self.mask {
            mask.set_brush_size(size);
        }
    }

    pub fn crop_aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    pub fn set_crop_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        if let Some(crop) = &mut self.crop {
            crop.set_aspect_ratio(aspect);
        }
    }

    pub fn on_pointer_down(&mut self, screen: Point) -> Target {
        self.hover = Some(screen);
        if self.image.is_none() || !screen.is_finite() {
            trace!("pointer down without image ignored");
            return Target::None;
        }
        if self.router.is_busy() {
            warn!("pointer down during a gesture, completing it");
            self.complete_gesture();
        }

        let canvas = self.viewport.to_canvas(screen);
        let zoom = self.viewport.zoom();
        let crop_handle = self.crop.as_ref().and_then(|c| c.handle_at(canvas, zoom));
        let ctx = self.router.context(crop_handle, self.annotations.pending().is_some());

        let target = route_pointer_down(&ctx);
        match target {
            Target::Mask(tool) => {
                if self.mask.is_none() {
                    self.reset_mask(true);
                }
                if let Some(mask) = &mut self.mask {
                    mask.begin_stroke(canvas, tool);
                }
            }
            Target::Crop(_) => {
                if let Some(crop) = &mut self.crop {
                    crop.begin_drag(canvas, zoom);
                }
            }
            Target::Pan | Target::Annotation | Target::None => {}
        }
        self.router.begin(target, screen);
        target
    }

    pub fn on_pointer_move(&mut self, screen: Point) {
        if !screen.is_finite() {
            return;
        }
        self.hover = Some(screen);

        match self.router.gesture() {
            Gesture::Panning { .. } => {
                if let Some(delta) = self.router.track_pan(screen) {
                    self.viewport.pan_by(delta);
                }
            }
            Gesture::Stroke => {
                let canvas = self.viewport.to_canvas(screen);
                if let Some(mask) = &mut self.mask {
                    mask.continue_stroke(canvas);
                }
            }
            Gesture::CropDrag => {
                let canvas = self.viewport.to_canvas(screen);
                if let Some(crop) = &mut self.crop {
                    crop.drag_to(canvas);
                }
            }
            Gesture::Click { .. } => self.router.track_click(screen),
            Gesture::Idle => {}
        }
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Option<Commit> {
        if self.router.is_busy() {
            self.on_pointer_move(screen);
        }
        self.complete_gesture()
    }

    /// Same as a release at the last known position.
    pub fn on_pointer_leave(&mut self) -> Option<Commit> {
        self.hover = None;
        self.complete_gesture()
    }

    /// Zoom around `screen`. Positive `delta` zooms in.
    pub fn on_wheel(&mut self, screen: Point, delta: f32) -> bool {
        self.viewport.zoom_by_wheel(screen, delta)
    }

    pub fn on_key_down(&mut self, key: &Key) {
        self.router.key_down(key);
        if *key == Key::Escape {
            self.cancel_gesture();
        }
    }

    pub fn on_key_up(&mut self, key: &Key) {
        self.router.key_up(key);
    }

    fn complete_gesture(&mut self) -> Option<Commit> {
        match self.router.finish() {
            Gesture::Idle | Gesture::Panning { .. } => None,
            Gesture::Stroke => {
                let mask = self.mask.as_mut()?;
                mask.end_stroke();
                Some(Commit::Mask(mask.mask().cloned()))
            }
            Gesture::CropDrag => self.crop.as_mut()?.end_drag().map(Commit::Crop),
            Gesture::Click { moved: true, .. } => None,
            Gesture::Click { down, moved: false } => {
                let image = self.image_size()?;
                let canvas = self.viewport.to_canvas(down);
                self.annotations.add_at(canvas, image).map(Commit::Annotation)
            }
        }
    }

    /// Escape: drop the gesture without committing. With no gesture open it
    /// ends annotation editing instead.
    fn cancel_gesture(&mut self) {
        match self.router.finish() {
            Gesture::Stroke => {
                if let Some(mask) = &mut self.mask {
                    mask.cancel_stroke();
                }
            }
            Gesture::CropDrag => {
                if let Some(crop) = &mut self.crop {
                    crop.cancel_drag();
                }
            }
            Gesture::Idle => {
                self.annotations.finish_editing();
            }
            Gesture::Panning { .. } | Gesture::Click { .. } => {}
        }
    }

    pub fn mask(&self) -> Option<&AlphaMask> {
        self.mask.as_ref().and_then(MaskCompositor::mask)
    }

    pub fn mask_compositor(&self) -> Option<&MaskCompositor> {
        self.mask.as_ref()
    }

    /// Live overlay for renderers; `None` outside draw modes before any
    /// drawing.
    pub fn working_buffer(&self) -> Option<&RgbaImage> {
        self.mask.as_ref().map(MaskCompositor::working_buffer)
    }

    /// Monotonic counter that changes whenever the working buffer does.
    pub fn mask_revision(&self) -> u64 {
        self.mask_revision_base + self.mask.as_ref().map_or(0, MaskCompositor::revision)
    }

    pub fn clear_mask(&mut self) {
        if let Some(mask) = &mut self.mask {
            mask.clear();
        }
    }

    pub fn crop_region(&self) -> Option<CropRegion> {
        self.crop.as_ref().map(CropEditor::region)
    }

    pub fn crop_editor(&self) -> Option<&CropEditor> {
        self.crop.as_ref()
    }

    /// Cut the current crop region (or the whole image outside crop mode)
    /// out of the base image.
    pub fn apply_crop(&self) -> Result<RgbaImage> {
        let image = self.image.as_ref().ok_or(RetouchError::NoImage)?;
        let region = self.crop_region().unwrap_or(CropRegion::FULL);
        Ok(crop_image(image, &region))
    }

    pub fn annotations(&self) -> &AnnotationLayer {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationLayer {
        &mut self.annotations
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn viewport_transform(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn sampling(&self) -> Sampling {
        self.viewport.sampling()
    }

    pub fn gesture(&self) -> Gesture {
        self.router.gesture()
    }

    pub fn cursor(&self) -> CursorHint {
        if matches!(self.router.gesture(), Gesture::Panning { .. }) {
            return CursorHint::Grabbing;
        }
        if self.router.space_held() {
            return CursorHint::Grab;
        }
        match self.router.mode() {
            Mode::Draw(_) => CursorHint::Crosshair,
            Mode::Crop => match (&self.crop, self.hover) {
                (Some(crop), Some(screen)) => crop.cursor(self.viewport.to_canvas(screen), self.viewport.zoom()),
                _ => CursorHint::Default,
            },
            Mode::Annotate => CursorHint::Default,
        }
    }

    /// Swap in an empty compositor (or none), keeping `mask_revision`
    /// monotonic.
    fn reset_mask(&mut self, create: bool) {
        if let Some(old) = self.mask.take() {
            self.mask_revision_base += old.revision() + 1;
        }
        if !create {
            return;
        }
        if let Some(image) = &self.image {
            let mut mask = MaskCompositor::new(image.width(), image.height(), &self.config.mask);
            mask.set_brush_size(self.brush_size);
            self.mask = Some(mask);
        }
    }

    fn new_crop_editor(&self) -> Option<CropEditor> {
        let image = self.image_size()?;
        Some(CropEditor::new(image, &self.config.crop, self.aspect))
    }
}
