use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BRUSH_SIZE, DEFAULT_CLICK_TOLERANCE, DEFAULT_FIT_PADDING, DEFAULT_HANDLE_SIZE,
    DEFAULT_LASSO_FEEDBACK_WIDTH, DEFAULT_MAX_ZOOM, DEFAULT_MIN_CROP_SIZE, DEFAULT_MIN_ZOOM,
    DEFAULT_OVERLAY_COLOR, DEFAULT_PIXELATED_ZOOM_THRESHOLD, DEFAULT_WHEEL_SENSITIVITY,
};
use crate::crop::AspectRatio;
use crate::error::{RetouchError, Result};

/// Editor settings, loadable from TOML. Every field has a default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub mask: MaskConfig,
    #[serde(default)]
    pub crop: CropConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let v = &self.viewport;
        if !(v.min_zoom > 0.0 && v.min_zoom.is_finite()) {
            return Err(invalid(format!("viewport.min_zoom must be > 0 (got {})", v.min_zoom)));
        }
        if !(v.max_zoom > v.min_zoom && v.max_zoom.is_finite()) {
            return Err(invalid(format!(
                "viewport.max_zoom ({}) must exceed min_zoom ({})",
                v.max_zoom, v.min_zoom
            )));
        }
        if !(v.fit_padding > 0.0 && v.fit_padding <= 1.0) {
            return Err(invalid(format!(
                "viewport.fit_padding must be in (0, 1] (got {})",
                v.fit_padding
            )));
        }
        if !v.wheel_sensitivity.is_finite() {
            return Err(invalid("viewport.wheel_sensitivity must be finite".into()));
        }
        if !(self.mask.brush_size > 0.0 && self.mask.brush_size.is_finite()) {
            return Err(invalid(format!(
                "mask.brush_size must be > 0 (got {})",
                self.mask.brush_size
            )));
        }
        if !(self.mask.lasso_feedback_width > 0.0) {
            return Err(invalid("mask.lasso_feedback_width must be > 0".into()));
        }
        if !(self.crop.min_size > 0.0 && self.crop.min_size < 1.0) {
            return Err(invalid(format!(
                "crop.min_size must be in (0, 1) (got {})",
                self.crop.min_size
            )));
        }
        if !(self.crop.handle_size > 0.0) {
            return Err(invalid("crop.handle_size must be > 0".into()));
        }
        if !(self.input.click_tolerance >= 0.0) {
            return Err(invalid("input.click_tolerance must be >= 0".into()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> RetouchError {
    RetouchError::InvalidConfig(msg)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f32,
    /// Fraction of the container used when fitting the image.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f32,
    #[serde(default = "default_wheel_sensitivity")]
    pub wheel_sensitivity: f32,
    /// Zoom at which renderers switch to nearest-neighbour sampling.
    #[serde(default = "default_pixelated_zoom_threshold")]
    pub pixelated_zoom_threshold: f32,
}

fn default_min_zoom() -> f32 {
    DEFAULT_MIN_ZOOM
}
fn default_max_zoom() -> f32 {
    DEFAULT_MAX_ZOOM
}
fn default_fit_padding() -> f32 {
    DEFAULT_FIT_PADDING
}
fn default_wheel_sensitivity() -> f32 {
    DEFAULT_WHEEL_SENSITIVITY
}
fn default_pixelated_zoom_threshold() -> f32 {
    DEFAULT_PIXELATED_ZOOM_THRESHOLD
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            pixelated_zoom_threshold: DEFAULT_PIXELATED_ZOOM_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Brush diameter in canvas pixels.
    #[serde(default = "default_brush_size")]
    pub brush_size: f32,
    #[serde(default = "default_overlay_color")]
    pub overlay_color: [u8; 3],
    #[serde(default = "default_lasso_feedback_width")]
    pub lasso_feedback_width: f32,
}

fn default_brush_size() -> f32 {
    DEFAULT_BRUSH_SIZE
}
fn default_overlay_color() -> [u8; 3] {
    DEFAULT_OVERLAY_COLOR
}
fn default_lasso_feedback_width() -> f32 {
    DEFAULT_LASSO_FEEDBACK_WIDTH
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            brush_size: DEFAULT_BRUSH_SIZE,
            overlay_color: DEFAULT_OVERLAY_COLOR,
            lasso_feedback_width: DEFAULT_LASSO_FEEDBACK_WIDTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropConfig {
    /// Minimum normalized width/height.
    #[serde(default = "default_min_crop_size")]
    pub min_size: f32,
    /// Handle hit size in screen pixels.
    #[serde(default = "default_handle_size")]
    pub handle_size: f32,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

fn default_min_crop_size() -> f32 {
    DEFAULT_MIN_CROP_SIZE
}
fn default_handle_size() -> f32 {
    DEFAULT_HANDLE_SIZE
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_CROP_SIZE,
            handle_size: DEFAULT_HANDLE_SIZE,
            aspect_ratio: AspectRatio::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Screen-pixel travel under which press + release counts as a click.
    #[serde(default = "default_click_tolerance")]
    pub click_tolerance: f32,
}

fn default_click_tolerance() -> f32 {
    DEFAULT_CLICK_TOLERANCE
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
        }
    }
}
