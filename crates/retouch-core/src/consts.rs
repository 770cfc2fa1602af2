/// Lower zoom limit (one canvas pixel shown as 0.1 screen pixels).
pub const DEFAULT_MIN_ZOOM: f32 = 0.1;

/// Upper zoom limit.
pub const DEFAULT_MAX_ZOOM: f32 = 10.0;

/// Fraction of the container the image occupies after fit-to-container.
pub const DEFAULT_FIT_PADDING: f32 = 0.95;

/// Exponent applied per wheel delta unit: `factor = exp(delta * sensitivity)`.
pub const DEFAULT_WHEEL_SENSITIVITY: f32 = 0.005;

/// Zoom at and above which renderers should switch to nearest-neighbour sampling.
pub const DEFAULT_PIXELATED_ZOOM_THRESHOLD: f32 = 2.0;

/// Default brush diameter in canvas pixels.
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// RGB of the working-buffer overlay. Alpha carries the selection.
pub const DEFAULT_OVERLAY_COLOR: [u8; 3] = [255, 48, 96];

/// Width in canvas pixels of the live lasso outline.
pub const DEFAULT_LASSO_FEEDBACK_WIDTH: f32 = 2.0;

/// Smallest crop width/height, as a fraction of the image.
pub const DEFAULT_MIN_CROP_SIZE: f32 = 0.05;

/// Crop handle hit radius in screen pixels.
pub const DEFAULT_HANDLE_SIZE: f32 = 10.0;

/// Pointer travel (screen pixels) below which a press/release pair is a click.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 4.0;

/// Minimum pixel count (w*h) to use Rayon parallelism during mask finalization.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Opaque alpha value for selected mask pixels.
pub const ALPHA_SELECTED: u8 = 255;
