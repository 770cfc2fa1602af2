//! Normalized crop rectangle editing.
//!
//! All geometry here is normalized to the image: `(0, 0)` is the top-left
//! corner and `(1, 1)` the bottom-right, whatever the pixel dimensions.

mod aspect;
mod editor;
mod handle;
mod region;
mod resize;

pub use aspect::AspectRatio;
pub use editor::CropEditor;
pub use handle::{handle_at, Handle};
pub use region::{crop_image, CropRegion, PixelRect};
pub use resize::{clamp_region, fit_to_ratio, resize_free, resize_locked};
