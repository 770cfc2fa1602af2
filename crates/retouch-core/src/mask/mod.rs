//! Selection masks.
//!
//! Editing happens in an RGBA working buffer painted with a fixed overlay
//! color; only its alpha channel carries selection state. Finalization copies
//! that alpha into an [`AlphaMask`], the exported artifact.

mod alpha;
mod compositor;
mod raster;

pub use alpha::{finalize, AlphaMask, PixelBounds};
pub use compositor::{DrawTool, MaskCompositor};
