use image::{GrayImage, Luma, Rgba, RgbaImage};
use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{ALPHA_SELECTED, PARALLEL_PIXEL_THRESHOLD};

/// Inclusive pixel bounds of a selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Exported binary selection: one alpha byte per image pixel.
///
/// Never empty: finalization turns an all-transparent buffer into `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaMask {
    /// Row-major, shape = (height, width).
    alpha: Array2<u8>,
}

impl AlphaMask {
    pub fn width(&self) -> u32 {
        self.alpha.ncols() as u32
    }

    pub fn height(&self) -> u32 {
        self.alpha.nrows() as u32
    }

    pub fn alpha(&self) -> &Array2<u8> {
        &self.alpha
    }

    /// Alpha at `(x, y)`; 0 outside the mask.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.alpha
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        self.get(x, y) > 0
    }

    pub fn selected_count(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0).count()
    }

    pub fn bounds(&self) -> Option<PixelBounds> {
        let mut bounds: Option<PixelBounds> = None;
        for ((row, col), &a) in self.alpha.indexed_iter() {
            if a == 0 {
                continue;
            }
            let (x, y) = (col as u32, row as u32);
            bounds = Some(match bounds {
                None => PixelBounds {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => PixelBounds {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
        bounds
    }

    /// White-on-transparent RGBA image carrying only alpha.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            Rgba([255, 255, 255, self.get(x, y)])
        })
    }

    /// Black/white image for consumers that cannot read alpha.
    pub fn to_luma_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            if self.is_selected(x, y) {
                Luma([ALPHA_SELECTED])
            } else {
                Luma([0])
            }
        })
    }

    /// Read a previously exported mask back. Any RGBA buffer works; only
    /// alpha is kept.
    pub fn from_rgba_image(image: &RgbaImage) -> Option<Self> {
        finalize(image)
    }
}

/// Copy the working buffer's alpha channel into an [`AlphaMask`].
///
/// Returns `None` when no pixel has non-zero alpha.
pub fn finalize(working: &RgbaImage) -> Option<AlphaMask> {
    let (w, h) = working.dimensions();
    let raw = working.as_raw();
    let parallel = (w as usize) * (h as usize) >= PARALLEL_PIXEL_THRESHOLD;

    let alpha: Vec<u8> = if parallel {
        raw.par_chunks_exact(4).map(|px| px[3]).collect()
    } else {
        raw.chunks_exact(4).map(|px| px[3]).collect()
    };

    let any_selected = if parallel {
        alpha.par_iter().any(|&a| a > 0)
    } else {
        alpha.iter().any(|&a| a > 0)
    };
    if !any_selected {
        return None;
    }

    let alpha = Array2::from_shape_vec((h as usize, w as usize), alpha).ok()?;
    Some(AlphaMask { alpha })
}
