use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Crop rectangle normalized to `[0, 1]` on both axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CropRegion {
    /// The whole image.
    pub const FULL: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Whether the region satisfies the bounds and minimum-size invariants,
    /// allowing `tolerance` of float slack.
    pub fn is_valid(&self, min_size: f32, tolerance: f32) -> bool {
        self.x >= -tolerance
            && self.y >= -tolerance
            && self.right() <= 1.0 + tolerance
            && self.bottom() <= 1.0 + tolerance
            && self.width >= min_size - tolerance
            && self.height >= min_size - tolerance
    }

    /// Pixel aspect ratio (width / height) on an image of `image` pixels.
    pub fn aspect(&self, image: Size) -> f32 {
        (self.width * image.width) / (self.height * image.height)
    }

    /// Top-left corner and size in canvas pixels.
    pub fn to_canvas(&self, image: Size) -> (Point, Size) {
        (
            Point::new(self.x * image.width, self.y * image.height),
            Size::new(self.width * image.width, self.height * image.height),
        )
    }

    /// Round to whole pixels, staying inside the image and at least 1x1.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelRect {
        let (x, width) = round_axis(self.x, self.width, image_width);
        let (y, height) = round_axis(self.y, self.height, image_height);
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn round_axis(start: f32, extent: f32, size: u32) -> (u32, u32) {
    if size == 0 {
        return (0, 0);
    }
    let s = size as f32;
    let begin = (start * s).round().clamp(0.0, s - 1.0) as u32;
    let end = ((start + extent) * s).round().clamp(0.0, s) as u32;
    (begin, end.saturating_sub(begin).max(1))
}

/// Crop rectangle in whole image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Cut `region` out of `image`.
pub fn crop_image(image: &RgbaImage, region: &CropRegion) -> RgbaImage {
    let r = region.to_pixels(image.width(), image.height());
    image::imageops::crop_imm(image, r.x, r.y, r.width, r.height).to_image()
}
