use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::Result;
use crate::mask::AlphaMask;

/// Load any format the `image` crate decodes as 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Save a mask as white-on-transparent PNG, or as black/white grayscale
/// for formats without alpha.
pub fn save_mask(mask: &AlphaMask, path: &Path) -> Result<()> {
    match extension(path).as_deref() {
        Some("jpg" | "jpeg" | "bmp") => mask.to_luma_image().save(path)?,
        Some("png") | None => mask
            .to_rgba_image()
            .save_with_format(path, ImageFormat::Png)?,
        _ => mask.to_rgba_image().save(path)?,
    }
    Ok(())
}

/// Save an RGBA image, choosing format from the file extension.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    match extension(path).as_deref() {
        Some("jpg" | "jpeg") => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save(path)?,
        Some("png") | None => image.save_with_format(path, ImageFormat::Png)?,
        _ => image.save(path)?,
    }
    Ok(())
}
