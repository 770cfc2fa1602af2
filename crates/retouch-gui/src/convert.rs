use image::RgbaImage;
use retouch_core::viewport::Sampling;

/// Convert an RGBA buffer to an egui ColorImage.
pub fn rgba_to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let (w, h) = image.dimensions();
    let pixels = image
        .pixels()
        .map(|p| egui::Color32::from_rgba_unmultiplied(p.0[0], p.0[1], p.0[2], p.0[3]))
        .collect();

    egui::ColorImage {
        size: [w as usize, h as usize],
        pixels,
        source_size: Default::default(),
    }
}

/// Nearest-neighbour once pixels are magnified enough to be seen.
pub fn texture_options(sampling: Sampling) -> egui::TextureOptions {
    match sampling {
        Sampling::Pixelated => egui::TextureOptions::NEAREST,
        Sampling::Smooth => egui::TextureOptions::LINEAR,
    }
}
