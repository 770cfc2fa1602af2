use image::Rgba;

use retouch_core::config::MaskConfig;
use retouch_core::geometry::Point;
use retouch_core::io::{load_image, save_image, save_mask};
use retouch_core::mask::{AlphaMask, DrawTool, MaskCompositor};

mod common;

fn sample_mask() -> AlphaMask {
    let mut mc = MaskCompositor::new(32, 24, &MaskConfig::default());
    mc.begin_stroke(Point::new(16.0, 12.0), DrawTool::Brush);
    mc.end_stroke();
    mc.mask().cloned().unwrap()
}

#[test]
fn test_image_png_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    let image = common::coordinate_image(40, 30);

    save_image(&image, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded, image);
}

#[test]
fn test_mask_png_keeps_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.png");
    let mask = sample_mask();

    save_mask(&mask, &path).unwrap();
    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.get_pixel(16, 12), &Rgba([255, 255, 255, 255]));
    assert_eq!(loaded.get_pixel(0, 0).0[3], 0);
    assert_eq!(AlphaMask::from_rgba_image(&loaded), Some(mask));
}

#[test]
fn test_mask_bmp_is_grayscale() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.bmp");
    save_mask(&sample_mask(), &path).unwrap();

    let gray = image::open(&path).unwrap().to_luma8();
    assert_eq!(gray.get_pixel(16, 12).0[0], 255);
    assert_eq!(gray.get_pixel(0, 0).0[0], 0);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("nope.png")).is_err());
}
