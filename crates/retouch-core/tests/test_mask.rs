use image::{Rgba, RgbaImage};

use retouch_core::config::MaskConfig;
use retouch_core::geometry::Point;
use retouch_core::mask::{finalize, AlphaMask, DrawTool, MaskCompositor, PixelBounds};

fn compositor(width: u32, height: u32, brush: f32) -> MaskCompositor {
    let config = MaskConfig {
        brush_size: brush,
        ..MaskConfig::default()
    };
    MaskCompositor::new(width, height, &config)
}

fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

#[test]
fn test_new_compositor_has_no_mask() {
    let mc = compositor(32, 32, 10.0);
    assert!(mc.mask().is_none());
    assert!(!mc.is_drawing());
    assert_eq!(mc.working_buffer().dimensions(), (32, 32));
}

#[test]
fn test_brush_stroke_coverage() {
    let mut mc = compositor(200, 200, 20.0);
    mc.begin_stroke(p(100.0, 100.0), DrawTool::Brush);
    mc.continue_stroke(p(150.0, 100.0));
    assert!(mc.end_stroke());

    let mask = mc.mask().expect("stroke selects pixels");
    assert_eq!(
        mask.bounds(),
        Some(PixelBounds {
            min_x: 90,
            min_y: 90,
            max_x: 159,
            max_y: 109,
        })
    );
    assert!(mask.is_selected(125, 100));
    assert!(!mask.is_selected(125, 115));
}

#[test]
fn test_brush_stamping_is_idempotent() {
    let mut mc = compositor(64, 64, 12.0);
    mc.begin_stroke(p(20.0, 30.0), DrawTool::Brush);
    mc.continue_stroke(p(40.0, 35.0));
    mc.end_stroke();
    let once = mc.mask().cloned();

    mc.begin_stroke(p(20.0, 30.0), DrawTool::Brush);
    mc.continue_stroke(p(40.0, 35.0));
    mc.end_stroke();

    assert_eq!(mc.mask().cloned(), once);
}

#[test]
fn test_brush_strokes_accumulate() {
    let mut mc = compositor(64, 64, 6.0);
    mc.begin_stroke(p(10.0, 10.0), DrawTool::Brush);
    mc.end_stroke();
    let first = mc.mask().map(AlphaMask::selected_count).unwrap_or(0);

    mc.begin_stroke(p(50.0, 50.0), DrawTool::Brush);
    mc.end_stroke();
    let mask = mc.mask().expect("mask");

    assert_eq!(mask.selected_count(), first * 2);
    assert!(mask.is_selected(10, 10));
    assert!(mask.is_selected(50, 50));
}

#[test]
fn test_lasso_bounds_match_polygon() {
    let mut mc = compositor(64, 64, 10.0);
    mc.begin_stroke(p(10.0, 10.0), DrawTool::Lasso);
    mc.continue_stroke(p(50.0, 10.0));
    mc.continue_stroke(p(50.0, 40.0));
    mc.continue_stroke(p(10.0, 40.0));
    assert_eq!(mc.lasso_vertices().len(), 4);
    mc.end_stroke();

    let mask = mc.mask().expect("lasso selects pixels");
    let b = mask.bounds().expect("bounds");
    assert!((b.min_x as i32 - 10).abs() <= 1);
    assert!((b.min_y as i32 - 10).abs() <= 1);
    assert!((b.max_x as i32 - 50).abs() <= 1);
    assert!((b.max_y as i32 - 40).abs() <= 1);
    assert_eq!(mask.selected_count(), 40 * 30);
}

#[test]
fn test_lasso_replaces_previous_selection() {
    let mut mc = compositor(64, 64, 10.0);
    mc.begin_stroke(p(5.0, 5.0), DrawTool::Brush);
    mc.end_stroke();
    assert!(mc.mask().expect("brush").is_selected(5, 5));

    mc.begin_stroke(p(30.0, 30.0), DrawTool::Lasso);
    mc.continue_stroke(p(60.0, 30.0));
    mc.continue_stroke(p(45.0, 60.0));
    mc.end_stroke();

    let mask = mc.mask().expect("lasso");
    assert!(!mask.is_selected(5, 5));
    assert!(mask.is_selected(45, 40));
}

#[test]
fn test_short_lasso_leaves_mask_unchanged() {
    let mut mc = compositor(64, 64, 10.0);
    mc.begin_stroke(p(20.0, 20.0), DrawTool::Brush);
    mc.end_stroke();
    let before = mc.mask().cloned();

    mc.begin_stroke(p(40.0, 40.0), DrawTool::Lasso);
    mc.continue_stroke(p(50.0, 45.0));
    mc.end_stroke();

    assert_eq!(mc.mask().cloned(), before);
}

#[test]
fn test_self_intersecting_lasso_fills_core() {
    // Pentagram: the inner pentagon has winding number 2 and stays selected.
    let mut mc = compositor(100, 100, 10.0);
    let star = [
        p(50.0, 5.0),
        p(79.0, 95.0),
        p(2.0, 40.0),
        p(98.0, 40.0),
        p(21.0, 95.0),
    ];
    mc.begin_stroke(star[0], DrawTool::Lasso);
    for v in &star[1..] {
        mc.continue_stroke(*v);
    }
    mc.end_stroke();

    let mask = mc.mask().expect("star");
    assert!(mask.is_selected(50, 55));
    assert!(mask.is_selected(50, 20));
}

#[test]
fn test_idle_calls_are_ignored() {
    let mut mc = compositor(16, 16, 4.0);
    let rev = mc.revision();
    mc.continue_stroke(p(5.0, 5.0));
    assert!(!mc.end_stroke());
    assert!(!mc.cancel_stroke());
    assert_eq!(mc.revision(), rev);
    assert!(mc.mask().is_none());
}

#[test]
fn test_cancel_restores_buffer() {
    let mut mc = compositor(32, 32, 8.0);
    mc.begin_stroke(p(8.0, 8.0), DrawTool::Brush);
    mc.end_stroke();
    let committed = mc.mask().cloned();
    let buffer = mc.working_buffer().clone();

    mc.begin_stroke(p(24.0, 24.0), DrawTool::Brush);
    mc.continue_stroke(p(28.0, 20.0));
    assert!(mc.cancel_stroke());

    assert_eq!(mc.working_buffer(), &buffer);
    assert_eq!(mc.mask().cloned(), committed);
}

#[test]
fn test_begin_while_drawing_commits_open_stroke() {
    let mut mc = compositor(32, 32, 6.0);
    mc.begin_stroke(p(5.0, 5.0), DrawTool::Brush);
    mc.begin_stroke(p(25.0, 25.0), DrawTool::Brush);
    assert!(mc.mask().expect("first stroke committed").is_selected(5, 5));
    mc.end_stroke();
    assert!(mc.mask().expect("both").is_selected(25, 25));
}

#[test]
fn test_clear_removes_selection() {
    let mut mc = compositor(32, 32, 6.0);
    mc.begin_stroke(p(5.0, 5.0), DrawTool::Brush);
    mc.end_stroke();
    let rev = mc.revision();

    mc.clear();
    assert!(mc.mask().is_none());
    assert!(mc.revision() > rev);
    assert!(mc.working_buffer().pixels().all(|px| px.0[3] == 0));
}

#[test]
fn test_working_buffer_alpha_is_binary() {
    let mut mc = compositor(40, 40, 9.5);
    mc.begin_stroke(p(3.3, 7.7), DrawTool::Brush);
    mc.continue_stroke(p(33.1, 21.9));
    mc.end_stroke();
    assert!(mc
        .working_buffer()
        .pixels()
        .all(|px| px.0[3] == 0 || px.0[3] == 255));
}

#[test]
fn test_finalize_empty_buffer_is_none() {
    let buf = RgbaImage::new(300, 300);
    assert!(finalize(&buf).is_none());
}

#[test]
fn test_finalize_large_buffer_matches_alpha() {
    // Above the parallel threshold.
    let mut buf = RgbaImage::new(400, 300);
    buf.put_pixel(399, 299, Rgba([1, 2, 3, 255]));
    buf.put_pixel(0, 0, Rgba([1, 2, 3, 255]));

    let mask = finalize(&buf).expect("two pixels");
    assert_eq!(mask.selected_count(), 2);
    assert_eq!(mask.get(399, 299), 255);
    assert_eq!(mask.get(1, 0), 0);
}

#[test]
fn test_mask_image_exports() {
    let mut mc = compositor(16, 16, 4.0);
    mc.begin_stroke(p(8.0, 8.0), DrawTool::Brush);
    mc.end_stroke();
    let mask = mc.mask().expect("mask");

    let rgba = mask.to_rgba_image();
    assert_eq!(rgba.get_pixel(8, 8).0, [255, 255, 255, 255]);
    assert_eq!(rgba.get_pixel(0, 0).0[3], 0);

    let luma = mask.to_luma_image();
    assert_eq!(luma.get_pixel(8, 8).0[0], 255);
    assert_eq!(luma.get_pixel(0, 0).0[0], 0);

    assert_eq!(AlphaMask::from_rgba_image(&rgba).as_ref(), Some(mask));
}

#[test]
fn test_load_mask_rejects_wrong_size() {
    let mut other = compositor(8, 8, 4.0);
    other.begin_stroke(p(4.0, 4.0), DrawTool::Brush);
    other.end_stroke();
    let mask = other.mask().cloned().expect("mask");

    let mut mc = compositor(16, 16, 4.0);
    assert!(mc.load_mask(&mask).is_err());

    let mut same = compositor(8, 8, 4.0);
    same.load_mask(&mask).expect("same size");
    assert_eq!(same.mask(), Some(&mask));
}
