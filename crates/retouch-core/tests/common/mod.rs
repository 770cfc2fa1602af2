#![allow(dead_code)]

use image::{Rgba, RgbaImage};

use retouch_core::config::EditorConfig;
use retouch_core::geometry::{Point, Size};
use retouch_core::session::EditSession;

/// Solid mid-gray RGBA image.
pub fn gray_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([128, 128, 128, 255]))
}

/// Image whose red channel encodes x and green channel encodes y, so crops
/// can be checked by reading the corner pixels.
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

/// Config whose fit leaves an image the size of its container at zoom 1.
pub fn identity_config() -> EditorConfig {
    let mut config = EditorConfig::default();
    config.viewport.fit_padding = 1.0;
    config
}

/// Session with a loaded image where screen and canvas coordinates coincide
/// (zoom 1, pan 0).
pub fn identity_session(width: u32, height: u32) -> EditSession {
    let mut session = EditSession::new(identity_config());
    session.set_container_size(Size::new(width as f32, height as f32));
    session
        .load_image(gray_image(width, height))
        .expect("load test image");
    session
}

pub fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Press, move through `path`, release at its last point.
pub fn drag(session: &mut EditSession, path: &[Point]) -> Option<retouch_core::session::Commit> {
    let (first, rest) = path.split_first().expect("non-empty path");
    session.on_pointer_down(*first);
    for q in rest {
        session.on_pointer_move(*q);
    }
    let last = rest.last().copied().unwrap_or(*first);
    session.on_pointer_up(last)
}
