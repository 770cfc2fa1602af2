use retouch_core::crop::{CropRegion, Handle};
use retouch_core::geometry::Size;

const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const HANDLE_SIZE: f32 = 8.0;

/// Draw the crop overlay: dimmed surround, border, handles and pixel size.
pub fn draw(painter: &egui::Painter, region: &CropRegion, img_rect: egui::Rect, image_size: Size) {
    let crop_screen = egui::Rect::from_min_size(
        egui::pos2(
            img_rect.left() + region.x * img_rect.width(),
            img_rect.top() + region.y * img_rect.height(),
        ),
        egui::vec2(region.width * img_rect.width(), region.height * img_rect.height()),
    );

    draw_dim_regions(painter, img_rect, crop_screen);
    draw_crop_border(painter, crop_screen);
    draw_handles(painter, crop_screen);
    draw_dimensions_label(painter, region, crop_screen, image_size);
}

fn draw_dim_regions(painter: &egui::Painter, img_rect: egui::Rect, crop_screen: egui::Rect) {
    let dim_color = egui::Color32::from_black_alpha(140);

    // Top
    painter.rect_filled(
        egui::Rect::from_min_max(img_rect.left_top(), egui::pos2(img_rect.right(), crop_screen.top())),
        0.0,
        dim_color,
    );
    // Bottom
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(img_rect.left(), crop_screen.bottom()), img_rect.right_bottom()),
        0.0,
        dim_color,
    );
    // Left (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(img_rect.left(), crop_screen.top()),
            egui::pos2(crop_screen.left(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
    // Right (between top and bottom)
    painter.rect_filled(
        egui::Rect::from_min_max(
            egui::pos2(crop_screen.right(), crop_screen.top()),
            egui::pos2(img_rect.right(), crop_screen.bottom()),
        ),
        0.0,
        dim_color,
    );
}

fn draw_crop_border(painter: &egui::Painter, crop_screen: egui::Rect) {
    painter.rect_stroke(
        crop_screen,
        0.0,
        egui::Stroke::new(1.5, BORDER_COLOR),
        egui::epaint::StrokeKind::Outside,
    );
}

fn draw_handles(painter: &egui::Painter, crop_screen: egui::Rect) {
    let min = retouch_core::geometry::Point::new(crop_screen.left(), crop_screen.top());
    let size = Size::new(crop_screen.width(), crop_screen.height());
    for handle in Handle::CORNERS.into_iter().chain(Handle::EDGES) {
        let p = handle.position(min, size);
        let square = egui::Rect::from_center_size(egui::pos2(p.x, p.y), egui::Vec2::splat(HANDLE_SIZE));
        painter.rect_filled(square, 0.0, egui::Color32::from_black_alpha(180));
        painter.rect_stroke(
            square,
            0.0,
            egui::Stroke::new(1.0, BORDER_COLOR),
            egui::epaint::StrokeKind::Inside,
        );
    }
}

fn draw_dimensions_label(painter: &egui::Painter, region: &CropRegion, crop_screen: egui::Rect, image_size: Size) {
    let px = region.to_pixels(image_size.width as u32, image_size.height as u32);
    let label = format!("{}x{}", px.width, px.height);
    let label_pos = egui::pos2(crop_screen.right() - 4.0, crop_screen.bottom() + 4.0);
    painter.text(
        label_pos,
        egui::Align2::RIGHT_TOP,
        label,
        egui::FontId::proportional(12.0),
        BORDER_COLOR,
    );
}
