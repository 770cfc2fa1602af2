use retouch_core::cursor::CursorHint;
use retouch_core::geometry::{Point, Size};
use retouch_core::input::{Gesture, Key};

use crate::app::RetouchApp;
use crate::panels::crop_overlay;

const MARKER_RADIUS: f32 = 6.0;

pub fn show(ctx: &egui::Context, app: &mut RetouchApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let (Some(image_size), Some(texture_id)) = (
            app.session.image_size(),
            app.textures.image.as_ref().map(egui::TextureHandle::id),
        ) else {
            show_placeholder(ui);
            return;
        };

        app.session.set_container_size(Size::new(rect.width(), rect.height()));
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

        handle_keys(ctx, app);
        handle_zoom(ui, &response, app, rect);
        handle_pointer(ui, &response, app, rect);

        let img_rect = image_rect(app, rect, image_size);
        let painter = ui.painter_at(rect);
        draw_image(&painter, texture_id, img_rect, egui::Color32::WHITE);
        if let Some(overlay) = &app.textures.overlay {
            draw_image(&painter, overlay.id(), img_rect, egui::Color32::from_white_alpha(128));
        }
        if let Some(region) = app.session.crop_region() {
            crop_overlay::draw(&painter, &region, img_rect, image_size);
        }
        draw_annotations(&painter, app, img_rect);

        if response.hovered() || !matches!(app.session.gesture(), Gesture::Idle) {
            ctx.set_cursor_icon(cursor_icon(app.session.cursor()));
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Screen position relative to the viewport's top-left corner.
fn local(pos: egui::Pos2, rect: egui::Rect) -> Point {
    Point::new(pos.x - rect.min.x, pos.y - rect.min.y)
}

fn handle_keys(ctx: &egui::Context, app: &mut RetouchApp) {
    let (space_down, space_up, escape) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::Space),
            i.key_released(egui::Key::Space),
            i.key_pressed(egui::Key::Escape),
        )
    });

    // Releases always reach the session so a held Space never sticks.
    if space_up {
        app.session.on_key_up(&Key::Space);
    }
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }
    if space_down {
        app.session.on_key_down(&Key::Space);
    }
    if escape {
        app.session.on_key_down(&Key::Escape);
    }
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut RetouchApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    if let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) {
        app.session.on_wheel(local(mouse_pos, rect), scroll_delta);
    }
}

fn handle_pointer(ui: &egui::Ui, response: &egui::Response, app: &mut RetouchApp, rect: egui::Rect) {
    let (pressed, released, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.latest_pos(),
        )
    });
    let Some(pos) = pos else {
        return;
    };
    let screen = local(pos, rect);

    // A fast click can press and release within one frame; the release
    // below must still close the gesture opened here.
    let pressed_here = pressed && response.hovered();
    if pressed_here {
        app.session.on_pointer_down(screen);
    }

    if matches!(app.session.gesture(), Gesture::Idle) {
        if !pressed_here && rect.contains(pos) {
            app.session.on_pointer_move(screen);
        }
        return;
    }

    let commit = if released {
        app.session.on_pointer_up(screen)
    } else if pressed_here {
        None
    } else if rect.contains(pos) {
        app.session.on_pointer_move(screen);
        None
    } else {
        app.session.on_pointer_leave()
    };
    if let Some(commit) = commit {
        app.report_commit(commit);
    }
}

fn image_rect(app: &RetouchApp, rect: egui::Rect, image_size: Size) -> egui::Rect {
    let (min, size) = app.session.viewport_transform().image_screen_rect(image_size);
    egui::Rect::from_min_size(
        rect.min + egui::vec2(min.x, min.y),
        egui::vec2(size.width, size.height),
    )
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, img_rect: egui::Rect, tint: egui::Color32) {
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        tint,
    );
}

fn draw_annotations(painter: &egui::Painter, app: &RetouchApp, img_rect: egui::Rect) {
    let pending = app.session.annotations().pending();
    for annotation in app.session.annotations().iter() {
        let pos = egui::pos2(
            img_rect.left() + annotation.x * img_rect.width(),
            img_rect.top() + annotation.y * img_rect.height(),
        );
        let color = if pending == Some(annotation.id) {
            egui::Color32::from_rgb(255, 200, 0)
        } else {
            egui::Color32::from_rgb(0, 170, 255)
        };
        painter.circle_filled(pos, MARKER_RADIUS, color);
        painter.circle_stroke(pos, MARKER_RADIUS, egui::Stroke::new(1.0, egui::Color32::BLACK));

        let label = if annotation.text.is_empty() {
            format!("#{}", annotation.id)
        } else {
            annotation.text.clone()
        };
        painter.text(
            pos + egui::vec2(MARKER_RADIUS + 4.0, 0.0),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(14.0),
            egui::Color32::from_white_alpha(220),
        );
    }
}

fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
        CursorHint::Grab => egui::CursorIcon::Grab,
        CursorHint::Grabbing => egui::CursorIcon::Grabbing,
        CursorHint::Move => egui::CursorIcon::Move,
        CursorHint::NwseResize => egui::CursorIcon::ResizeNwSe,
        CursorHint::NeswResize => egui::CursorIcon::ResizeNeSw,
        CursorHint::NsResize => egui::CursorIcon::ResizeVertical,
        CursorHint::EwResize => egui::CursorIcon::ResizeHorizontal,
    }
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
