use retouch_core::crop::AspectRatio;
use retouch_core::input::{Gesture, Mode};

use crate::app::RetouchApp;
use crate::panels::helpers::{enum_combo, section_header};

const LEFT_PANEL_WIDTH: f32 = 260.0;
const BRUSH_RANGE: std::ops::RangeInclusive<f32> = 1.0..=200.0;

pub fn show(ctx: &egui::Context, app: &mut RetouchApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                tool_section(ui, app);
                ui.separator();
                mask_section(ui, app);
                ui.separator();
                crop_section(ui, app);
                ui.separator();
                annotation_section(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &RetouchApp) {
    section_header(ui, "File", None);
    match &app.file_path {
        Some(path) => {
            ui.label(
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
            );
        }
        None => {
            ui.small("No image loaded (File > Open)");
        }
    }
}

fn tool_section(ui: &mut egui::Ui, app: &mut RetouchApp) {
    section_header(ui, "Tool", None);
    ui.add_space(4.0);

    let mut mode = app.session.mode();
    let busy = !matches!(app.session.gesture(), Gesture::Idle);
    ui.add_enabled_ui(!busy, |ui| {
        if enum_combo(ui, "Mode", &mut mode, &Mode::ALL) {
            app.session.set_mode(mode);
        }
    });

    if ui.button("Fit view").clicked() {
        app.session.fit_view();
    }
    ui.small("Hold Space and drag to pan, scroll to zoom.");
}

fn mask_section(ui: &mut egui::Ui, app: &mut RetouchApp) {
    let status = app
        .session
        .mask()
        .map(|m| format!("{} px", m.selected_count()));
    section_header(ui, "Mask", status.as_deref());
    ui.add_space(4.0);

    let mut brush = app.session.brush_size();
    if ui
        .add(egui::Slider::new(&mut brush, BRUSH_RANGE).text("Brush size").logarithmic(true))
        .changed()
    {
        app.session.set_brush_size(brush);
    }

    let can_clear = app.session.mask_compositor().is_some();
    if ui.add_enabled(can_clear, egui::Button::new("Clear mask")).clicked() {
        app.session.clear_mask();
        app.add_log("Mask cleared".into());
    }
}

fn crop_section(ui: &mut egui::Ui, app: &mut RetouchApp) {
    let status = app.session.crop_region().zip(app.session.image_size()).map(|(region, size)| {
        let px = region.to_pixels(size.width as u32, size.height as u32);
        format!("{}x{}", px.width, px.height)
    });
    section_header(ui, "Crop", status.as_deref());
    ui.add_space(4.0);

    let mut aspect: AspectRatio = app.session.crop_aspect_ratio();
    if enum_combo(ui, "Aspect", &mut aspect, AspectRatio::PRESETS) {
        app.session.set_crop_aspect_ratio(aspect);
    }
}

fn annotation_section(ui: &mut egui::Ui, app: &mut RetouchApp) {
    let count = app.session.annotations().len();
    section_header(ui, "Annotations", Some(&count.to_string()));
    ui.add_space(4.0);

    let pending = app.session.annotations().pending();
    let entries: Vec<(u64, String)> = app
        .session
        .annotations()
        .iter()
        .map(|a| (a.id, a.text.clone()))
        .collect();

    let mut removed = None;
    let mut done = false;
    for (id, mut text) in entries {
        ui.horizontal(|ui| {
            ui.label(format!("#{id}"));
            let edit = ui.add(egui::TextEdit::singleline(&mut text).desired_width(140.0));
            if pending == Some(id) && !edit.has_focus() && text.is_empty() {
                edit.request_focus();
            }
            if edit.changed() {
                app.session.annotations_mut().update_text(id, text.as_str());
            }
            if pending == Some(id)
                && (ui.small_button("Done").clicked()
                    || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))))
            {
                done = true;
            }
            if ui.small_button("Delete").clicked() {
                removed = Some(id);
            }
        });
    }

    if done {
        app.session.annotations_mut().finish_editing();
    }
    if let Some(id) = removed {
        app.session.annotations_mut().remove(id);
        app.add_log(format!("Annotation #{id} deleted"));
    }

    if count > 0 && ui.button("Clear all").clicked() {
        app.session.annotations_mut().clear();
        app.add_log("Annotations cleared".into());
    }
}
