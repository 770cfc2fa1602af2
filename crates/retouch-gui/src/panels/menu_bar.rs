use crate::app::{DialogResult, RetouchApp};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

pub fn show(ctx: &egui::Context, app: &mut RetouchApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_file(app);
                }

                ui.separator();

                let has_image = app.session.image().is_some();
                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui
                    .add_enabled(
                        app.session.mask().is_some(),
                        egui::Button::new("Save Mask...").shortcut_text(ctx.format_shortcut(&save_shortcut)),
                    )
                    .clicked()
                {
                    ui.close();
                    save_mask(app);
                }

                if ui.add_enabled(has_image, egui::Button::new("Save Cropped...")).clicked() {
                    ui.close();
                    save_cropped(app);
                }

                if ui
                    .add_enabled(!app.session.annotations().is_empty(), egui::Button::new("Export Annotations..."))
                    .clicked()
                {
                    ui.close();
                    save_annotations(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.session.fit_view();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S)))
            && app.session.mask().is_some()
        {
            save_mask(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_file(app: &RetouchApp) {
    let tx = app.dialog_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = tx.send(DialogResult::OpenImage(path));
        }
    });
}

fn save_mask(app: &RetouchApp) {
    let tx = app.dialog_tx.clone();
    let name = suggested_name(app, "mask", "png");
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG (grayscale)", &["jpg", "jpeg"])
            .set_file_name(name)
            .save_file()
        {
            let _ = tx.send(DialogResult::SaveMask(path));
        }
    });
}

fn save_cropped(app: &RetouchApp) {
    let tx = app.dialog_tx.clone();
    let name = suggested_name(app, "cropped", "png");
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(name)
            .save_file()
        {
            let _ = tx.send(DialogResult::SaveCropped(path));
        }
    });
}

fn save_annotations(app: &RetouchApp) {
    let tx = app.dialog_tx.clone();
    let name = suggested_name(app, "annotations", "json");
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(name)
            .save_file()
        {
            let _ = tx.send(DialogResult::SaveAnnotations(path));
        }
    });
}

/// `<stem>_<suffix>.<ext>` from the open file, or `<suffix>.<ext>`.
fn suggested_name(app: &RetouchApp, suffix: &str, ext: &str) -> String {
    app.file_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .map(|stem| format!("{}_{suffix}.{ext}", stem.to_string_lossy()))
        .unwrap_or_else(|| format!("{suffix}.{ext}"))
}
