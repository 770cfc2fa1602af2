use crate::app::RetouchApp;

pub fn show(ctx: &egui::Context, app: &mut RetouchApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(size) = app.session.image_size() {
                ui.label(format!("{}x{}", size.width, size.height));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.session.viewport().zoom * 100.0));
            ui.separator();
            ui.label(format!("Mode: {}", app.session.mode()));
            ui.separator();
            ui.label(format!("Sampling: {:?}", app.session.sampling()));
            if let Some(region) = app.session.crop_region() {
                ui.separator();
                ui.label(format!(
                    "Crop: {:.0}% x {:.0}%",
                    region.width * 100.0,
                    region.height * 100.0
                ));
            }
        });

        ui.add_space(2.0);
    });
}
