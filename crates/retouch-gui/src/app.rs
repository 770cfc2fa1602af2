use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result};
use retouch_core::io::{save_image, save_mask};
use retouch_core::session::{Commit, EditSession};
use retouch_core::viewport::Sampling;

use crate::convert::{rgba_to_color_image, texture_options};
use crate::panels;

/// Path picked in a native file dialog (dialogs run off the UI thread).
pub enum DialogResult {
    OpenImage(PathBuf),
    SaveMask(PathBuf),
    SaveCropped(PathBuf),
    SaveAnnotations(PathBuf),
}

/// GPU copies of the base image and the mask overlay.
#[derive(Default)]
pub struct Textures {
    pub image: Option<egui::TextureHandle>,
    image_sampling: Option<Sampling>,
    pub overlay: Option<egui::TextureHandle>,
    overlay_revision: Option<u64>,
}

pub struct RetouchApp {
    pub session: EditSession,
    pub textures: Textures,
    pub dialog_tx: mpsc::Sender<DialogResult>,
    dialog_rx: mpsc::Receiver<DialogResult>,
    pub file_path: Option<PathBuf>,
    pub log_messages: Vec<String>,
    pub show_about: bool,
}

impl RetouchApp {
    pub fn new(initial: Option<PathBuf>) -> Self {
        let (dialog_tx, dialog_rx) = mpsc::channel();
        let mut app = Self {
            session: EditSession::default(),
            textures: Textures::default(),
            dialog_tx,
            dialog_rx,
            file_path: None,
            log_messages: Vec::new(),
            show_about: false,
        };
        if let Some(path) = initial {
            app.open_image(&path);
        }
        app
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Drain paths picked by file dialogs.
    fn poll_dialogs(&mut self) {
        while let Ok(result) = self.dialog_rx.try_recv() {
            let outcome = match result {
                DialogResult::OpenImage(path) => {
                    self.open_image(&path);
                    Ok(())
                }
                DialogResult::SaveMask(path) => self.save_mask_to(&path),
                DialogResult::SaveCropped(path) => self.save_cropped_to(&path),
                DialogResult::SaveAnnotations(path) => self.save_annotations_to(&path),
            };
            if let Err(e) = outcome {
                self.add_log(format!("ERROR: {e:#}"));
            }
        }
    }

    pub fn open_image(&mut self, path: &Path) {
        match self.session.load_image_path(path) {
            Ok(()) => {
                if let Some(size) = self.session.image_size() {
                    self.add_log(format!("Opened: {} ({}x{})", path.display(), size.width, size.height));
                }
                self.file_path = Some(path.to_path_buf());
                self.textures = Textures::default();
            }
            Err(e) => self.add_log(format!("ERROR: failed to open {}: {e}", path.display())),
        }
    }

    fn save_mask_to(&mut self, path: &Path) -> Result<()> {
        let mask = self.session.mask().context("Nothing is selected")?;
        save_mask(mask, path).with_context(|| format!("Failed to save mask to {}", path.display()))?;
        self.add_log(format!("Saved mask: {}", path.display()));
        Ok(())
    }

    fn save_cropped_to(&mut self, path: &Path) -> Result<()> {
        let cropped = self.session.apply_crop()?;
        save_image(&cropped, path).with_context(|| format!("Failed to save image to {}", path.display()))?;
        self.add_log(format!(
            "Saved {}x{} crop: {}",
            cropped.width(),
            cropped.height(),
            path.display()
        ));
        Ok(())
    }

    fn save_annotations_to(&mut self, path: &Path) -> Result<()> {
        let json = self.session.annotations().to_json()?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        self.add_log(format!("Saved annotations: {}", path.display()));
        Ok(())
    }

    /// Log what a finished gesture produced.
    pub fn report_commit(&mut self, commit: Commit) {
        let msg = match commit {
            Commit::Mask(Some(mask)) => format!("Mask: {} px selected", mask.selected_count()),
            Commit::Mask(None) => "Mask: empty".to_string(),
            Commit::Crop(r) => format!(
                "Crop: {:.1}% x {:.1}% at ({:.3}, {:.3})",
                r.width * 100.0,
                r.height * 100.0,
                r.x,
                r.y
            ),
            Commit::Annotation(id) => format!("Annotation #{id} placed"),
        };
        self.add_log(msg);
    }

    /// Re-upload textures whose source changed since the last frame.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let Some(image) = self.session.image() else {
            self.textures = Textures::default();
            return;
        };

        let sampling = self.session.sampling();
        if self.textures.image.is_none() || self.textures.image_sampling != Some(sampling) {
            let texture = ctx.load_texture("image", rgba_to_color_image(image), texture_options(sampling));
            self.textures.image = Some(texture);
            self.textures.image_sampling = Some(sampling);
        }

        let revision = self.session.mask_revision();
        if self.textures.overlay_revision != Some(revision) {
            self.textures.overlay = self.session.working_buffer().map(|buf| {
                ctx.load_texture("mask_overlay", rgba_to_color_image(buf), egui::TextureOptions::NEAREST)
            });
            self.textures.overlay_revision = Some(revision);
        }
    }
}

impl eframe::App for RetouchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_dialogs();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        self.sync_textures(ctx);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Retouch")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Retouch");
                        ui.label("Mask, crop and annotate images");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
