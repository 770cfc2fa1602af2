use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use retouch_core::config::EditorConfig;
use retouch_core::geometry::Size;
use retouch_core::io::{save_image, save_mask};
use retouch_core::script::{replay, Script};
use retouch_core::session::EditSession;
use tracing::warn;

use super::parse_size;
use crate::summary::{print_replay_summary, ReplayReport};

#[derive(Args)]
pub struct ReplayArgs {
    /// Input image
    pub image: PathBuf,

    /// Event script (TOML)
    pub script: PathBuf,

    /// Viewport container size, overriding the script's, e.g. 1280x720
    #[arg(long, value_parser = parse_size)]
    pub container: Option<Size>,

    /// Save the final mask (PNG keeps alpha; JPEG/BMP are black and white)
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Save the image cut to the final crop region
    #[arg(long)]
    pub cropped: Option<PathBuf>,

    /// Save annotations as JSON
    #[arg(long)]
    pub annotations: Option<PathBuf>,
}

pub fn run(args: &ReplayArgs, config: EditorConfig) -> Result<()> {
    let mut script = Script::load(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    if let Some(size) = args.container {
        script.container = Some(retouch_core::script::ContainerSize {
            width: size.width,
            height: size.height,
        });
    }

    let mut session = EditSession::new(config);
    session
        .load_image_path(&args.image)
        .with_context(|| format!("Failed to open {}", args.image.display()))?;

    let pb = ProgressBar::new(script.events.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Replaying");

    let summary = replay(&mut session, &script, |done, _| pb.set_position(done as u64))?;
    pb.finish_with_message("Done");

    if let Some(ref path) = args.mask {
        match session.mask() {
            Some(mask) => save_mask(mask, path)
                .with_context(|| format!("Failed to save mask to {}", path.display()))?,
            None => warn!("no selection, mask not written"),
        }
    }

    if let Some(ref path) = args.cropped {
        let cropped = session.apply_crop()?;
        save_image(&cropped, path)
            .with_context(|| format!("Failed to save cropped image to {}", path.display()))?;
    }

    if let Some(ref path) = args.annotations {
        let json = session.annotations().to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write annotations to {}", path.display()))?;
    }

    print_replay_summary(&ReplayReport {
        image: &args.image,
        script: &args.script,
        summary: &summary,
        session: &session,
        mask_path: args.mask.as_deref(),
        cropped_path: args.cropped.as_deref(),
        annotations_path: args.annotations.as_deref(),
    });

    Ok(())
}
