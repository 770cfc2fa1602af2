use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use retouch_core::config::EditorConfig;
use retouch_core::geometry::Size;
use retouch_core::session::EditSession;

use super::parse_size;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image
    pub file: PathBuf,

    /// Viewport container size used to report the fitted view, e.g. 1280x720
    #[arg(long, value_parser = parse_size)]
    pub container: Option<Size>,
}

pub fn run(args: &InfoArgs, config: &EditorConfig) -> Result<()> {
    let mut session = EditSession::new(config.clone());
    session
        .load_image_path(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let Some(size) = session.image_size() else {
        return Ok(());
    };

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", size.width, size.height);
    println!("Aspect:      {:.4}", size.aspect());
    println!("Pixels:      {}", (size.width * size.height) as u64);

    if let Some(container) = args.container {
        session.set_container_size(container);
        session.fit_view();
        let vp = session.viewport();
        println!();
        println!("Container:   {}x{}", container.width, container.height);
        println!("Fit zoom:    {:.4}", vp.zoom);
        println!("Pan:         ({:.1}, {:.1})", vp.pan.x, vp.pan.y);
        println!("Sampling:    {:?}", session.sampling());
    }

    Ok(())
}
