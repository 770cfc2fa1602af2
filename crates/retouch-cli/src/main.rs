mod commands;
mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retouch_core::config::EditorConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retouch", about = "Mask, crop and annotate raster images")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and how it would fit a viewport
    Info(commands::info::InfoArgs),
    /// Replay an event script against an image and save the results
    Replay(commands::replay::ReplayArgs),
    /// Print or save the editor configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Info(args) => commands::info::run(args, &config),
        Commands::Replay(args) => commands::replay::run(args, config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
