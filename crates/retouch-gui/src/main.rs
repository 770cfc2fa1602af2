mod app;
mod convert;
mod panels;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Retouch"),
        ..Default::default()
    };

    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    eframe::run_native(
        "Retouch",
        options,
        Box::new(|_cc| Ok(Box::new(app::RetouchApp::new(initial)))),
    )
}
