mod app;

use anyhow::{Result, anyhow};
use app::{UiApp, load_client_config};
use eframe::{NativeOptions, egui};
use std::sync::Arc;
use waste_core::HttpClassifier;

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        tracing::error!("{e:#}");
        eprintln!("Application stopped with error: {e:#}");
    }
}

fn run() -> Result<()> {
    let (config, config_warning) = load_client_config();
    let classifier = HttpClassifier::new(&config)?;
    let endpoint = classifier.endpoint().to_string();
    let service = Arc::new(classifier);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Waste Classification System")
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Waste Classification System",
        options,
        Box::new(move |cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(
                cc,
                service,
                endpoint,
                config_warning,
            )))
        }),
    )
    .map_err(|e| anyhow!("failed to start UI: {e}"))
}
