//! Client configuration lookup and the service footer.

use super::UiApp;
use directories_next::ProjectDirs;
use eframe::egui::{self, RichText};
use std::path::PathBuf;
use waste_core::ClientConfig;

pub(crate) fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "WasteSorter", "WasteSorter")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the client config, falling back to the built-in endpoint when the
/// file is unusable. The second value is a message for the status line.
pub(crate) fn load_client_config() -> (ClientConfig, Option<String>) {
    let Some(path) = config_path() else {
        tracing::warn!("No config directory on this platform, using defaults");
        return (ClientConfig::default(), None);
    };
    match ClientConfig::load(&path) {
        Ok(cfg) => {
            tracing::info!(
                "Classification endpoint {} (config {})",
                cfg.endpoint,
                path.display()
            );
            (cfg, None)
        }
        Err(e) => {
            tracing::warn!("Ignoring config: {e}");
            (
                ClientConfig::default(),
                Some(format!("Config ignored, using defaults: {e}")),
            )
        }
    }
}

impl UiApp {
    pub(super) fn render_service_info(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let service = ui.label(
                RichText::new(format!("Service: {}", self.endpoint))
                    .small()
                    .weak(),
            );
            if let Some(path) = config_path() {
                service.on_hover_text(format!("Configured in {}", path.display()));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("v{}", self.app_version))
                        .small()
                        .weak(),
                );
            });
        });
    }
}
