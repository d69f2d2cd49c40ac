mod screens;
mod settings;

pub(crate) use settings::load_client_config;

use eframe::{App, Frame, egui};
use rfd::FileDialog;
use std::sync::Arc;
use waste_core::{ClassifyService, Dispatcher, IMAGE_EXTENSIONS, Screen, Uploader, intake};

const PANEL_FILL: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);

/// User intent collected while drawing a frame, applied afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiAction {
    PickImage,
    Analyze,
    Reset,
}

pub(crate) struct UiApp {
    uploader: Uploader,
    dispatcher: Dispatcher,
    preview_texture: Option<egui::TextureHandle>,
    status: String,
    endpoint: String,
    app_version: &'static str,
    // False until the first frame is drawn, so entry animations start from 0.
    started: bool,
}

impl UiApp {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        service: Arc<dyn ClassifyService>,
        endpoint: String,
        status: Option<String>,
    ) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = PANEL_FILL;
        cc.egui_ctx.set_visuals(visuals);
        Self {
            uploader: Uploader::new(),
            dispatcher: Dispatcher::new(service),
            preview_texture: None,
            status: status.unwrap_or_default(),
            endpoint,
            app_version: env!("WASTE_SORTER_VERSION"),
            started: false,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, action: UiAction) {
        match action {
            UiAction::PickImage => self.pick_image(ctx),
            UiAction::Analyze => self.analyze(ctx),
            UiAction::Reset => self.reset(),
        }
    }

    fn pick_image(&mut self, ctx: &egui::Context) {
        let Some(path) = FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .set_directory(".")
            .pick_file()
        else {
            return;
        };
        match intake::load(&path) {
            Ok((image, preview)) => {
                let color =
                    egui::ColorImage::from_rgba_unmultiplied(preview.size(), &preview.rgba);
                let tex = ctx.load_texture(
                    format!("preview:{}", image.file_name()),
                    color,
                    egui::TextureOptions::LINEAR,
                );
                self.preview_texture = Some(tex);
                self.uploader.select(image, preview);
                self.status.clear();
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", path.display(), e);
                self.status = format!("Could not open image: {e}");
            }
        }
    }

    fn analyze(&mut self, ctx: &egui::Context) {
        let Some(ticket) = self.uploader.begin_submission() else {
            return;
        };
        let token = ticket.token;
        let repaint = ctx.clone();
        if let Err(e) = self
            .dispatcher
            .submit(ticket, move || repaint.request_repaint())
        {
            self.uploader.complete(token, Err(e));
        }
    }

    fn reset(&mut self) {
        self.uploader.reset();
        self.preview_texture = None;
        self.status.clear();
    }

    fn poll_completions(&mut self) {
        while let Some(done) = self.dispatcher.try_next() {
            self.uploader.complete(done.token, done.outcome);
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_completions();

        let screen = self.uploader.screen();
        let banner_t = ctx.animate_bool_with_time(egui::Id::new("banner"), self.started, 1.0);
        let idle_t = ctx.animate_bool_with_time(
            egui::Id::new("upload-zone"),
            self.started && screen == Screen::Idle,
            0.5,
        );
        let result_t = ctx.animate_bool_with_time(
            egui::Id::new("result-modal"),
            matches!(screen, Screen::Result(_)),
            0.25,
        );
        let mut action = None;

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| self.render_service_info(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.render_banner(ui, banner_t);
                action = match screen {
                    Screen::Idle => self.render_upload_zone(ui, idle_t),
                    Screen::Ready { loading, error } => {
                        self.render_preview_card(ui, loading, error)
                    }
                    Screen::Result(_) => self.render_preview_card(ui, false, None),
                };
                if !self.status.is_empty() {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(&self.status).weak());
                }
            });
        });

        if let Screen::Result(result) = screen
            && let Some(a) = self.render_result_modal(ctx, result, result_t)
        {
            action = Some(a);
        }

        self.started = true;
        if let Some(action) = action {
            self.apply(ctx, action);
        }
    }
}
