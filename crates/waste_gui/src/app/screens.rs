//! Rendering for the three uploader screens.

use super::{UiAction, UiApp};
use eframe::egui::{self, Color32, FontId, RichText, Sense, Stroke, Vec2};
use waste_core::ClassificationResult;

const PREVIEW_BOX: f32 = 256.0;
const DROP_ZONE: Vec2 = Vec2::new(360.0, 160.0);
const MODAL_WIDTH: f32 = 384.0;
const BANNER_SLIDE: f32 = 50.0;

const GREEN: Color32 = Color32::from_rgb(34, 197, 94);
const GREEN_TEXT: Color32 = Color32::from_rgb(74, 222, 128);
const RED: Color32 = Color32::from_rgb(239, 68, 68);

pub(super) fn analyze_label(loading: bool) -> &'static str {
    if loading { "Analyzing..." } else { "Analyze Waste" }
}

/// Size that fits `width`x`height` inside a `max` square, keeping aspect.
pub(super) fn fit_within(width: u32, height: u32, max: f32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::splat(max);
    }
    let (w, h) = (width as f32, height as f32);
    let scale = (max / w).min(max / h);
    Vec2::new(w * scale, h * scale)
}

impl UiApp {
    /// `t` runs from 0 to 1 as the banner slides down and fades in.
    pub(super) fn render_banner(&self, ui: &mut egui::Ui, t: f32) {
        ui.add_space(24.0 + BANNER_SLIDE * t);
        ui.scope(|ui| {
            ui.set_opacity(t);
            ui.label(
                RichText::new("Waste Classification System")
                    .size(34.0)
                    .strong()
                    .color(Color32::WHITE),
            );
        });
        ui.add_space(32.0 + BANNER_SLIDE * (1.0 - t));
    }

    pub(super) fn render_upload_zone(&self, ui: &mut egui::Ui, t: f32) -> Option<UiAction> {
        let size = DROP_ZONE * (0.9 + 0.1 * t);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        let painter = ui.painter_at(rect.expand(2.0));

        if response.hovered() {
            painter.rect_filled(rect, 8.0, Color32::from_rgb(31, 41, 55));
        }
        let border = Color32::from_gray(156).gamma_multiply(t);
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &corners,
            Stroke::new(2.0, border),
            8.0,
            6.0,
        ));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Click to Upload Image",
            FontId::proportional(18.0),
            Color32::WHITE.gamma_multiply(t),
        );

        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
        response.clicked().then_some(UiAction::PickImage)
    }

    pub(super) fn render_preview_card(
        &self,
        ui: &mut egui::Ui,
        loading: bool,
        error: Option<&str>,
    ) -> Option<UiAction> {
        let mut action = None;
        if let Some(tex) = &self.preview_texture {
            let [w, h] = tex.size();
            ui.image((tex.id(), fit_within(w as u32, h as u32, PREVIEW_BOX)));
        }
        ui.add_space(16.0);

        let button = egui::Button::new(
            RichText::new(analyze_label(loading))
                .strong()
                .color(Color32::WHITE),
        )
        .fill(GREEN)
        .min_size(Vec2::new(180.0, 40.0));
        if ui
            .add_enabled(self.uploader.submit_enabled(), button)
            .clicked()
        {
            action = Some(UiAction::Analyze);
        }

        if let Some(message) = error {
            ui.add_space(8.0);
            ui.colored_label(RED, message);
        }

        ui.add_space(8.0);
        if ui.small_button("Clear").clicked() {
            action = Some(UiAction::Reset);
        }
        action
    }

    pub(super) fn render_result_modal(
        &self,
        ctx: &egui::Context,
        result: &ClassificationResult,
        t: f32,
    ) -> Option<UiAction> {
        let frame = egui::Frame::popup(&ctx.style())
            .fill(Color32::from_rgb(31, 41, 55))
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::same(24));

        let modal = egui::Modal::new(egui::Id::new("result-modal-window"))
            .frame(frame)
            .show(ctx, |ui| {
                ui.set_opacity(t);
                ui.set_width(MODAL_WIDTH * (0.8 + 0.2 * t));
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Waste Classification Result")
                            .size(20.0)
                            .strong()
                            .color(GREEN_TEXT),
                    );
                    ui.add_space(16.0);
                    field_row(ui, "Type", &result.waste_type);
                    field_row(ui, "Disposal", &result.disposal);
                    field_row(ui, "Caption", result.caption_or_placeholder());
                    if !result.detected_objects.is_empty() {
                        field_row(ui, "Detected", &result.detected_objects.join(", "));
                    }
                    ui.add_space(16.0);
                    let again = egui::Button::new(
                        RichText::new("Try Again").strong().color(Color32::WHITE),
                    )
                    .fill(RED)
                    .min_size(Vec2::new(140.0, 36.0));
                    ui.add(again).clicked()
                })
                .inner
            });
        modal.inner.then_some(UiAction::Reset)
    }
}

fn field_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, "Analyze Waste")]
    #[case(true, "Analyzing...")]
    fn analyze_button_label_follows_loading(#[case] loading: bool, #[case] label: &str) {
        assert_eq!(analyze_label(loading), label);
    }

    #[rstest]
    #[case(512, 512, Vec2::new(256.0, 256.0))]
    #[case(512, 128, Vec2::new(256.0, 64.0))]
    #[case(64, 128, Vec2::new(128.0, 256.0))]
    #[case(0, 10, Vec2::new(256.0, 256.0))]
    fn preview_fits_box(#[case] w: u32, #[case] h: u32, #[case] expected: Vec2) {
        assert_eq!(fit_within(w, h, PREVIEW_BOX), expected);
    }
}
