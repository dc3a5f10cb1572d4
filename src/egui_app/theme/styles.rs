//! Styling helpers so every view uses the same frames and status colors.

use eframe::egui::{self, Color32, CornerRadius, Stroke};

use super::colors;
use crate::egui_app::state::NoticeKind;
use crate::shared::models::PaperStatus;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.panel_fill = colors::CONTENT_BG;
    style.visuals.window_fill = colors::CARD_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.override_text_color = Some(colors::TEXT_DARK);

    style.visuals.widgets.noninteractive.bg_fill = colors::CONTENT_BG;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_DARK);
    style.visuals.widgets.inactive.bg_fill = colors::TAG_BG;
    style.visuals.widgets.inactive.weak_bg_fill = colors::TAG_BG;
    style.visuals.widgets.hovered.bg_fill = colors::ACCENT;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);
    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);

    ctx.set_style(style);
}

pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

pub fn sidebar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::SIDEBAR_BG)
        .inner_margin(egui::Margin::symmetric(8, 12))
}

pub fn content_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CONTENT_BG)
        .inner_margin(egui::Margin::same(16))
}

/// White card with a thin border, used for list rows and detail sections.
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(Stroke::new(1.0, colors::CARD_BORDER))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::same(12))
}

pub fn status_color(status: PaperStatus) -> Color32 {
    match status {
        PaperStatus::Draft => colors::TEXT_SECONDARY,
        PaperStatus::Submitted => colors::INFO,
        PaperStatus::Accepted => colors::SUCCESS,
        PaperStatus::Rejected => colors::ERROR,
        PaperStatus::Other => colors::WARNING,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color32 {
    match kind {
        NoticeKind::Info => colors::INFO,
        NoticeKind::Success => colors::SUCCESS,
        NoticeKind::Error => colors::ERROR,
    }
}

/// Section heading inside a card.
pub fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(16.0).strong().color(colors::TEXT_DARK));
    ui.add_space(4.0);
}
