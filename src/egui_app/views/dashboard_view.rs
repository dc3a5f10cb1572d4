use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::papers_view;

fn stat_card(ui: &mut egui::Ui, label: &str, value: u64, color: egui::Color32) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(110.0);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(value.to_string()).size(28.0).strong().color(color));
            ui.colored_label(colors::TEXT_SECONDARY, label);
        });
    });
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        if state.dashboard.loading {
            ui.spinner();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⟳ Refresh").clicked() {
                state.refresh();
            }
        });
    });
    ui.add_space(12.0);

    match state.dashboard.stats {
        Some(stats) => {
            ui.horizontal_wrapped(|ui| {
                stat_card(ui, "Total papers", stats.total, colors::TEXT_DARK);
                stat_card(ui, "Drafts", stats.draft, colors::TEXT_SECONDARY);
                stat_card(ui, "Submitted", stats.submitted, colors::INFO);
                stat_card(ui, "Accepted", stats.accepted, colors::SUCCESS);
                stat_card(ui, "Rejected", stats.rejected, colors::ERROR);
            });
        }
        None if !state.dashboard.loading => {
            ui.colored_label(colors::TEXT_SECONDARY, "Statistics are unavailable right now.");
        }
        None => {}
    }

    ui.add_space(20.0);
    styles::section_heading(ui, "Recent papers");

    if state.dashboard.recent.is_empty() && !state.dashboard.loading {
        ui.horizontal(|ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "No papers yet.");
            if ui.link("Upload your first paper").clicked() {
                state.navigate(Route::Upload);
            }
        });
        return;
    }

    let mut action = None;
    for paper in &state.dashboard.recent {
        if let Some(a) = papers_view::paper_row(ui, paper) {
            action = Some(a);
        }
        ui.add_space(6.0);
    }
    if let Some(action) = action {
        papers_view::apply_row_action(state, action);
    }
}
