use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Draft a paper");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Back to ICLR 2025").clicked() {
                state.navigate(Route::Conference);
            }
        });
    });
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        egui::Grid::new("draft_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Research topic");
                ui.add(egui::TextEdit::singleline(&mut state.draft.topic).desired_width(420.0));
                ui.end_row();

                ui.label("Innovations");
                ui.add(
                    egui::TextEdit::multiline(&mut state.draft.innovations)
                        .hint_text("One per line")
                        .desired_rows(4)
                        .desired_width(420.0),
                );
                ui.end_row();

                ui.label("Datasets");
                ui.add(
                    egui::TextEdit::singleline(&mut state.draft.datasets)
                        .hint_text("Comma separated")
                        .desired_width(420.0),
                );
                ui.end_row();

                ui.label("Metrics");
                ui.add(
                    egui::TextEdit::singleline(&mut state.draft.metrics)
                        .hint_text("Comma separated")
                        .desired_width(420.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let saving = state.draft.saving;
            if ui
                .add_enabled(!saving, egui::Button::new("Create draft").fill(colors::ACCENT))
                .clicked()
            {
                state.submit_draft();
            }
            if saving {
                ui.spinner();
            }
        });
    });

    if let Some(created) = &state.draft.created {
        ui.add_space(12.0);
        styles::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.colored_label(colors::SUCCESS, format!("\"{}\" was added to the collection.", created.title));
            for innovation in &created.innovations {
                ui.label(format!("• {innovation}"));
            }
        });
    }
}
