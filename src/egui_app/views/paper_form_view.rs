use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::{PaperStatus, RecordId};

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(f32::INFINITY));
    ui.end_row();
}

/// Create form when `editing` is `None`, edit form otherwise.
pub fn render(ui: &mut egui::Ui, state: &mut AppState, editing: Option<RecordId>) {
    ui.heading(if editing.is_some() { "Edit paper" } else { "New paper" });
    ui.add_space(8.0);

    let saving = state.paper_form.saving;

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        let form = &mut state.paper_form;

        egui::Grid::new("paper_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                text_row(ui, "Title", &mut form.title);
                text_row(ui, "Authors", &mut form.authors);
                text_row(ui, "Keywords", &mut form.keywords);
                text_row(ui, "Conference", &mut form.conference);
                if editing.is_none() {
                    text_row(ui, "Year", &mut form.year);
                    text_row(ui, "DOI", &mut form.doi);
                }

                ui.label("Status");
                egui::ComboBox::from_id_salt("paper_status")
                    .selected_text(form.status.label())
                    .show_ui(ui, |ui| {
                        for status in PaperStatus::ALL {
                            ui.selectable_value(&mut form.status, status, status.label());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label("Abstract");
        ui.add(
            egui::TextEdit::multiline(&mut form.abstract_text)
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let label = if editing.is_some() { "💾 Save" } else { "➕ Create" };
        if ui
            .add_enabled(!saving, egui::Button::new(egui::RichText::new(label).color(colors::TEXT_LIGHT)).fill(colors::ACCENT))
            .clicked()
        {
            match editing.clone() {
                Some(id) => state.save_paper(id),
                None => state.create_paper(),
            }
        }
        if ui.button("Cancel").clicked() {
            match editing.clone() {
                Some(id) => state.open_paper(id),
                None => state.navigate(Route::Papers),
            }
        }
        if saving {
            ui.spinner();
        }
    });
}
