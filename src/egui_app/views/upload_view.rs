use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::RecordId;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Upload papers");
    ui.add_space(8.0);

    // Dropped files are staged; each is checked before it joins the queue.
    let dropped: Vec<_> = ui.ctx().input(|i| {
        i.raw
            .dropped_files
            .iter()
            .filter_map(|file| file.path.clone())
            .collect()
    });
    for path in dropped {
        state.queue_upload(path);
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.colored_label(
            colors::TEXT_SECONDARY,
            "PDF files only, smaller than 10MB. Drop files onto the window or add them by path.",
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("File path:");
            let input = ui.add(
                egui::TextEdit::singleline(&mut state.upload.path)
                    .hint_text("/home/me/papers/draft.pdf")
                    .desired_width(420.0),
            );
            let submitted = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add").clicked() || submitted {
                state.queue_typed_path();
            }
        });

        let mut unqueue = None;
        if !state.upload.queue.is_empty() {
            ui.add_space(8.0);
            for (index, path) in state.upload.queue.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("📄 {}", path.display()));
                    if !state.upload.uploading && ui.small_button("✖").clicked() {
                        unqueue = Some(index);
                    }
                });
            }
        }
        if let Some(index) = unqueue {
            state.unqueue_upload(index);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let uploading = state.upload.uploading;
            let count = state.upload.queue.len();
            let label = if count > 1 {
                format!("⬆ Upload {count} files")
            } else {
                "⬆ Upload".to_string()
            };
            if ui
                .add_enabled(!uploading, egui::Button::new(label).fill(colors::ACCENT))
                .clicked()
            {
                state.upload_queued();
            }
            if uploading {
                ui.spinner();
                ui.colored_label(colors::TEXT_SECONDARY, "Uploading...");
            }
        });
    });

    if state.upload.results.is_empty() {
        return;
    }

    ui.add_space(12.0);
    let mut open: Option<RecordId> = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(
            egui::RichText::new(format!(
                "{} of {} uploaded",
                state.upload.succeeded(),
                state.upload.results.len()
            ))
            .strong(),
        );
        ui.add_space(4.0);
        for outcome in &state.upload.results {
            ui.horizontal(|ui| match &outcome.result {
                Ok(receipt) => {
                    let title = receipt.title.as_deref().unwrap_or(&outcome.file_name);
                    ui.colored_label(colors::SUCCESS, format!("✔ {title}"));
                    if ui.small_button("Open").clicked() {
                        open = Some(receipt.paper_id.clone());
                    }
                }
                Err(err) => {
                    ui.colored_label(
                        colors::ERROR,
                        format!("✖ {}: {}", outcome.file_name, err.user_message()),
                    );
                }
            });
        }
    });
    if let Some(id) = open {
        state.open_paper(id);
    }
}
