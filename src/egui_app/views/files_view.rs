use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::format_size;

enum FileAction {
    Delete(String),
    StartMove(String),
    Page(u32),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Stored files");
        if state.files.loading {
            ui.spinner();
        }
    });
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Storage");
        match &state.files.storage {
            Some(storage) => {
                ui.label(format!(
                    "{} files, {} of {} used",
                    storage.file_count,
                    format_size(storage.total_size),
                    format_size(storage.max_size)
                ));
                let fraction = (storage.used_percentage / 100.0).clamp(0.0, 1.0) as f32;
                ui.add(egui::ProgressBar::new(fraction).show_percentage());
            }
            None => {
                ui.colored_label(colors::TEXT_SECONDARY, "Storage usage unavailable.");
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Remove files older than");
            ui.add(egui::TextEdit::singleline(&mut state.files.cleanup_days).desired_width(40.0));
            ui.label("days");
            if ui.button("🧹 Clean up").clicked() {
                state.cleanup_files();
            }
        });
    });
    ui.add_space(10.0);

    if let Some((source, target)) = &mut state.files.moving {
        let mut confirm = false;
        let mut cancel = false;
        styles::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(format!("Move {source} to:"));
            ui.horizontal(|ui| {
                ui.add(egui::TextEdit::singleline(target).desired_width(360.0));
                confirm = ui.button("Move").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });
        if confirm {
            state.move_file();
        } else if cancel {
            state.files.moving = None;
        }
        ui.add_space(10.0);
    }

    let listing = &state.files.listing;
    if listing.files.is_empty() && !state.files.loading {
        ui.colored_label(colors::TEXT_SECONDARY, "No stored files.");
        return;
    }

    let mut action = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        egui::Grid::new("stored_files")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for header in ["Name", "Size", "Modified", ""] {
                    ui.label(egui::RichText::new(header).strong());
                }
                ui.end_row();

                for file in &listing.files {
                    ui.label(&file.name).on_hover_text(&file.path);
                    ui.label(format_size(file.size));
                    ui.label(
                        file.modified_at
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                    );
                    ui.horizontal(|ui| {
                        if ui.small_button("Move").clicked() {
                            action = Some(FileAction::StartMove(file.path.clone()));
                        }
                        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                            action = Some(FileAction::Delete(file.path.clone()));
                        }
                    });
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let page = listing.page;
            let pages = listing.page_count();
            if ui.add_enabled(page > 1, egui::Button::new("◀")).clicked() {
                action = Some(FileAction::Page(page - 1));
            }
            ui.label(format!("Page {page} of {pages} ({} files)", listing.total));
            if ui.add_enabled(page < pages, egui::Button::new("▶")).clicked() {
                action = Some(FileAction::Page(page + 1));
            }
        });
    });

    match action {
        Some(FileAction::Delete(path)) => state.delete_file(path),
        Some(FileAction::StartMove(path)) => state.files.moving = Some((path.clone(), path)),
        Some(FileAction::Page(page)) => state.files_page(page),
        None => {}
    }
}
