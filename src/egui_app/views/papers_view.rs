use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::{Paper, RecordId};

/// A click on one of a paper row's controls.
pub enum RowAction {
    Open(RecordId),
    ToggleFavorite(RecordId, bool),
    Edit(RecordId),
    Delete(RecordId),
}

pub fn apply_row_action(state: &mut AppState, action: RowAction) {
    match action {
        RowAction::Open(id) => state.open_paper(id),
        RowAction::ToggleFavorite(id, is_favorite) => state.toggle_favorite(id, is_favorite),
        RowAction::Edit(id) => state.navigate(Route::EditPaper(id)),
        RowAction::Delete(id) => state.delete_paper(id),
    }
}

pub fn paper_row(ui: &mut egui::Ui, paper: &Paper) -> Option<RowAction> {
    let mut action = None;

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            let star = if paper.is_favorite { "★" } else { "☆" };
            let star_color = if paper.is_favorite { colors::FAVORITE } else { colors::TEXT_SECONDARY };
            if ui
                .add(egui::Button::new(egui::RichText::new(star).size(18.0).color(star_color)).frame(false))
                .on_hover_text(if paper.is_favorite { "Remove from favorites" } else { "Add to favorites" })
                .clicked()
            {
                action = Some(RowAction::ToggleFavorite(paper.id.clone(), paper.is_favorite));
            }

            ui.vertical(|ui| {
                let title = if paper.title.is_empty() { "Untitled" } else { paper.title.as_str() };
                if ui
                    .add(egui::Label::new(egui::RichText::new(title).size(16.0).strong()).sense(egui::Sense::click()))
                    .clicked()
                {
                    action = Some(RowAction::Open(paper.id.clone()));
                }
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(styles::status_color(paper.status), paper.status.label());
                    if let Some(authors) = paper.authors.as_deref().filter(|a| !a.is_empty()) {
                        ui.colored_label(colors::TEXT_SECONDARY, authors);
                    }
                    if let Some(conference) = &paper.conference {
                        ui.colored_label(colors::TEXT_SECONDARY, format!("· {conference}"));
                    }
                    if let Some(created) = paper.created_at {
                        ui.colored_label(colors::TEXT_SECONDARY, format!("· {}", created.format("%Y-%m-%d")));
                    }
                });
                if !paper.tags.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &paper.tags {
                            tag_chip(ui, &tag.name);
                        }
                    });
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑").on_hover_text("Delete").clicked() {
                    action = Some(RowAction::Delete(paper.id.clone()));
                }
                if ui.button("✏").on_hover_text("Edit").clicked() {
                    action = Some(RowAction::Edit(paper.id.clone()));
                }
                if ui.button("Open").clicked() {
                    action = Some(RowAction::Open(paper.id.clone()));
                }
            });
        });
    });

    action
}

pub fn tag_chip(ui: &mut egui::Ui, name: &str) {
    egui::Frame::new()
        .fill(colors::TAG_BG)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(format!("#{name}")).size(12.0).color(colors::ACCENT));
        });
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("My papers");
        if state.papers.loading {
            ui.spinner();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⬆ Upload").clicked() {
                state.navigate(Route::Upload);
            }
            if ui.button("➕ New").clicked() {
                state.navigate(Route::NewPaper);
            }
        });
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.papers.search)
                .hint_text("Search title, authors, keywords...")
                .desired_width(320.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("🔍 Search").clicked() || enter {
            state.search_papers();
        }
        if state.papers.searched.is_some() && ui.button("Clear").clicked() {
            state.clear_search();
        }
    });
    ui.add_space(12.0);

    if state.papers.items.is_empty() && !state.papers.loading {
        let message = match &state.papers.searched {
            Some(query) => format!("No papers match \"{query}\"."),
            None => "No papers yet. Upload a PDF or create one by hand.".to_string(),
        };
        ui.colored_label(colors::TEXT_SECONDARY, message);
        return;
    }

    let mut action = None;
    for paper in &state.papers.items {
        if let Some(a) = paper_row(ui, paper) {
            action = Some(a);
        }
        ui.add_space(6.0);
    }
    if let Some(action) = action {
        apply_row_action(state, action);
    }
}
