use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::{AppState, ConferenceFilter, CONFERENCE_TRACKS};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::papers_view::tag_chip;
use crate::shared::models::{ConferencePaper, RecordId};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("ICLR 2025");
        if state.conference.loading {
            ui.spinner();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✍ Draft a paper").clicked() {
                state.navigate(Route::WritePaper);
            }
            let refreshing = state.conference.refreshing;
            if ui
                .add_enabled(!refreshing, egui::Button::new("⟳ Update from OpenReview"))
                .on_hover_text("Crawls the conference site again; this can take a while")
                .clicked()
            {
                state.refresh_conference();
            }
            if refreshing {
                ui.spinner();
            }
        });
    });
    ui.add_space(8.0);

    let mut filter = None;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.conference.search)
                .hint_text("Search title, abstract, tags...")
                .desired_width(280.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("🔍 Search").clicked() || enter {
            filter = Some(ConferenceFilter::Search(state.conference.search.clone()));
        }

        ui.separator();
        let topics = state.conference.topics();
        egui::ComboBox::from_id_salt("conference_topic")
            .selected_text(match &state.conference.filter {
                ConferenceFilter::Topic(topic) => topic.as_str(),
                _ => "Topic",
            })
            .show_ui(ui, |ui| {
                for topic in topics {
                    if ui.selectable_label(false, &topic).clicked() {
                        filter = Some(ConferenceFilter::Topic(topic));
                    }
                }
            });
        egui::ComboBox::from_id_salt("conference_track")
            .selected_text(match &state.conference.filter {
                ConferenceFilter::Track(track) => track.as_str(),
                _ => "Track",
            })
            .show_ui(ui, |ui| {
                for track in CONFERENCE_TRACKS {
                    if ui.selectable_label(false, track).clicked() {
                        filter = Some(ConferenceFilter::Track(track.to_string()));
                    }
                }
            });

        if state.conference.filter != ConferenceFilter::All && ui.button("Show all").clicked() {
            state.conference.search.clear();
            filter = Some(ConferenceFilter::All);
        }
    });
    if let Some(filter) = filter {
        state.filter_conference(filter);
    }
    ui.add_space(12.0);

    if let Some(selected) = state.conference.selected.clone() {
        if render_selected(ui, &selected) {
            state.conference.selected = None;
        }
        ui.add_space(12.0);
    }

    if state.conference.items.is_empty() && !state.conference.loading {
        ui.colored_label(colors::TEXT_SECONDARY, "No conference papers match.");
        return;
    }

    let mut open: Option<RecordId> = None;
    for paper in &state.conference.items {
        if paper_row(ui, paper) {
            open = Some(paper.id.clone());
        }
        ui.add_space(6.0);
    }
    if let Some(id) = open {
        state.open_conference_paper(id);
    }
}

/// Returns whether "Open" was clicked.
fn paper_row(ui: &mut egui::Ui, paper: &ConferencePaper) -> bool {
    let mut clicked = false;
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&paper.title).size(16.0).strong());
                ui.horizontal_wrapped(|ui| {
                    if let Some(track) = &paper.track {
                        ui.colored_label(colors::INFO, track);
                    }
                    ui.colored_label(colors::TEXT_SECONDARY, paper.author_line());
                });
                if !paper.tags.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for tag in &paper.tags {
                            tag_chip(ui, tag);
                        }
                    });
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Open").clicked() {
                    clicked = true;
                }
            });
        });
    });
    clicked
}

/// Returns whether the card was closed.
fn render_selected(ui: &mut egui::Ui, paper: &ConferencePaper) -> bool {
    let mut closed = false;
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&paper.title).size(18.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖").clicked() {
                    closed = true;
                }
                if let Some(link) = paper.pdf_link.as_deref().filter(|l| !l.is_empty()) {
                    ui.hyperlink_to("PDF", link);
                }
            });
        });
        ui.colored_label(colors::TEXT_SECONDARY, paper.author_line());
        if let Some(score) = paper.similarity_score {
            ui.colored_label(colors::TEXT_SECONDARY, format!("Similarity {:.0}%", score * 100.0));
        }
        if let Some(abstract_text) = paper.abstract_text.as_deref().filter(|a| !a.is_empty()) {
            ui.add_space(6.0);
            styles::section_heading(ui, "Abstract");
            ui.label(abstract_text);
        }
        for (heading, items) in [("Innovations", &paper.innovations), ("Research gaps", &paper.gaps)] {
            if items.is_empty() {
                continue;
            }
            ui.add_space(6.0);
            styles::section_heading(ui, heading);
            for item in items {
                ui.label(format!("• {item}"));
            }
        }
        if !paper.experiments.is_null() {
            ui.add_space(6.0);
            styles::section_heading(ui, "Suggested experiments");
            let text = serde_json::to_string_pretty(&paper.experiments)
                .unwrap_or_else(|_| paper.experiments.to_string());
            ui.label(egui::RichText::new(text).monospace());
        }
    });
    closed
}
