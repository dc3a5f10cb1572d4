use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::{AppState, DetailView};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::papers_view::tag_chip;
use crate::shared::models::{Comment, PaperAnalysis, RecordId};

/// Clicks collected while the detail state is borrowed for rendering.
enum DetailAction {
    RemoveTag(String),
    DeleteComment(RecordId),
    SendReply,
    Open(RecordId),
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState, id: RecordId, analysis_focus: bool) {
    let Some(paper) = state.detail.paper.clone() else {
        ui.horizontal(|ui| {
            if state.detail.loading {
                ui.spinner();
                ui.label("Loading paper...");
            } else {
                ui.colored_label(colors::TEXT_SECONDARY, "This paper could not be loaded.");
                if ui.button("Back to papers").clicked() {
                    state.navigate(Route::Papers);
                }
            }
        });
        return;
    };

    ui.horizontal(|ui| {
        let star = if paper.is_favorite { "★" } else { "☆" };
        if ui
            .add(egui::Button::new(egui::RichText::new(star).size(22.0).color(colors::FAVORITE)).frame(false))
            .clicked()
        {
            state.toggle_favorite(id.clone(), paper.is_favorite);
        }
        ui.heading(&paper.title);
        ui.colored_label(styles::status_color(paper.status), paper.status.label());
        if state.detail.loading {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🗑 Delete").clicked() {
                state.delete_paper(id.clone());
            }
            if ui.button("✏ Edit").clicked() {
                state.navigate(Route::EditPaper(id.clone()));
            }
            if analysis_focus {
                if ui.button("Paper").clicked() {
                    state.navigate(Route::PaperDetail(id.clone()));
                }
            } else if ui.button("🔬 Analysis").clicked() {
                state.navigate(Route::PaperAnalysis(id.clone()));
            }
        });
    });
    ui.add_space(10.0);

    if analysis_focus {
        render_analysis(ui, state, &id);
        ui.add_space(10.0);
        render_experiments(ui, state, &id);
        ui.add_space(10.0);
        render_similar(ui, state, &id);
        ui.add_space(10.0);
        render_optimization(ui, state, &id);
        return;
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        egui::Grid::new("paper_meta").num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
            let rows = [
                ("Authors", paper.authors.clone()),
                ("Conference", paper.conference.clone()),
                ("Year", paper.year.map(|y| y.to_string())),
                ("DOI", paper.doi.clone()),
                ("Keywords", (!paper.keywords.is_empty()).then(|| paper.keywords.join(", "))),
            ];
            for (label, value) in rows {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    ui.colored_label(colors::TEXT_SECONDARY, label);
                    ui.label(value);
                    ui.end_row();
                }
            }
        });
        if let Some(abstract_text) = paper.abstract_text.as_deref().filter(|a| !a.is_empty()) {
            ui.add_space(8.0);
            styles::section_heading(ui, "Abstract");
            ui.label(abstract_text);
        }
    });
    ui.add_space(10.0);

    let mut actions = Vec::new();

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Tags");
        ui.horizontal_wrapped(|ui| {
            for tag in &paper.tags {
                tag_chip(ui, &tag.name);
                if ui.small_button("✕").on_hover_text("Remove tag").clicked() {
                    actions.push(DetailAction::RemoveTag(tag.name.clone()));
                }
            }
        });
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.detail.new_tag)
                    .hint_text("new tag")
                    .desired_width(160.0),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add tag").clicked() || enter {
                state.add_tag(id.clone());
            }
        });
    });
    ui.add_space(10.0);

    render_share(ui, state, &id);
    ui.add_space(10.0);
    render_submission(ui, state, &id);
    ui.add_space(10.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        let DetailView {
            comments,
            new_comment,
            reply_to,
            reply_text,
            ..
        } = &mut state.detail;
        let count: usize = comments.iter().map(Comment::thread_len).sum();
        styles::section_heading(ui, &format!("Comments ({count})"));

        for comment in comments.iter() {
            comment_block(ui, comment, 0, reply_to, reply_text, &mut actions);
        }

        ui.add_space(6.0);
        ui.add(
            egui::TextEdit::multiline(new_comment)
                .hint_text("Write a comment...")
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
        if ui.button("Post comment").clicked() {
            state.add_comment(id.clone());
        }
    });

    for action in actions {
        match action {
            DetailAction::RemoveTag(tag) => state.remove_tag(id.clone(), tag),
            DetailAction::DeleteComment(comment) => state.delete_comment(id.clone(), comment),
            DetailAction::SendReply => state.reply_comment(id.clone()),
            DetailAction::Open(other) => state.open_paper(other),
        }
    }
}

fn comment_block(
    ui: &mut egui::Ui,
    comment: &Comment,
    depth: usize,
    reply_to: &mut Option<RecordId>,
    reply_text: &mut String,
    actions: &mut Vec<DetailAction>,
) {
    ui.horizontal(|ui| {
        ui.add_space(depth as f32 * 24.0);
        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(comment.author.as_deref().unwrap_or("anonymous")).strong());
                if let Some(created) = comment.created_at {
                    ui.colored_label(colors::TEXT_SECONDARY, created.format("%Y-%m-%d %H:%M").to_string());
                }
                if ui.small_button("Reply").clicked() {
                    *reply_to = Some(comment.id.clone());
                    reply_text.clear();
                }
                if ui.small_button("Delete").clicked() {
                    actions.push(DetailAction::DeleteComment(comment.id.clone()));
                }
            });
            ui.label(&comment.content);

            if reply_to.as_ref() == Some(&comment.id) {
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(reply_text).hint_text("Reply...").desired_width(260.0));
                    if ui.button("Send").clicked() {
                        actions.push(DetailAction::SendReply);
                    }
                    if ui.button("Cancel").clicked() {
                        *reply_to = None;
                    }
                });
            }
        });
    });
    ui.add_space(4.0);

    for reply in &comment.replies {
        comment_block(ui, reply, depth + 1, reply_to, reply_text, actions);
    }
}

fn analysis_sections(ui: &mut egui::Ui, analysis: &PaperAnalysis) {
    if !analysis.keywords.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for keyword in &analysis.keywords {
                tag_chip(ui, keyword);
            }
        });
    }
    for (title, body) in analysis.sections() {
        ui.add_space(6.0);
        ui.label(egui::RichText::new(title).strong());
        ui.label(body);
    }
    if !analysis.innovation_points.is_empty() {
        ui.add_space(6.0);
        ui.label(egui::RichText::new("Innovation points").strong());
        for point in &analysis.innovation_points {
            ui.label(format!("• {point}"));
        }
    }
}

fn render_analysis(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            styles::section_heading(ui, "Analysis");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚡ Quick analyze").clicked() {
                    state.quick_analyze(id.clone());
                }
                let label = if state.detail.analysis.is_some() { "Re-run analysis" } else { "Run analysis" };
                if ui.button(label).clicked() {
                    state.create_analysis(id.clone());
                }
            });
        });

        match &state.detail.analysis {
            Some(analysis) => analysis_sections(ui, analysis),
            None => {
                ui.colored_label(colors::TEXT_SECONDARY, "This paper has not been analyzed yet.");
            }
        }

        if !state.detail.quick_results.is_empty() {
            ui.separator();
            for result in &state.detail.quick_results {
                ui.label(egui::RichText::new(&result.kind).strong());
                ui.label(&result.content);
                ui.add_space(4.0);
            }
        }
    });
}

fn render_experiments(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Experiments");
        ui.colored_label(colors::TEXT_SECONDARY, "Parameters as a JSON object, e.g. {\"epochs\": 10}");
        ui.add(
            egui::TextEdit::multiline(&mut state.detail.experiment_params)
                .code_editor()
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if ui.button("▶ Run experiments").clicked() {
            state.run_experiments(id.clone());
        }

        for result in &state.detail.experiments {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(&result.name).strong());
            egui::Grid::new(("experiment", result.id.to_string()))
                .num_columns(2)
                .show(ui, |ui| {
                    for (metric, value) in &result.metrics {
                        ui.colored_label(colors::TEXT_SECONDARY, metric);
                        ui.label(format!("{value:.4}"));
                        ui.end_row();
                    }
                });
        }
    });
}

fn render_optimization(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            styles::section_heading(ui, "Writing suggestions");
            if ui.button("✨ Optimize structure").clicked() {
                state.optimize_paper(id.clone());
            }
        });
        match &state.detail.optimization {
            None => {
                ui.colored_label(colors::TEXT_SECONDARY, "No suggestions requested yet.");
            }
            Some(serde_json::Value::String(text)) => {
                ui.label(text);
            }
            Some(value) => {
                let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                ui.label(egui::RichText::new(text).monospace());
            }
        }
    });
}

fn render_similar(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    let mut open = None;
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal(|ui| {
            styles::section_heading(ui, "Similar papers");
            if ui.button("Find similar").clicked() {
                state.load_similar(id.clone());
            }
        });
        for paper in &state.detail.similar {
            if ui.link(&paper.title).clicked() {
                open = Some(DetailAction::Open(paper.id.clone()));
            }
        }
    });
    if let Some(DetailAction::Open(other)) = open {
        state.open_paper(other);
    }
}

fn render_share(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Sharing");
        match state.detail.share.clone() {
            Some(link) => {
                ui.horizontal(|ui| {
                    ui.label(&link.share_link);
                    if ui.button("📋 Copy").clicked() {
                        ui.ctx().copy_text(link.share_link.clone());
                    }
                    if ui.button("Stop sharing").clicked() {
                        state.unshare_paper(id.clone());
                    }
                });
                if let Some(expires) = link.expires_at {
                    ui.colored_label(colors::TEXT_SECONDARY, format!("Expires {}", expires.format("%Y-%m-%d")));
                }
            }
            None => {
                ui.horizontal(|ui| {
                    ui.label("Expires in days:");
                    ui.add(egui::TextEdit::singleline(&mut state.detail.share_days).desired_width(50.0));
                    if ui.button("🔗 Create share link").clicked() {
                        state.share_paper(id.clone());
                    }
                });
            }
        }
    });
}

fn render_submission(ui: &mut egui::Ui, state: &mut AppState, id: &RecordId) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Submission");
        let submission = &mut state.detail.submission;
        egui::Grid::new("submission_form").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("Conference");
            ui.text_edit_singleline(&mut submission.conference);
            ui.end_row();
            ui.label("Track");
            ui.text_edit_singleline(&mut submission.track);
            ui.end_row();
            ui.label("Keywords");
            ui.text_edit_singleline(&mut submission.keywords);
            ui.end_row();
        });
        ui.add(
            egui::TextEdit::multiline(&mut submission.abstract_text)
                .hint_text("Abstract")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("💡 Suggest conference").clicked() {
                state.suggest_conference(id.clone());
            }
            if ui.button("📨 Submit").clicked() {
                state.submit_paper(id.clone());
            }
        });

        if let Some(suggestion) = &state.detail.suggestion {
            let text = serde_json::to_string_pretty(suggestion).unwrap_or_else(|_| suggestion.to_string());
            ui.add_space(6.0);
            ui.label(egui::RichText::new(text).monospace());
        }
    });
}
