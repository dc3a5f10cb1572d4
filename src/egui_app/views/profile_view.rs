use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.heading("Profile");
        if state.profile.loading {
            ui.spinner();
        }
    });
    ui.add_space(8.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        match &state.profile.user {
            Some(user) => {
                egui::Grid::new("profile_info").num_columns(2).spacing([12.0, 4.0]).show(ui, |ui| {
                    ui.colored_label(colors::TEXT_SECONDARY, "Username");
                    ui.label(user.username.as_deref().unwrap_or("-"));
                    ui.end_row();
                    ui.colored_label(colors::TEXT_SECONDARY, "Email");
                    ui.label(user.email.as_deref().unwrap_or("-"));
                    ui.end_row();
                });
            }
            None if !state.profile.loading => {
                ui.colored_label(colors::TEXT_SECONDARY, "Profile unavailable.");
            }
            None => {}
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Display name:");
            ui.text_edit_singleline(&mut state.profile.name_input);
            if ui.button("Save").clicked() {
                state.save_profile_name();
            }
        });
    });
    ui.add_space(10.0);

    if let Some(stats) = state.profile.stats {
        styles::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            styles::section_heading(ui, "Activity");
            ui.horizontal_wrapped(|ui| {
                for (label, value) in [
                    ("Papers", stats.total_papers),
                    ("Favorites", stats.favorite_papers),
                    ("Comments", stats.total_comments),
                    ("Tags", stats.total_tags),
                ] {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(value.to_string()).size(22.0).strong().color(colors::ACCENT));
                        ui.colored_label(colors::TEXT_SECONDARY, label);
                    });
                    ui.add_space(24.0);
                }
            });
        });
        ui.add_space(10.0);
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Research interests");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.profile.interests_input)
                    .hint_text("nlp, computer vision, ...")
                    .desired_width(360.0),
            );
            if ui.button("Save interests").clicked() {
                state.save_interests();
            }
        });
    });
    ui.add_space(10.0);

    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        styles::section_heading(ui, "Change password");
        egui::Grid::new("password_form").num_columns(2).spacing([12.0, 6.0]).show(ui, |ui| {
            ui.label("Current");
            ui.add(egui::TextEdit::singleline(&mut state.profile.old_password).password(true));
            ui.end_row();
            ui.label("New");
            ui.add(egui::TextEdit::singleline(&mut state.profile.new_password).password(true));
            ui.end_row();
        });
        if ui.button("Change password").clicked() {
            state.change_password();
        }
    });
}
