use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 80.0;

fn field_row(ui: &mut egui::Ui, offset: f32, label: &str, value: &mut String, password: bool) -> egui::Response {
    ui.horizontal(|ui| {
        ui.add_space(offset);
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value)
                .password(password)
                .text_color(colors::TEXT_DARK),
        )
    })
    .inner
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let is_register = state.route == Route::Register;

    let available_rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(available_rect, 0.0, colors::BG_DARK);

    ui.scope_builder(egui::UiBuilder::new().max_rect(available_rect), |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if is_register { 380.0 } else { 290.0 };
            let top_space = (available_rect.height() - total_height).max(0.0) / 2.0;
            ui.add_space(top_space);

            ui.label(egui::RichText::new("📄 Paper Killer").size(32.0).strong().color(colors::TEXT_LIGHT));
            ui.add_space(20.0);

            ui.label(
                egui::RichText::new(if is_register { "Create Account" } else { "Welcome Back" })
                    .size(24.0)
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            if let Some(ref error) = state.auth_form.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            let offset = ((available_rect.width() - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0);
            let form = &mut state.auth_form;

            if is_register {
                field_row(ui, offset, "Username:", &mut form.username, false);
                ui.add_space(8.0);
            }
            field_row(ui, offset, "Email:", &mut form.email, false);
            ui.add_space(8.0);
            let password = field_row(ui, offset, "Password:", &mut form.password, true);
            ui.add_space(8.0);
            let mut submit_on_enter = !is_register
                && password.lost_focus()
                && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if is_register {
                let confirm = field_row(ui, offset, "Confirm:", &mut form.confirm_password, true);
                ui.add_space(8.0);
                submit_on_enter = confirm.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.colored_label(
                    colors::TEXT_SECONDARY,
                    "Password: 8+ characters with upper and lower case, a digit and one of @$!%*?&",
                );
            }

            ui.add_space(20.0);

            let loading = state.auth_form.loading;
            ui.horizontal(|ui| {
                let button_width = 120.0;
                let total_buttons_width = button_width * 2.0 + 10.0;
                ui.add_space(((available_rect.width() - total_buttons_width) / 2.0).max(0.0));

                let submit = ui.add_enabled(
                    !loading,
                    egui::Button::new(
                        egui::RichText::new(if is_register { "Sign Up" } else { "Login" }).color(colors::TEXT_LIGHT),
                    )
                    .fill(colors::ACCENT)
                    .min_size(egui::vec2(button_width, 32.0)),
                );
                if (submit.clicked() || submit_on_enter) && !loading {
                    if is_register {
                        state.handle_register();
                    } else {
                        state.handle_login();
                    }
                }

                ui.add_space(10.0);

                if ui
                    .add_sized(
                        [button_width, 32.0],
                        egui::Button::new(
                            egui::RichText::new(if is_register { "Back to Login" } else { "Create Account" })
                                .color(colors::TEXT_SECONDARY),
                        ),
                    )
                    .clicked()
                {
                    state.toggle_auth_mode();
                }
            });

            if loading {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space(((available_rect.width() - 100.0) / 2.0).max(0.0));
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
            }
        });
    });
}
