use eframe::egui;

use crate::client::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);

        ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("📄 Paper Killer").size(48.0).strong());
        ui.add_space(10.0);
        ui.colored_label(
            colors::TEXT_SECONDARY,
            egui::RichText::new("Manage, analyze and share your research papers").size(18.0),
        );
        ui.add_space(40.0);

        let authenticated = state.is_authenticated();
        let (primary_label, primary_route) = if authenticated {
            ("Go to dashboard", Route::Dashboard)
        } else {
            ("Login", Route::Login)
        };

        let primary = egui::Button::new(egui::RichText::new(primary_label).size(20.0).color(colors::TEXT_LIGHT))
            .min_size(egui::vec2(220.0, 50.0))
            .fill(colors::ACCENT);
        if ui.add(primary).clicked() {
            state.navigate(primary_route);
        }
        ui.add_space(15.0);

        if !authenticated {
            let register = egui::Button::new(egui::RichText::new("Create account").size(20.0))
                .min_size(egui::vec2(220.0, 50.0));
            if ui.add(register).clicked() {
                state.navigate(Route::Register);
            }
            ui.add_space(15.0);
        }

        let browse = egui::Button::new(egui::RichText::new("Browse ICLR 2025").size(16.0))
            .min_size(egui::vec2(220.0, 40.0));
        if ui.add(browse).clicked() {
            state.navigate(Route::Conference);
        }
    });
}
