use eframe::egui;

use crate::client::{Guarded, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod auth_view;
pub mod conference_view;
pub mod dashboard_view;
pub mod files_view;
pub mod home_view;
pub mod paper_detail_view;
pub mod paper_form_view;
pub mod papers_view;
pub mod profile_view;
pub mod upload_view;
pub mod write_paper_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = ui.add(
                    egui::Label::new(
                        egui::RichText::new("📄 Paper Killer")
                            .size(18.0)
                            .strong()
                            .color(colors::TEXT_LIGHT),
                    )
                    .sense(egui::Sense::click()),
                );
                if title.clicked() {
                    state.navigate(Route::Home);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.is_authenticated() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                            return;
                        }
                        let name = state
                            .current_user
                            .as_ref()
                            .and_then(|user| user.display_name())
                            .unwrap_or("Signed in")
                            .to_string();
                        ui.colored_label(colors::TEXT_LIGHT, name);
                    } else {
                        if ui.button("Register").clicked() {
                            state.navigate(Route::Register);
                        }
                        if ui.button("Login").clicked() {
                            state.navigate(Route::Login);
                        }
                    }
                });
            });

            if let Some(notice) = &state.notice {
                ui.add_space(4.0);
                ui.colored_label(styles::notice_color(notice.kind), &notice.text);
            }
        });
}

/// Navigation for signed-in users.
pub fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    if !state.is_authenticated() {
        return;
    }

    egui::SidePanel::left("nav_panel")
        .resizable(false)
        .exact_width(170.0)
        .frame(styles::sidebar_frame())
        .show(ctx, |ui| {
            let entries = [
                ("🏠 Dashboard", Route::Dashboard),
                ("📚 Papers", Route::Papers),
                ("➕ New paper", Route::NewPaper),
                ("⬆ Upload", Route::Upload),
                ("🗄 Files", Route::Files),
                ("🎓 ICLR 2025", Route::Conference),
                ("👤 Profile", Route::Profile),
            ];
            for (label, route) in entries {
                let selected = state.route == route;
                let text = egui::RichText::new(label).color(colors::TEXT_LIGHT);
                let button = egui::Button::new(text)
                    .fill(if selected { colors::SELECTED_ITEM } else { colors::SIDEBAR_BG })
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(button).clicked() && !selected {
                    state.navigate(route);
                }
            }
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let route = state.route.clone();
    let frame = match route {
        Route::Home | Route::Login | Route::Register => {
            egui::Frame::default().fill(colors::BG_DARK)
        }
        _ => styles::content_frame(),
    };

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        if !route.is_protected() {
            match route {
                Route::Login | Route::Register => auth_view::render(ui, state),
                Route::Conference | Route::WritePaper => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            if route == Route::Conference {
                                conference_view::render(ui, state);
                            } else {
                                write_paper_view::render(ui, state);
                            }
                        });
                }
                _ => home_view::render(ui, state),
            }
            return;
        }

        // The guard already ran this frame; this covers a session dropped
        // mid-frame by a click handler.
        match state.guard().protect(route) {
            Guarded::RedirectToLogin => auth_view::render(ui, state),
            Guarded::View(route) => egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match route {
                    Route::Dashboard => dashboard_view::render(ui, state),
                    Route::Papers => papers_view::render(ui, state),
                    Route::NewPaper => paper_form_view::render(ui, state, None),
                    Route::EditPaper(id) => paper_form_view::render(ui, state, Some(id)),
                    Route::Upload => upload_view::render(ui, state),
                    Route::PaperDetail(id) => paper_detail_view::render(ui, state, id, false),
                    Route::PaperAnalysis(id) => paper_detail_view::render(ui, state, id, true),
                    Route::Profile => profile_view::render(ui, state),
                    Route::Files => files_view::render(ui, state),
                    Route::Home
                    | Route::Login
                    | Route::Register
                    | Route::Conference
                    | Route::WritePaper => {}
                })
                .inner,
        }
    });
}
