//! Paper Killer desktop app - main entry point.

use std::time::Duration;

use eframe::egui;
use paper_killer::egui_app::theme::styles;
use paper_killer::egui_app::{views, AppState};
use paper_killer::shared::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,paper_killer=debug")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Paper Killer",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            let config = AppConfig::load().inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;
            let state = AppState::new(config).inspect_err(|e| tracing::error!(error = %e, "startup failed"))?;
            Ok(Box::new(PaperKillerApp { state }))
        }),
    )
}

/// Main application state
struct PaperKillerApp {
    state: AppState,
}

impl eframe::App for PaperKillerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick();

        views::render_top_bar(ctx, &mut self.state);
        views::render_sidebar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
