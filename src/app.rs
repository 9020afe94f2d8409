use std::time::Instant;

use eframe::egui;

use crate::config::ChartConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HallOfFameApp {
    pub state: AppState,
}

impl HallOfFameApp {
    /// Build the app and load the configured dataset.
    pub fn new(config: ChartConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load_path(&path, Instant::now());
        Self { state }
    }
}

impl eframe::App for HallOfFameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.tick(now);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, now);
        });

        // ---- Left side panel: category, legend, annotation ----
        egui::SidePanel::left("category_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, now);
            });

        // ---- Bottom panel: per-year table ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("year_table")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    table::year_table(ui, &self.state);
                });
        }

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::diverging_plot(ui, &self.state, now);
        });

        if let Some(after) = self.state.next_repaint(now) {
            ctx.request_repaint_after(after);
        }
    }
}
