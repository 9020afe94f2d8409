mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod walkthrough;

use app::HallOfFameApp;
use config::ChartConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ChartConfig::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Hall of Fame – Inductees by Gender",
        options,
        Box::new(|_cc| Ok(Box::new(HallOfFameApp::new(config)))),
    )
}
