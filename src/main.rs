// src/main.rs
use eframe::egui;
use anyhow::Result;
use tracing::{info, warn};

mod app;
mod calc;
mod config;
mod file;
mod logging;
mod state;
mod ui;
mod utils;

use crate::app::FinCalcApp;
use crate::config::Settings;
use crate::state::AppState;

fn main() -> Result<()> {
    logging::init_tracing();

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("Using default settings: {:#}", e);
        Settings::default()
    });
    info!(storage_dir = %settings.storage_dir.display(), "starting FinCalc Pro");

    let state = AppState::new(settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_title("FinCalc Pro"),
        ..Default::default()
    };

    eframe::run_native(
        "FinCalc Pro",
        options,
        Box::new(move |_cc| Box::new(FinCalcApp::new(state))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
