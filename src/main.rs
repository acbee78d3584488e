//! Entry/Exit Chart - Entries vs Exits Bar Chart Viewer
//!
//! A Rust application that compares two monthly series as side-by-side bars
//! scaled against their shared maximum.

mod charts;
mod config;
mod data;
mod gui;

use anyhow::anyhow;
use config::ChartConfig;
use eframe::egui;
use gui::ChartApp;
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Starting Entry/Exit Chart");

    let config = ChartConfig::discover();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([700.0, 450.0])
            .with_title("Entry/Exit Chart"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Entry/Exit Chart",
        options,
        Box::new(|cc| Ok(Box::new(ChartApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Failed to run window: {}", e))
}
