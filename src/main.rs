mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::DashboardState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve();

    // The dataset must be present before any window opens.
    let table = data::loader::load_launch_data(&config.data_path)
        .inspect_err(|e| log::error!("Startup load failed: {e}"))
        .context("loading launch records")?;
    let state = DashboardState::new(table, Some(config.data_path.clone()), config.slider);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
