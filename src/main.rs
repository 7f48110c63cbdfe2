pub mod config;
pub mod controller;
pub mod mapping;
pub mod overlay;

use crate::config::OverlayConfig;
use crate::overlay::window::{spawn_keep_on_top, EguiWindowPlacer};
use crate::overlay::OverlayApp;
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = OverlayConfig::default_path();
    let config = OverlayConfig::load_or_default(&config_path).await;

    info!("Looking for a controller");
    let axis_source = controller::open_axis_source();

    let keep_on_top = CancellationToken::new();
    let placement_period = Duration::from_millis(config.keep_on_top_interval_ms);

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("Controller Overlay")
        .with_inner_size([config.window_width as f32, config.window_height as f32])
        .with_position([config.window_x as f32, config.window_y as f32])
        .with_decorations(false)
        .with_resizable(false)
        .with_always_on_top();

    info!("Starting overlay window");
    let token = keep_on_top.clone();
    eframe::run_native(
        "Controller Overlay",
        native_options,
        Box::new(move |cc| {
            let _placement = spawn_keep_on_top(
                EguiWindowPlacer::new(cc.egui_ctx.clone()),
                placement_period,
                token.clone(),
            );
            Ok(Box::new(OverlayApp::new(&config, axis_source, token)))
        }),
    )
    .map_err(|e| eyre!("Failed to create overlay window: {}", e))?;

    keep_on_top.cancel();
    info!("Overlay exited");
    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
