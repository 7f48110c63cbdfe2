//! # Overlay
//!
//! The chroma-keyed window and the frame loop that drives it.
//!
//! One frame is strictly sequential on the UI thread:
//!
//! ```text
//! key events ──► OverlaySession::apply ──► AxisSource::poll ──► OverlayRenderer::render
//!                (toggles, binding,                                    │
//!                 mapping)                                             ▼
//!                                                     repaint after the frame interval
//! ```
//!
//! The only other activity is the keep-on-top task in [`window`], which shares
//! nothing with the frame loop.

pub mod common;
pub mod error;
pub mod input;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod window;

use chrono::{DateTime, Local};
use eframe::egui::{self, CentralPanel, Frame, ViewportCommand};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::OverlayConfig;
use crate::controller::AxisSource;

pub use error::OverlayError;
use input::commands_from_events;
use renderer::{FrameState, OverlayRenderer};
use session::OverlaySession;
use surface::EguiSurface;

/// Frame counter logged on a fixed interval
struct FrameStats {
    frames: u64,
    last_log_time: DateTime<Local>,
    log_interval: chrono::Duration,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            last_log_time: Local::now(),
            log_interval: chrono::Duration::seconds(10),
        }
    }

    fn record_frame(&mut self) {
        self.frames += 1;

        let now = Local::now();
        if now - self.last_log_time > self.log_interval {
            info!(
                "Overlay stats: painted {} frames in last {} seconds (avg {:.2}/sec)",
                self.frames,
                self.log_interval.num_seconds(),
                self.frames as f64 / self.log_interval.num_seconds() as f64
            );
            self.frames = 0;
            self.last_log_time = now;
        }
    }
}

pub struct OverlayApp {
    session: OverlaySession,
    source: Box<dyn AxisSource>,
    renderer: OverlayRenderer,
    frame_interval: Duration,
    stats: FrameStats,

    // Cancels the keep-on-top task when the window goes away
    keep_on_top: CancellationToken,
}

impl OverlayApp {
    pub fn new(
        config: &OverlayConfig,
        source: Box<dyn AxisSource>,
        keep_on_top: CancellationToken,
    ) -> Self {
        info!(
            "Creating overlay ({}x{}, {} fps, controller {})",
            config.window_width,
            config.window_height,
            config.frame_rate,
            if source.is_connected() {
                "connected"
            } else {
                "not connected"
            }
        );
        Self {
            session: OverlaySession::new(config.invert),
            source,
            renderer: OverlayRenderer::new(config),
            frame_interval: config.frame_interval(),
            stats: FrameStats::new(),
            keep_on_top,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let events = ctx.input(|i| i.events.clone());
        for command in commands_from_events(&events) {
            self.session.apply(command);
        }

        if self.session.quit_requested() {
            debug!("Closing overlay window");
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.renderer.chroma().to_normalized_gamma_f32()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.source.poll();

        CentralPanel::default()
            .frame(Frame::new())
            .show(ctx, |ui| {
                let mut surface = EguiSurface::new(ui.painter().clone(), ui.max_rect());
                self.renderer.render(
                    &mut surface,
                    &FrameState {
                        session: &self.session,
                        source: self.source.as_ref(),
                    },
                );
            });

        self.stats.record_frame();
        ctx.request_repaint_after(self.frame_interval);
    }
}

impl Drop for OverlayApp {
    fn drop(&mut self) {
        self.keep_on_top.cancel();
        info!("Overlay closed, controller and window released");
    }
}
