//! Periodic always-on-top re-assertion
//!
//! The task only talks to the window manager through a [`WindowPlacer`]. It
//! never sees the session, so nothing is shared with the frame loop.

use super::error::OverlayError;
use eframe::egui::{self, ViewportCommand, WindowLevel};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub trait WindowPlacer: Send + 'static {
    fn keep_on_top(&self) -> Result<(), OverlayError>;
}

/// Raises the root eframe viewport
pub struct EguiWindowPlacer {
    ctx: egui::Context,
}

impl EguiWindowPlacer {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl WindowPlacer for EguiWindowPlacer {
    fn keep_on_top(&self) -> Result<(), OverlayError> {
        let minimized = self
            .ctx
            .input(|i| i.viewport().minimized.unwrap_or(false));
        if minimized {
            return Err(OverlayError::WindowPlacement(
                "window is minimized".to_string(),
            ));
        }

        self.ctx
            .send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        self.ctx.request_repaint();
        Ok(())
    }
}

/// Spawns the keep-on-top task; the first placement happens immediately
pub fn spawn_keep_on_top<P: WindowPlacer>(
    placer: P,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    info!("Starting keep-on-top task every {:?}", period);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Keep-on-top task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = placer.keep_on_top() {
                        warn!("{}, retrying in {:?}", e, period);
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingPlacer {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl WindowPlacer for CountingPlacer {
        fn keep_on_top(&self) -> Result<(), OverlayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(OverlayError::WindowPlacement("denied".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn places_immediately_and_repeats() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_keep_on_top(
            CountingPlacer {
                calls: calls.clone(),
                fail: false,
            },
            Duration::from_millis(10),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(80)).await;
        cancel.cancel();
        handle.await.unwrap();
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn failures_are_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_keep_on_top(
            CountingPlacer {
                calls: calls.clone(),
                fail: true,
            },
            Duration::from_millis(10),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!handle.is_finished());
        cancel.cancel();
        handle.await.unwrap();
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn cancellation_stops_placing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let handle = spawn_keep_on_top(
            CountingPlacer {
                calls: calls.clone(),
                fail: false,
            },
            Duration::from_secs(3600),
            cancel,
        );
        handle.await.unwrap();
        assert!(calls.load(Ordering::SeqCst) <= 1);
    }
}
