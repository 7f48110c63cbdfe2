use thiserror::Error;

/// Failures contained inside the overlay; none of them stop the frame loop
#[derive(Debug, Error)]
pub enum OverlayError {
    /// Re-asserting always-on-top failed, retried on the next tick
    #[error("Window placement failed: {0}")]
    WindowPlacement(String),

    /// A draw call failed, the rest of the frame is skipped
    #[error("Render failed: {0}")]
    Render(String),
}
