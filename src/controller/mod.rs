//! Controller access for the overlay
//!
//! ```text
//! gilrs ──► GilrsAxisSource ─┐
//!                            ├──► dyn AxisSource ──► overlay
//!           NeutralAxisSource┘
//! ```
//!
//! The adapter is chosen once at startup by [`open_axis_source`].

pub mod axis_source;
pub mod gilrs_source;

pub use axis_source::{AxisError, AxisSource, DeviceInfo, NeutralAxisSource, NEUTRAL};
pub use gilrs_source::{GilrsAxisSource, GilrsSourceError};

use tracing::warn;

/// Opens the live adapter, falling back to neutral values when no device is usable
pub fn open_axis_source() -> Box<dyn AxisSource> {
    match GilrsAxisSource::create() {
        Ok(source) => Box::new(source),
        Err(e) => {
            warn!("{}, overlay will show the not-connected notice", e);
            Box::new(NeutralAxisSource)
        }
    }
}
