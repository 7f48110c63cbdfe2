//! Capability interface for reading controller axes by index
//!
//! Every failure stops at this boundary: [`AxisSource::read`] logs the error and
//! hands back the neutral value so a frame is never interrupted by the device.

use tracing::{trace, warn};

/// Value reported for any axis that cannot be read
pub const NEUTRAL: f32 = 0.0;

/// Metadata shown in the debug block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: String,
    pub axis_count: usize,
    pub button_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AxisError {
    #[error("No controller attached")]
    NoDevice,

    #[error("Axis {index} is outside the device range (0..{count})")]
    OutOfRange { index: usize, count: usize },

    #[error("Axis {0} is not provided by this device")]
    Absent(usize),

    #[error("Failed to read axis {index}: {reason}")]
    Unreadable { index: usize, reason: String },
}

/// Source of live axis values
pub trait AxisSource {
    /// Whether a controller is currently attached
    fn is_connected(&self) -> bool;

    /// Number of addressable axis indices; reads at or past it fail
    fn axis_count(&self) -> usize;

    fn device_info(&self) -> Option<DeviceInfo>;

    /// Reads the raw value of one axis
    fn try_read(&self, axis_index: usize) -> Result<f32, AxisError>;

    /// Pulls pending device events so the next reads see fresh values
    fn poll(&mut self) {}

    /// Reads one axis, degrading every failure to [`NEUTRAL`]
    fn read(&self, axis_index: usize) -> f32 {
        match self.try_read(axis_index) {
            Ok(value) => sanitize(value),
            Err(e @ AxisError::Unreadable { .. }) => {
                warn!("{}", e);
                NEUTRAL
            }
            Err(e) => {
                trace!("{}", e);
                NEUTRAL
            }
        }
    }
}

/// Clamps a device value into [-1.0, 1.0], mapping NaN to neutral
pub fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        NEUTRAL
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Adapter used when no controller was found at startup
#[derive(Debug, Default)]
pub struct NeutralAxisSource;

impl AxisSource for NeutralAxisSource {
    fn is_connected(&self) -> bool {
        false
    }

    fn axis_count(&self) -> usize {
        0
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        None
    }

    fn try_read(&self, _axis_index: usize) -> Result<f32, AxisError> {
        Err(AxisError::NoDevice)
    }
}

/// Fixed-value adapter for exercising the overlay without hardware
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedAxisSource {
    pub values: Vec<f32>,
    pub info: DeviceInfo,
    // Indices that report a read failure instead of a value
    pub failing: Vec<usize>,
}

#[cfg(test)]
impl FixedAxisSource {
    pub fn new(values: Vec<f32>) -> Self {
        let axis_count = values.len();
        Self {
            values,
            info: DeviceInfo {
                name: "Test Pad".to_string(),
                axis_count,
                button_count: 12,
            },
            failing: Vec::new(),
        }
    }
}

#[cfg(test)]
impl AxisSource for FixedAxisSource {
    fn is_connected(&self) -> bool {
        true
    }

    fn axis_count(&self) -> usize {
        self.values.len()
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        Some(self.info.clone())
    }

    fn try_read(&self, axis_index: usize) -> Result<f32, AxisError> {
        if self.failing.contains(&axis_index) {
            return Err(AxisError::Unreadable {
                index: axis_index,
                reason: "simulated failure".to_string(),
            });
        }
        self.values
            .get(axis_index)
            .copied()
            .ok_or(AxisError::OutOfRange {
                index: axis_index,
                count: self.values.len(),
            })
    }
}
