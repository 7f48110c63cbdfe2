//! Live controller adapter backed by gilrs
//!
//! Axis indices address a fixed slot table so that index `n` means the same
//! physical axis on every platform. The order follows the common joystick
//! layout: both stick axes of the left stick, the left analog Z (throttle on
//! flight sticks), then the right stick and right Z, then the d-pad axes.

use super::axis_source::{AxisError, AxisSource, DeviceInfo};
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

pub const AXIS_SLOTS: [Axis; 8] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::LeftZ,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::RightZ,
    Axis::DPadX,
    Axis::DPadY,
];

const BUTTONS: [Button; 19] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
    Button::DPadUp,
    Button::DPadDown,
    Button::DPadLeft,
    Button::DPadRight,
];

#[derive(Debug, thiserror::Error)]
pub enum GilrsSourceError {
    #[error("Failed to initialize gilrs: {0}")]
    InitializationError(String),

    #[error("No gamepad connected")]
    NoGamepad,
}

pub struct GilrsAxisSource {
    gilrs: Gilrs,
    active_gamepad: GamepadId,
}

impl GilrsAxisSource {
    /// Initializes gilrs and binds to the first connected gamepad
    pub fn create() -> Result<Self, GilrsSourceError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(GilrsSourceError::InitializationError(e.to_string()));
            }
        };

        let active_gamepad = {
            let gamepads: Vec<_> = gilrs.gamepads().collect();
            if gamepads.is_empty() {
                return Err(GilrsSourceError::NoGamepad);
            }

            info!("Found {} gamepads:", gamepads.len());
            for (idx, (id, gamepad)) in gamepads.iter().enumerate() {
                info!("  [{}] ID: {}, Name: {}", idx, id, gamepad.name());
            }
            gamepads[0].0
        };

        let source = Self {
            gilrs,
            active_gamepad,
        };
        if let Some(info) = source.device_info() {
            info!(
                "Selected controller '{}' ({} axes, {} buttons)",
                info.name, info.axis_count, info.button_count
            );
        }
        Ok(source)
    }
}

impl AxisSource for GilrsAxisSource {
    fn is_connected(&self) -> bool {
        self.gilrs.connected_gamepad(self.active_gamepad).is_some()
    }

    fn axis_count(&self) -> usize {
        if self.is_connected() {
            AXIS_SLOTS.len()
        } else {
            0
        }
    }

    fn device_info(&self) -> Option<DeviceInfo> {
        let gamepad = self.gilrs.connected_gamepad(self.active_gamepad)?;
        Some(DeviceInfo {
            name: gamepad.name().to_string(),
            axis_count: AXIS_SLOTS
                .iter()
                .filter(|axis| gamepad.axis_code(**axis).is_some())
                .count(),
            button_count: BUTTONS
                .iter()
                .filter(|button| gamepad.button_code(**button).is_some())
                .count(),
        })
    }

    fn try_read(&self, axis_index: usize) -> Result<f32, AxisError> {
        let gamepad = self
            .gilrs
            .connected_gamepad(self.active_gamepad)
            .ok_or(AxisError::NoDevice)?;
        let axis = AXIS_SLOTS
            .get(axis_index)
            .copied()
            .ok_or(AxisError::OutOfRange {
                index: axis_index,
                count: AXIS_SLOTS.len(),
            })?;

        if gamepad.axis_code(axis).is_none() {
            return Err(AxisError::Absent(axis_index));
        }

        // No data until the axis has reported its first event
        let value = gamepad.axis_data(axis).map(|data| data.value()).unwrap_or(0.0);
        if !value.is_finite() {
            return Err(AxisError::Unreadable {
                index: axis_index,
                reason: format!("{:?} reported {}", axis, value),
            });
        }
        Ok(value)
    }

    fn poll(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if id != self.active_gamepad {
                debug!("Skipping event from non-active gamepad: {:?}", id);
                continue;
            }
            match event {
                EventType::Connected => info!("Controller reconnected"),
                EventType::Disconnected => warn!("Controller disconnected"),
                EventType::AxisChanged(axis, value, _) if value.abs() > 0.5 => {
                    debug!("Axis changed: {:?} = {:.4}", axis, value)
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roles_land_on_expected_slots() {
        use crate::mapping::AxisRole;
        assert_eq!(AXIS_SLOTS[AxisRole::LeftX.default_axis()], Axis::LeftStickX);
        assert_eq!(AXIS_SLOTS[AxisRole::LeftY.default_axis()], Axis::LeftStickY);
        assert_eq!(AXIS_SLOTS[AxisRole::RightX.default_axis()], Axis::RightStickX);
        assert_eq!(AXIS_SLOTS[AxisRole::RightY.default_axis()], Axis::LeftZ);
    }

    #[test]
    fn slots_fit_the_digit_range() {
        assert!(AXIS_SLOTS.len() <= 10);
    }
}
