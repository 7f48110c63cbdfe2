//! Role → axis-index assignments and the per-role inversion flags
//!
//! The mapping never validates an index against the connected device. An index
//! the device does not provide simply reads as neutral through the
//! [`AxisSource`](crate::controller::AxisSource).

use serde::Deserialize;
use std::fmt;
use tracing::{debug, info};

/// Semantic slot the overlay draws a physical axis into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRole {
    LeftX,
    LeftY,
    RightX,
    /// Also rendered as the throttle bar
    RightY,
}

impl AxisRole {
    pub const ALL: [AxisRole; 4] = [
        AxisRole::LeftX,
        AxisRole::LeftY,
        AxisRole::RightX,
        AxisRole::RightY,
    ];

    /// Axis index assigned to this role after a reset
    pub const fn default_axis(self) -> usize {
        match self {
            AxisRole::LeftX => 0,
            AxisRole::LeftY => 1,
            AxisRole::RightX => 3,
            AxisRole::RightY => 2,
        }
    }

    fn slot(self) -> usize {
        match self {
            AxisRole::LeftX => 0,
            AxisRole::LeftY => 1,
            AxisRole::RightX => 2,
            AxisRole::RightY => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AxisRole::LeftX => "Left X",
            AxisRole::LeftY => "Left Y",
            AxisRole::RightX => "Right X",
            AxisRole::RightY => "Right Y",
        }
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Current role → axis-index assignments
///
/// Every role always carries an index. The only writer is the binding state
/// machine; everything else reads through [`AxisMapping::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisMapping {
    indices: [usize; 4],
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self {
            indices: AxisRole::ALL.map(AxisRole::default_axis),
        }
    }
}

impl AxisMapping {
    pub fn get(&self, role: AxisRole) -> usize {
        self.indices[role.slot()]
    }

    pub fn set(&mut self, role: AxisRole, axis_index: usize) {
        debug!(
            "Mapping {} from axis {} to axis {}",
            role,
            self.get(role),
            axis_index
        );
        self.indices[role.slot()] = axis_index;
    }

    pub fn reset_to_default(&mut self) {
        *self = Self::default();
        info!("Axis mapping reset to defaults");
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Per-role sign inversion, fixed once the overlay starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InversionFlags {
    pub left_x: bool,
    pub left_y: bool,
    pub right_x: bool,
    pub right_y: bool,
}

impl Default for InversionFlags {
    fn default() -> Self {
        Self {
            left_x: false,
            left_y: true,
            right_x: false,
            right_y: true,
        }
    }
}

impl InversionFlags {
    pub fn is_inverted(&self, role: AxisRole) -> bool {
        match role {
            AxisRole::LeftX => self.left_x,
            AxisRole::LeftY => self.left_y,
            AxisRole::RightX => self.right_x,
            AxisRole::RightY => self.right_y,
        }
    }

    /// Applies the role's sign convention to a raw axis value
    pub fn apply(&self, role: AxisRole, value: f32) -> f32 {
        if self.is_inverted(role) {
            -value
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_matches_fixed_layout() {
        let mapping = AxisMapping::default();
        assert_eq!(mapping.get(AxisRole::LeftX), 0);
        assert_eq!(mapping.get(AxisRole::LeftY), 1);
        assert_eq!(mapping.get(AxisRole::RightX), 3);
        assert_eq!(mapping.get(AxisRole::RightY), 2);
    }

    #[test]
    fn set_only_touches_one_role() {
        let mut mapping = AxisMapping::default();
        mapping.set(AxisRole::RightX, 7);
        assert_eq!(mapping.get(AxisRole::RightX), 7);
        assert_eq!(mapping.get(AxisRole::LeftX), 0);
        assert_eq!(mapping.get(AxisRole::LeftY), 1);
        assert_eq!(mapping.get(AxisRole::RightY), 2);
    }

    #[test]
    fn reset_restores_every_role() {
        let mut mapping = AxisMapping::default();
        for (i, role) in AxisRole::ALL.into_iter().enumerate() {
            mapping.set(role, 40 + i);
        }
        assert!(!mapping.is_default());

        mapping.reset_to_default();
        for role in AxisRole::ALL {
            assert_eq!(mapping.get(role), role.default_axis());
        }
        assert!(mapping.is_default());
    }

    #[test]
    fn out_of_range_indices_are_accepted() {
        let mut mapping = AxisMapping::default();
        mapping.set(AxisRole::LeftY, 250);
        assert_eq!(mapping.get(AxisRole::LeftY), 250);
    }

    #[test]
    fn inversion_flips_only_flagged_roles() {
        let flags = InversionFlags::default();
        assert_eq!(flags.apply(AxisRole::LeftX, 0.5), 0.5);
        assert_eq!(flags.apply(AxisRole::LeftY, -0.3), 0.3);
        assert_eq!(flags.apply(AxisRole::RightX, -0.25), -0.25);
        assert_eq!(flags.apply(AxisRole::RightY, 1.0), -1.0);
    }
}
