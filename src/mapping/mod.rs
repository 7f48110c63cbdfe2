//! Axis-to-role mapping and the interactive binding state machine
//!
//! [`AxisMapping`] is the single source of truth for which physical axis feeds
//! which role. [`BindingState`] is the only writer and lives in the overlay
//! session.

pub mod axis_mapping;
pub mod binding;

pub use axis_mapping::{AxisMapping, AxisRole, InversionFlags};
pub use binding::{BindingInput, BindingState};
