//! Per-process overlay state passed explicitly to input handling and rendering

use super::input::Command;
use crate::controller::AxisSource;
use crate::mapping::{AxisMapping, AxisRole, BindingInput, BindingState, InversionFlags};
use tracing::{debug, info};

/// Visibility switches for the auxiliary chrome
///
/// The stick indicators themselves are never behind a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayToggles {
    pub debug: bool,
    pub values: bool,
    pub all_axes: bool,
    pub ui: bool,
}

impl Default for DisplayToggles {
    fn default() -> Self {
        Self {
            debug: true,
            values: true,
            all_axes: false,
            ui: true,
        }
    }
}

#[derive(Debug)]
pub struct OverlaySession {
    mapping: AxisMapping,
    invert: InversionFlags,
    toggles: DisplayToggles,
    binding: BindingState,
    quit_requested: bool,
}

impl OverlaySession {
    pub fn new(invert: InversionFlags) -> Self {
        Self {
            mapping: AxisMapping::default(),
            invert,
            toggles: DisplayToggles::default(),
            binding: BindingState::default(),
            quit_requested: false,
        }
    }

    pub fn mapping(&self) -> &AxisMapping {
        &self.mapping
    }

    pub fn toggles(&self) -> &DisplayToggles {
        &self.toggles
    }

    pub fn binding(&self) -> &BindingState {
        &self.binding
    }

    pub fn binding_active(&self) -> bool {
        self.binding.is_active()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Raw value of the axis behind `role` with the role's inversion applied
    pub fn role_value(&self, role: AxisRole, source: &dyn AxisSource) -> f32 {
        let raw = source.read(self.mapping.get(role));
        self.invert.apply(role, raw)
    }

    pub fn apply(&mut self, command: Command) {
        debug!("Applying {:?}", command);
        match command {
            Command::Quit => {
                info!("Quit requested");
                self.quit_requested = true;
            }
            Command::ToggleDebug => self.toggles.debug = !self.toggles.debug,
            Command::ToggleValues => self.toggles.values = !self.toggles.values,
            Command::ToggleUi => self.toggles.ui = !self.toggles.ui,
            Command::ToggleAllAxes => {
                if self.toggles.ui {
                    self.toggles.all_axes = !self.toggles.all_axes;
                } else {
                    debug!("All-axes panel can only be toggled while the UI is visible");
                }
            }
            Command::ToggleBinding => self.binding.apply(BindingInput::Toggle, &mut self.mapping),
            Command::ResetMapping => self.binding.apply(BindingInput::Reset, &mut self.mapping),
            Command::SelectAxis(n) => self.binding.apply(BindingInput::Digit(n), &mut self.mapping),
            Command::AssignRole(role) => {
                self.binding.apply(BindingInput::Assign(role), &mut self.mapping)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::axis_source::FixedAxisSource;

    #[test]
    fn toggles_start_with_fixed_defaults() {
        let session = OverlaySession::new(InversionFlags::default());
        assert_eq!(*session.toggles(), DisplayToggles::default());
        assert!(session.toggles().ui);
        assert!(!session.toggles().all_axes);
        assert!(!session.binding_active());
        assert!(!session.quit_requested());
    }

    #[test]
    fn toggling_twice_restores_flags() {
        let mut session = OverlaySession::new(InversionFlags::default());
        session.apply(Command::ToggleAllAxes);
        let before = *session.toggles();

        for command in [
            Command::ToggleDebug,
            Command::ToggleValues,
            Command::ToggleUi,
            Command::ToggleAllAxes,
        ] {
            session.apply(command);
            session.apply(command);
            assert_eq!(*session.toggles(), before, "{:?}", command);
        }
    }

    #[test]
    fn all_axes_toggle_needs_visible_ui() {
        let mut session = OverlaySession::new(InversionFlags::default());
        session.apply(Command::ToggleUi);
        session.apply(Command::ToggleAllAxes);
        assert!(!session.toggles().all_axes);

        session.apply(Command::ToggleUi);
        session.apply(Command::ToggleAllAxes);
        assert!(session.toggles().all_axes);
    }

    #[test]
    fn binding_commands_flow_into_mapping() {
        let mut session = OverlaySession::new(InversionFlags::default());
        session.apply(Command::SelectAxis(3));
        session.apply(Command::AssignRole(AxisRole::LeftX));
        assert!(session.mapping().is_default());

        session.apply(Command::ToggleBinding);
        session.apply(Command::SelectAxis(3));
        session.apply(Command::AssignRole(AxisRole::LeftX));
        assert_eq!(session.mapping().get(AxisRole::LeftX), 3);

        session.apply(Command::ResetMapping);
        assert!(session.mapping().is_default());
        assert!(session.binding_active());
    }

    #[test]
    fn reset_outside_binding_mode_is_ignored() {
        let mut session = OverlaySession::new(InversionFlags::default());
        session.apply(Command::ToggleBinding);
        session.apply(Command::SelectAxis(5));
        session.apply(Command::AssignRole(AxisRole::RightY));
        session.apply(Command::ToggleBinding);

        session.apply(Command::ResetMapping);
        assert_eq!(session.mapping().get(AxisRole::RightY), 5);
    }

    #[test]
    fn role_values_apply_inversion() {
        let session = OverlaySession::new(InversionFlags::default());
        let source = FixedAxisSource::new(vec![0.8, -0.3, 0.5, -0.2]);
        assert_eq!(session.role_value(AxisRole::LeftX, &source), 0.8);
        assert_eq!(session.role_value(AxisRole::LeftY, &source), 0.3);
        assert_eq!(session.role_value(AxisRole::RightX, &source), -0.2);
        assert_eq!(session.role_value(AxisRole::RightY, &source), -0.5);
    }

    #[test]
    fn quit_sets_flag() {
        let mut session = OverlaySession::new(InversionFlags::default());
        session.apply(Command::Quit);
        assert!(session.quit_requested());
    }
}
