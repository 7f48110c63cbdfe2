//! Interactive axis binding with statum typestates
//!
//! Binding is a two-step protocol: pick a physical axis index with a digit,
//! then pick the role it should drive.
//!
//! # State Machine
//!
//! ```text
//!            toggle                digit n
//! Inactive ─────────► Listening ───────────► AxisSelected(n)
//!    ▲                 │   ▲ ▲                  │   │
//!    │     toggle      │   │ └──── assign role ─┘   │
//!    ├─────────────────┘   └────── reset ───────────┤
//!    └──────────────────── toggle ──────────────────┘
//! ```
//!
//! [`BindingState`] wraps the typestates so key input, which only arrives at
//! runtime, can drive the machine.

use super::axis_mapping::{AxisMapping, AxisRole};
use statum::{machine, state};
use tracing::{debug, info};

#[state]
#[derive(Debug, Clone)]
pub enum BindingPhase {
    Inactive,
    Listening,
    AxisSelected,
}

#[machine]
#[derive(Debug)]
pub struct Binder<S: BindingPhase> {
    // Only `Some` while in AxisSelected
    selected_axis: Option<usize>,

    // Roles assigned since binding mode was entered
    assignments: usize,
}

impl<S: BindingPhase> Binder<S> {
    pub fn selected_axis(&self) -> Option<usize> {
        self.selected_axis
    }

    pub fn assignments(&self) -> usize {
        self.assignments
    }
}

impl Binder<Inactive> {
    pub fn create() -> Self {
        Self::new(None, 0)
    }

    pub fn enter(mut self) -> Binder<Listening> {
        info!("Entering binding mode");
        self.selected_axis = None;
        self.assignments = 0;
        self.transition()
    }
}

impl Binder<Listening> {
    pub fn select_axis(mut self, axis_index: usize) -> Binder<AxisSelected> {
        info!(
            "Axis {} selected, choose a role (L: left X, Y: left Y, X: right X, T: right Y)",
            axis_index
        );
        self.selected_axis = Some(axis_index);
        self.transition()
    }

    pub fn reset(self, mapping: &mut AxisMapping) -> Binder<Listening> {
        mapping.reset_to_default();
        self
    }

    pub fn exit(mut self) -> Binder<Inactive> {
        info!(
            "Leaving binding mode after {} assignment(s)",
            self.assignments
        );
        self.selected_axis = None;
        self.transition()
    }
}

impl Binder<AxisSelected> {
    pub fn assign(mut self, role: AxisRole, mapping: &mut AxisMapping) -> Binder<Listening> {
        if let Some(axis_index) = self.selected_axis.take() {
            mapping.set(role, axis_index);
            self.assignments += 1;
            info!("Axis {} assigned to {}", axis_index, role);
        }
        self.transition()
    }

    pub fn reset(mut self, mapping: &mut AxisMapping) -> Binder<Listening> {
        mapping.reset_to_default();
        self.selected_axis = None;
        self.transition()
    }

    pub fn exit(mut self) -> Binder<Inactive> {
        info!(
            "Leaving binding mode after {} assignment(s), discarding pending axis {:?}",
            self.assignments, self.selected_axis
        );
        self.selected_axis = None;
        self.transition()
    }
}

/// Input the binding machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingInput {
    Toggle,
    Reset,
    Digit(usize),
    Assign(AxisRole),
}

/// Runtime view over the binding typestates
#[derive(Debug)]
pub enum BindingState {
    Inactive(Binder<Inactive>),
    Listening(Binder<Listening>),
    AxisSelected(Binder<AxisSelected>),
}

impl Default for BindingState {
    fn default() -> Self {
        BindingState::Inactive(Binder::create())
    }
}

impl BindingState {
    pub fn is_active(&self) -> bool {
        !matches!(self, BindingState::Inactive(_))
    }

    pub fn selected_axis(&self) -> Option<usize> {
        match self {
            BindingState::Inactive(b) => b.selected_axis(),
            BindingState::Listening(b) => b.selected_axis(),
            BindingState::AxisSelected(b) => b.selected_axis(),
        }
    }

    pub fn apply(&mut self, input: BindingInput, mapping: &mut AxisMapping) {
        let current = std::mem::take(self);
        *self = current.step(input, mapping);
    }

    fn step(self, input: BindingInput, mapping: &mut AxisMapping) -> Self {
        match (self, input) {
            (BindingState::Inactive(b), BindingInput::Toggle) => {
                BindingState::Listening(b.enter())
            }
            (BindingState::Inactive(b), other) => {
                debug!("Ignoring {:?} outside binding mode", other);
                BindingState::Inactive(b)
            }

            (BindingState::Listening(b), BindingInput::Toggle) => BindingState::Inactive(b.exit()),
            (BindingState::Listening(b), BindingInput::Reset) => {
                BindingState::Listening(b.reset(mapping))
            }
            (BindingState::Listening(b), BindingInput::Digit(n)) => {
                BindingState::AxisSelected(b.select_axis(n))
            }
            (BindingState::Listening(b), BindingInput::Assign(role)) => {
                debug!("No axis selected, ignoring assignment to {}", role);
                BindingState::Listening(b)
            }

            (BindingState::AxisSelected(b), BindingInput::Toggle) => {
                BindingState::Inactive(b.exit())
            }
            (BindingState::AxisSelected(b), BindingInput::Reset) => {
                BindingState::Listening(b.reset(mapping))
            }
            (BindingState::AxisSelected(b), BindingInput::Digit(n)) => {
                debug!(
                    "Axis {:?} already pending, ignoring digit {}",
                    b.selected_axis(),
                    n
                );
                BindingState::AxisSelected(b)
            }
            (BindingState::AxisSelected(b), BindingInput::Assign(role)) => {
                BindingState::Listening(b.assign(role, mapping))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> (BindingState, AxisMapping) {
        let mut mapping = AxisMapping::default();
        let mut state = BindingState::default();
        state.apply(BindingInput::Toggle, &mut mapping);
        (state, mapping)
    }

    #[test]
    fn starts_inactive() {
        let state = BindingState::default();
        assert!(!state.is_active());
        assert_eq!(state.selected_axis(), None);
    }

    #[test]
    fn toggle_enters_and_leaves() {
        let (mut state, mut mapping) = active();
        assert!(matches!(state, BindingState::Listening(_)));

        state.apply(BindingInput::Toggle, &mut mapping);
        assert!(matches!(state, BindingState::Inactive(_)));
    }

    #[test]
    fn select_then_assign_updates_mapping() {
        let (mut state, mut mapping) = active();

        state.apply(BindingInput::Digit(3), &mut mapping);
        assert!(matches!(state, BindingState::AxisSelected(_)));
        assert_eq!(state.selected_axis(), Some(3));

        state.apply(BindingInput::Assign(AxisRole::LeftX), &mut mapping);
        assert_eq!(mapping.get(AxisRole::LeftX), 3);
        assert!(matches!(state, BindingState::Listening(_)));
        assert_eq!(state.selected_axis(), None);
    }

    #[test]
    fn assign_without_selection_is_noop() {
        let (mut state, mut mapping) = active();
        state.apply(BindingInput::Assign(AxisRole::RightX), &mut mapping);

        assert!(mapping.is_default());
        assert!(matches!(state, BindingState::Listening(_)));
    }

    #[test]
    fn second_digit_keeps_first_selection() {
        let (mut state, mut mapping) = active();
        state.apply(BindingInput::Digit(5), &mut mapping);
        state.apply(BindingInput::Digit(7), &mut mapping);
        assert_eq!(state.selected_axis(), Some(5));

        state.apply(BindingInput::Assign(AxisRole::RightY), &mut mapping);
        assert_eq!(mapping.get(AxisRole::RightY), 5);
    }

    #[test]
    fn reset_clears_selection_and_mapping() {
        let (mut state, mut mapping) = active();
        state.apply(BindingInput::Digit(9), &mut mapping);
        state.apply(BindingInput::Assign(AxisRole::LeftY), &mut mapping);
        state.apply(BindingInput::Digit(4), &mut mapping);

        state.apply(BindingInput::Reset, &mut mapping);
        assert!(mapping.is_default());
        assert!(matches!(state, BindingState::Listening(_)));
        assert_eq!(state.selected_axis(), None);
    }

    #[test]
    fn inputs_outside_binding_mode_are_ignored() {
        let mut mapping = AxisMapping::default();
        mapping.set(AxisRole::LeftX, 6);
        let mut state = BindingState::default();

        state.apply(BindingInput::Reset, &mut mapping);
        state.apply(BindingInput::Digit(2), &mut mapping);
        state.apply(BindingInput::Assign(AxisRole::LeftX), &mut mapping);

        assert!(!state.is_active());
        assert_eq!(mapping.get(AxisRole::LeftX), 6);
    }

    #[test]
    fn leaving_discards_pending_selection() {
        let (mut state, mut mapping) = active();
        state.apply(BindingInput::Digit(8), &mut mapping);
        state.apply(BindingInput::Toggle, &mut mapping);
        assert_eq!(state.selected_axis(), None);

        state.apply(BindingInput::Toggle, &mut mapping);
        assert!(matches!(state, BindingState::Listening(_)));
        assert_eq!(state.selected_axis(), None);

        state.apply(BindingInput::Assign(AxisRole::LeftX), &mut mapping);
        assert!(mapping.is_default());
    }

    #[test]
    fn assignments_are_counted_per_session() {
        let (mut state, mut mapping) = active();
        state.apply(BindingInput::Digit(1), &mut mapping);
        state.apply(BindingInput::Assign(AxisRole::LeftX), &mut mapping);
        state.apply(BindingInput::Digit(0), &mut mapping);
        state.apply(BindingInput::Assign(AxisRole::LeftY), &mut mapping);

        match &state {
            BindingState::Listening(b) => assert_eq!(b.assignments(), 2),
            other => panic!("unexpected state {:?}", other),
        }
    }
}
