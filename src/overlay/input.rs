//! Keyboard commands
//!
//! Single keys, no modifiers. Reset (`R`) and the right-X assignment (`X`) are
//! separate keys so neither depends on whether an axis is pending.

use crate::mapping::AxisRole;
use egui::{Event, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleDebug,
    ToggleValues,
    ToggleUi,
    ToggleAllAxes,
    ToggleBinding,
    ResetMapping,
    SelectAxis(usize),
    AssignRole(AxisRole),
}

pub fn command_for_key(key: Key) -> Option<Command> {
    let command = match key {
        Key::Escape => Command::Quit,
        Key::D => Command::ToggleDebug,
        Key::V => Command::ToggleValues,
        Key::A => Command::ToggleUi,
        Key::S => Command::ToggleAllAxes,
        Key::C => Command::ToggleBinding,
        Key::R => Command::ResetMapping,
        Key::L => Command::AssignRole(AxisRole::LeftX),
        Key::Y => Command::AssignRole(AxisRole::LeftY),
        Key::X => Command::AssignRole(AxisRole::RightX),
        Key::T => Command::AssignRole(AxisRole::RightY),
        _ => return digit(key).map(Command::SelectAxis),
    };
    Some(command)
}

fn digit(key: Key) -> Option<usize> {
    let value = match key {
        Key::Num0 => 0,
        Key::Num1 => 1,
        Key::Num2 => 2,
        Key::Num3 => 3,
        Key::Num4 => 4,
        Key::Num5 => 5,
        Key::Num6 => 6,
        Key::Num7 => 7,
        Key::Num8 => 8,
        Key::Num9 => 9,
        _ => return None,
    };
    Some(value)
}

/// Commands for fresh key presses in this frame's input, in order
pub fn commands_from_events(events: &[Event]) -> Vec<Command> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => command_for_key(*key),
            _ => None,
        })
        .collect()
}
