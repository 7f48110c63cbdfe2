//! Shared colors and geometry for the overlay canvas

use egui::Color32;

/// Fixed palette for everything drawn over the chroma key
pub struct OverlayColors;

impl OverlayColors {
    pub const CROSSHAIR: Color32 = Color32::from_gray(150);
    pub const SHAFT: Color32 = Color32::from_gray(200);
    pub const CAP: Color32 = Color32::WHITE;
    pub const LABEL: Color32 = Color32::from_gray(200);
    pub const TEXT: Color32 = Color32::WHITE;
    pub const LEGEND: Color32 = Color32::from_gray(150);
    pub const DEBUG: Color32 = Color32::from_rgb(200, 200, 0);
    pub const NOT_CONNECTED: Color32 = Color32::from_rgb(255, 0, 0);

    pub const BAR_TRACK: Color32 = Color32::from_gray(100);
    pub const BAR_FILL: Color32 = Color32::from_rgb(100, 255, 100);

    pub const SCRIM: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 200);
    pub const TITLE: Color32 = Color32::from_rgb(255, 255, 0);
    pub const INSTRUCTION: Color32 = Color32::from_rgb(255, 200, 0);
    pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 255, 0);
}

pub const SHAFT_WIDTH: f32 = 4.0;
pub const CROSSHAIR_WIDTH: f32 = 2.0;
pub const CAP_RADIUS: f32 = 10.0;

pub const LINE_HEIGHT: f32 = 20.0;
pub const MARGIN: f32 = 10.0;

/// Raw axis rows shown in the all-axes panel and in binding mode
pub const MAX_LISTED_AXES: usize = 10;

/// Raw values above this magnitude are highlighted while binding
pub const ACTIVE_AXIS_THRESHOLD: f32 = 0.5;

pub const BAR_WIDTH: f32 = 20.0;
pub const BAR_GAP: f32 = 20.0;

pub const LEGEND: &str = "Esc: quit  D: debug  V: values  A: UI  S: all axes  C: binding mode";
pub const BINDING_LEGEND: &str =
    "Esc: quit  C: leave binding mode  R: reset to defaults  L/Y/X/T: assign role";

pub fn chroma(color: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}
