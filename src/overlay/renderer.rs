//! Per-frame painting of the overlay
//!
//! # Layers
//!
//! ```text
//! chroma key fill
//!   └─ not-connected notice                 (no device)
//!   └─ stick indicators + labels            (device, always)
//!        └─ readouts / axes / debug / legend / throttle bar   (UI toggle)
//! binding scrim, mapping summary, raw axes  (binding mode)
//! ```
//!
//! A failing draw call ends the frame early; the next frame starts fresh.

use super::common::{self, OverlayColors};
use super::error::OverlayError;
use super::session::OverlaySession;
use super::surface::Surface;
use crate::config::OverlayConfig;
use crate::controller::AxisSource;
use crate::mapping::AxisRole;
use egui::{pos2, vec2, Align2, Color32, Pos2, Rect, Stroke, Vec2};
use tracing::error;

/// Everything a frame is painted from
pub struct FrameState<'a> {
    pub session: &'a OverlaySession,
    pub source: &'a dyn AxisSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickGeometry {
    pub origin: Pos2,
    pub endpoint: Pos2,
    pub radius: f32,
}

impl StickGeometry {
    /// Endpoint is `origin + value * radius` on each axis, values already inverted
    pub fn new(origin: Pos2, radius: f32, x: f32, y: f32) -> Self {
        Self {
            origin,
            endpoint: origin + vec2(x * radius, y * radius),
            radius,
        }
    }
}

/// Track and fill rectangles for a value in [-1, 1], filled from the bottom
pub fn throttle_rects(track: Rect, value: f32) -> (Rect, Rect) {
    let normalized = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0);
    let inner = track.shrink(2.0);
    let fill_height = inner.height() * normalized;
    let fill = Rect::from_min_max(pos2(inner.min.x, inner.max.y - fill_height), inner.max);
    (track, fill)
}

pub struct OverlayRenderer {
    chroma: Color32,
    stick_radius: f32,
    mirror_sticks: bool,
    throttle_bar: bool,
}

impl OverlayRenderer {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            chroma: common::chroma(config.chroma_color),
            stick_radius: config.stick_radius(),
            mirror_sticks: config.mirror_sticks,
            throttle_bar: config.throttle_bar,
        }
    }

    pub fn chroma(&self) -> Color32 {
        self.chroma
    }

    /// Screen anchors of the left and right stick indicators
    pub fn stick_anchors(&self, size: Vec2) -> (Pos2, Pos2) {
        let near = pos2(size.x / 3.0, size.y / 2.0);
        let far = pos2(size.x - size.x / 3.0, size.y / 2.0);
        if self.mirror_sticks {
            (far, near)
        } else {
            (near, far)
        }
    }

    pub fn stick_geometry(&self, size: Vec2, frame: &FrameState<'_>) -> [StickGeometry; 2] {
        let (left_anchor, right_anchor) = self.stick_anchors(size);
        let value = |role| frame.session.role_value(role, frame.source);
        [
            StickGeometry::new(
                left_anchor,
                self.stick_radius,
                value(AxisRole::LeftX),
                value(AxisRole::LeftY),
            ),
            StickGeometry::new(
                right_anchor,
                self.stick_radius,
                value(AxisRole::RightX),
                value(AxisRole::RightY),
            ),
        ]
    }

    /// Paints one frame; failures are logged and end the frame early
    pub fn render(&self, surface: &mut dyn Surface, frame: &FrameState<'_>) {
        if let Err(e) = self.paint(surface, frame) {
            error!("{}, skipping the rest of this frame", e);
        }
    }

    fn paint(&self, surface: &mut dyn Surface, frame: &FrameState<'_>) -> Result<(), OverlayError> {
        let size = surface.size();
        surface.fill(self.chroma)?;

        if frame.source.is_connected() {
            self.paint_sticks(surface, size, frame)?;
            if frame.session.toggles().ui {
                self.paint_chrome(surface, size, frame)?;
            }
        } else {
            paint_not_connected(surface, size)?;
        }

        if frame.session.binding_active() {
            self.paint_binding(surface, size, frame)?;
        }
        Ok(())
    }

    fn paint_sticks(
        &self,
        surface: &mut dyn Surface,
        size: Vec2,
        frame: &FrameState<'_>,
    ) -> Result<(), OverlayError> {
        let [left, right] = self.stick_geometry(size, frame);
        for (stick, label) in [(left, "LEFT"), (right, "RIGHT")] {
            paint_stick(surface, &stick)?;
            surface.text(
                stick.origin - vec2(0.0, stick.radius + 30.0),
                Align2::CENTER_TOP,
                label,
                OverlayColors::LABEL,
            )?;
        }
        Ok(())
    }

    fn paint_chrome(
        &self,
        surface: &mut dyn Surface,
        size: Vec2,
        frame: &FrameState<'_>,
    ) -> Result<(), OverlayError> {
        let session = frame.session;
        let toggles = session.toggles();

        if toggles.values {
            for (row, role) in AxisRole::ALL.into_iter().enumerate() {
                surface.text(
                    pos2(common::MARGIN, common::MARGIN + row as f32 * common::LINE_HEIGHT),
                    Align2::LEFT_TOP,
                    &format!("{}: {:.2}", role, session.role_value(role, frame.source)),
                    OverlayColors::TEXT,
                )?;
            }
        }

        if toggles.all_axes {
            let count = frame.source.axis_count().min(common::MAX_LISTED_AXES);
            for index in 0..count {
                surface.text(
                    pos2(
                        size.x - 120.0,
                        common::MARGIN + index as f32 * common::LINE_HEIGHT,
                    ),
                    Align2::LEFT_TOP,
                    &format!("Axis {}: {:.2}", index, frame.source.read(index)),
                    OverlayColors::LABEL,
                )?;
            }
        }

        if toggles.debug {
            if let Some(info) = frame.source.device_info() {
                let lines = [
                    format!("Controller: {}", info.name),
                    format!("Axes: {}", info.axis_count),
                    format!("Buttons: {}", info.button_count),
                ];
                for (row, line) in lines.iter().enumerate() {
                    surface.text(
                        pos2(common::MARGIN, size.y - 60.0 + row as f32 * common::LINE_HEIGHT),
                        Align2::LEFT_TOP,
                        line,
                        OverlayColors::DEBUG,
                    )?;
                }
            }
        }

        if self.throttle_bar {
            let (_, right_anchor) = self.stick_anchors(size);
            let value = session.role_value(AxisRole::RightY, frame.source);
            paint_throttle(surface, self.throttle_track(size, right_anchor), value)?;
        }

        surface.text(
            pos2(common::MARGIN, size.y - 80.0),
            Align2::LEFT_TOP,
            common::LEGEND,
            OverlayColors::LEGEND,
        )
    }

    // Bar sits on the outer side of the right stick so it never crosses the other one
    fn throttle_track(&self, size: Vec2, anchor: Pos2) -> Rect {
        let offset = self.stick_radius + common::BAR_GAP;
        let left = if anchor.x < size.x / 2.0 {
            anchor.x - offset - common::BAR_WIDTH
        } else {
            anchor.x + offset
        };
        Rect::from_min_size(
            pos2(left, anchor.y - self.stick_radius),
            vec2(common::BAR_WIDTH, self.stick_radius * 2.0),
        )
    }

    fn paint_binding(
        &self,
        surface: &mut dyn Surface,
        size: Vec2,
        frame: &FrameState<'_>,
    ) -> Result<(), OverlayError> {
        let session = frame.session;
        let mapping = session.mapping();

        surface.rect_filled(Rect::from_min_size(Pos2::ZERO, size), OverlayColors::SCRIM)?;
        surface.text(
            pos2(size.x / 2.0, common::MARGIN),
            Align2::CENTER_TOP,
            "--- Axis binding mode ---",
            OverlayColors::TITLE,
        )?;
        surface.text(
            pos2(common::MARGIN, 40.0),
            Align2::LEFT_TOP,
            "Press 0-9 to select an axis, then L / Y / X / T to assign it",
            OverlayColors::INSTRUCTION,
        )?;

        let heading = if mapping.is_default() {
            "Current mapping (defaults):"
        } else {
            "Current mapping:"
        };
        surface.text(
            pos2(common::MARGIN, 70.0),
            Align2::LEFT_TOP,
            heading,
            OverlayColors::LABEL,
        )?;
        for (row, role) in AxisRole::ALL.into_iter().enumerate() {
            let suffix = if role == AxisRole::RightY {
                " (throttle)"
            } else {
                ""
            };
            surface.text(
                pos2(20.0, 90.0 + row as f32 * common::LINE_HEIGHT),
                Align2::LEFT_TOP,
                &format!("{}: axis {}{}", role, mapping.get(role), suffix),
                OverlayColors::TEXT,
            )?;
        }

        let pending = match session.binding().selected_axis() {
            Some(axis) => format!("Selected axis: {}", axis),
            None => "Selected axis: none".to_string(),
        };
        surface.text(
            pos2(20.0, 90.0 + 4.0 * common::LINE_HEIGHT + 10.0),
            Align2::LEFT_TOP,
            &pending,
            OverlayColors::HIGHLIGHT,
        )?;

        if frame.source.is_connected() {
            surface.text(
                pos2(size.x / 2.0, 70.0),
                Align2::LEFT_TOP,
                "Available axes:",
                OverlayColors::LABEL,
            )?;
            let count = frame.source.axis_count().min(common::MAX_LISTED_AXES);
            for index in 0..count {
                let value = frame.source.read(index);
                let color = if value.abs() > common::ACTIVE_AXIS_THRESHOLD {
                    OverlayColors::HIGHLIGHT
                } else {
                    OverlayColors::TEXT
                };
                surface.text(
                    pos2(size.x / 2.0, 90.0 + index as f32 * common::LINE_HEIGHT),
                    Align2::LEFT_TOP,
                    &format!("Axis {}: {:.2}", index, value),
                    color,
                )?;
            }
        }

        surface.text(
            pos2(common::MARGIN, size.y - 30.0),
            Align2::LEFT_TOP,
            common::BINDING_LEGEND,
            OverlayColors::LEGEND,
        )
    }
}

fn paint_stick(surface: &mut dyn Surface, stick: &StickGeometry) -> Result<(), OverlayError> {
    let o = stick.origin;
    let r = stick.radius;
    let crosshair = Stroke::new(common::CROSSHAIR_WIDTH, OverlayColors::CROSSHAIR);
    surface.line(pos2(o.x - r, o.y), pos2(o.x + r, o.y), crosshair)?;
    surface.line(pos2(o.x, o.y - r), pos2(o.x, o.y + r), crosshair)?;

    surface.line(
        o,
        stick.endpoint,
        Stroke::new(common::SHAFT_WIDTH, OverlayColors::SHAFT),
    )?;
    surface.circle(stick.endpoint, common::CAP_RADIUS, OverlayColors::CAP)
}

fn paint_throttle(surface: &mut dyn Surface, track: Rect, value: f32) -> Result<(), OverlayError> {
    let (track, fill) = throttle_rects(track, value);
    surface.rect_outline(track, Stroke::new(1.0, OverlayColors::BAR_TRACK))?;
    if fill.height() > 0.0 {
        surface.rect_filled(fill, OverlayColors::BAR_FILL)?;
    }
    Ok(())
}

fn paint_not_connected(surface: &mut dyn Surface, size: Vec2) -> Result<(), OverlayError> {
    let center = pos2(size.x / 2.0, size.y / 2.0);
    surface.text(
        center,
        Align2::CENTER_TOP,
        "Controller not connected",
        OverlayColors::NOT_CONNECTED,
    )?;
    surface.text(
        center + vec2(0.0, 30.0),
        Align2::CENTER_TOP,
        "Connect a controller and restart the overlay",
        OverlayColors::NOT_CONNECTED,
    )
}
