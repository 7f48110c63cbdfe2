//! Drawing targets for the renderer
//!
//! [`EguiSurface`] paints straight into the window. [`RecordingSurface`] keeps
//! a list of draw operations so frames can be inspected without a window.

use super::error::OverlayError;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2};

pub trait Surface {
    fn size(&self) -> Vec2;

    /// Covers the whole canvas
    fn fill(&mut self, color: Color32) -> Result<(), OverlayError>;

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) -> Result<(), OverlayError>;

    fn circle(&mut self, center: Pos2, radius: f32, color: Color32) -> Result<(), OverlayError>;

    fn rect_filled(&mut self, rect: Rect, color: Color32) -> Result<(), OverlayError>;

    fn rect_outline(&mut self, rect: Rect, stroke: Stroke) -> Result<(), OverlayError>;

    fn text(
        &mut self,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        color: Color32,
    ) -> Result<(), OverlayError>;
}

/// Canvas-relative painting into an egui layer
pub struct EguiSurface {
    painter: Painter,
    canvas: Rect,
    font: FontId,
}

impl EguiSurface {
    pub fn new(painter: Painter, canvas: Rect) -> Self {
        Self {
            painter,
            canvas,
            font: FontId::proportional(16.0),
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        pos + self.canvas.min.to_vec2()
    }

    fn check(&self, pos: Pos2) -> Result<(), OverlayError> {
        if pos.x.is_finite() && pos.y.is_finite() {
            Ok(())
        } else {
            Err(OverlayError::Render(format!("non-finite position {:?}", pos)))
        }
    }
}

impl Surface for EguiSurface {
    fn size(&self) -> Vec2 {
        self.canvas.size()
    }

    fn fill(&mut self, color: Color32) -> Result<(), OverlayError> {
        self.painter.rect_filled(self.canvas, 0.0, color);
        Ok(())
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) -> Result<(), OverlayError> {
        self.check(from)?;
        self.check(to)?;
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
        Ok(())
    }

    fn circle(&mut self, center: Pos2, radius: f32, color: Color32) -> Result<(), OverlayError> {
        self.check(center)?;
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
        Ok(())
    }

    fn rect_filled(&mut self, rect: Rect, color: Color32) -> Result<(), OverlayError> {
        self.check(rect.min)?;
        self.check(rect.max)?;
        self.painter
            .rect_filled(rect.translate(self.canvas.min.to_vec2()), 0.0, color);
        Ok(())
    }

    fn rect_outline(&mut self, rect: Rect, stroke: Stroke) -> Result<(), OverlayError> {
        self.check(rect.min)?;
        self.check(rect.max)?;
        self.painter.rect_stroke(
            rect.translate(self.canvas.min.to_vec2()),
            0.0,
            stroke,
            StrokeKind::Inside,
        );
        Ok(())
    }

    fn text(
        &mut self,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        color: Color32,
    ) -> Result<(), OverlayError> {
        self.check(pos)?;
        self.painter
            .text(self.to_screen(pos), anchor, text, self.font.clone(), color);
        Ok(())
    }
}

/// One recorded draw call
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Color32),
    Line { from: Pos2, to: Pos2, stroke: Stroke },
    Circle { center: Pos2, radius: f32, color: Color32 },
    RectFilled { rect: Rect, color: Color32 },
    RectOutline { rect: Rect, stroke: Stroke },
    Text {
        pos: Pos2,
        anchor: Align2,
        text: String,
        color: Color32,
    },
}

/// Surface that records operations instead of painting
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ops: Vec<DrawOp>,
    // Fails every call once this many operations were recorded
    fail_after: Option<usize>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ops: Vec::new(),
            fail_after: None,
        }
    }

    pub fn failing_after(size: Vec2, ops: usize) -> Self {
        Self {
            fail_after: Some(ops),
            ..Self::new(size)
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }

    fn record(&mut self, op: DrawOp) -> Result<(), OverlayError> {
        if let Some(limit) = self.fail_after {
            if self.ops.len() >= limit {
                return Err(OverlayError::Render(format!(
                    "surface rejected operation {}",
                    self.ops.len()
                )));
            }
        }
        self.ops.push(op);
        Ok(())
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill(&mut self, color: Color32) -> Result<(), OverlayError> {
        self.record(DrawOp::Fill(color))
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) -> Result<(), OverlayError> {
        self.record(DrawOp::Line { from, to, stroke })
    }

    fn circle(&mut self, center: Pos2, radius: f32, color: Color32) -> Result<(), OverlayError> {
        self.record(DrawOp::Circle {
            center,
            radius,
            color,
        })
    }

    fn rect_filled(&mut self, rect: Rect, color: Color32) -> Result<(), OverlayError> {
        self.record(DrawOp::RectFilled { rect, color })
    }

    fn rect_outline(&mut self, rect: Rect, stroke: Stroke) -> Result<(), OverlayError> {
        self.record(DrawOp::RectOutline { rect, stroke })
    }

    fn text(
        &mut self,
        pos: Pos2,
        anchor: Align2,
        text: &str,
        color: Color32,
    ) -> Result<(), OverlayError> {
        self.record(DrawOp::Text {
            pos,
            anchor,
            text: text.to_string(),
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn records_in_order() {
        let mut surface = RecordingSurface::new(vec2(100.0, 100.0));
        surface.fill(Color32::GREEN).unwrap();
        surface
            .text(pos2(1.0, 2.0), Align2::LEFT_TOP, "hi", Color32::WHITE)
            .unwrap();

        assert_eq!(surface.ops().len(), 2);
        assert_eq!(surface.ops()[0], DrawOp::Fill(Color32::GREEN));
        assert!(surface.contains_text("hi"));
    }

    #[test]
    fn fails_after_limit() {
        let mut surface = RecordingSurface::failing_after(vec2(10.0, 10.0), 1);
        assert!(surface.fill(Color32::GREEN).is_ok());
        assert!(matches!(
            surface.circle(pos2(0.0, 0.0), 1.0, Color32::WHITE),
            Err(OverlayError::Render(_))
        ));
        assert_eq!(surface.ops().len(), 1);
    }
}
