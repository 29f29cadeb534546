//! The drawing surface abstraction presets render against.
//!
//! The command set mirrors an immediate-mode 2D canvas: a current path built
//! from move/line/curve/arc commands, then stroked or filled with the current
//! style. [`RecordingSurface`] captures the commands instead of rasterizing
//! them, which turns any preset into a pure function returning draw calls.

use crate::color::Color;
use crate::geometry::Point;

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Erase the whole surface to transparent.
    fn clear(&mut self);
    /// Discard the current path.
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn quadratic_curve_to(&mut self, control: Point, to: Point);
    /// Circular arc; angles in radians, clockwise on screen unless `anticlockwise`.
    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, anticlockwise: bool);
    /// Rounded corner from the current point through `corner` towards `towards`.
    fn arc_to(&mut self, corner: Point, towards: Point, radius: f32);
    fn ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    );
    /// Closed rectangle subpath; `width`/`height` may be negative.
    fn rect(&mut self, origin: Point, width: f32, height: f32);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn stroke_color(&self) -> Color;
}

/// One recorded surface command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo {
        control: Point,
        to: Point,
    },
    Arc {
        center: Point,
        radius: f32,
        start: f32,
        end: f32,
        anticlockwise: bool,
    },
    ArcTo {
        corner: Point,
        towards: Point,
        radius: f32,
    },
    Ellipse {
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    },
    Rect {
        origin: Point,
        width: f32,
        height: f32,
    },
    ClosePath,
    /// Stroke with the color current at the time of the call.
    Stroke(Color),
    /// Fill with the color current at the time of the call.
    Fill(Color),
    SetStrokeColor(Color),
    SetFillColor(Color),
    SetLineWidth(f32),
}

/// A surface that remembers every command in order.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    stroke_color: Color,
    fill_color: Color,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    /// Colors of every stroke, in order.
    pub fn strokes(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Stroke(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Colors of every fill, in order.
    pub fn fills(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Fill(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| matches(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, to: Point) {
        self.calls.push(DrawCall::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.calls.push(DrawCall::LineTo(to));
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.calls.push(DrawCall::QuadraticCurveTo { control, to });
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.calls.push(DrawCall::Arc {
            center,
            radius,
            start,
            end,
            anticlockwise,
        });
    }

    fn arc_to(&mut self, corner: Point, towards: Point, radius: f32) {
        self.calls.push(DrawCall::ArcTo {
            corner,
            towards,
            radius,
        });
    }

    fn ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    ) {
        self.calls.push(DrawCall::Ellipse {
            center,
            radius_x,
            radius_y,
            rotation,
            start,
            end,
        });
    }

    fn rect(&mut self, origin: Point, width: f32, height: f32) {
        self.calls.push(DrawCall::Rect {
            origin,
            width,
            height,
        });
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke(self.stroke_color));
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill(self.fill_color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
        self.calls.push(DrawCall::SetStrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
        self.calls.push(DrawCall::SetFillColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(DrawCall::SetLineWidth(width));
    }

    fn stroke_color(&self) -> Color {
        self.stroke_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_captures_current_color() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        s.stroke();
        s.set_stroke_color(Color::WHITE);
        s.stroke();
        assert_eq!(s.strokes(), vec![Color::BLACK, Color::WHITE]);
        assert_eq!(s.stroke_color(), Color::WHITE);
    }

    #[test]
    fn records_in_order() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        s.begin_path();
        s.move_to(Point::new(1.0, 2.0));
        s.line_to(Point::new(3.0, 4.0));
        assert_eq!(
            s.calls(),
            &[
                DrawCall::BeginPath,
                DrawCall::MoveTo(Point::new(1.0, 2.0)),
                DrawCall::LineTo(Point::new(3.0, 4.0)),
            ]
        );
        assert_eq!(s.count(|c| matches!(c, DrawCall::LineTo(_))), 1);
    }
}
