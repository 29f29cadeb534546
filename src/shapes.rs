//! Primitive shapes drawn onto a [`Surface`].
//!
//! Every primitive starts a fresh path, strokes it with `line_color` (or the
//! surface's current stroke color) and fills it when a fill `color` is given.

use std::f32::consts::TAU;

use crate::color::Color;
use crate::geometry::Point;
use crate::surface::Surface;

/// Per-shape style. Unset colors fall back to the surface state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeStyle {
    /// Fill color; no fill when `None`.
    pub color: Option<Color>,
    pub line_color: Option<Color>,
    /// Corner radius for rectangles and polygons.
    pub radius: f32,
    /// Rotation in degrees (rectangles about their origin, ovals about their center).
    pub rotate: f32,
    /// Close polygons back to their first point.
    pub close: bool,
}

impl ShapeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    pub fn line(mut self, color: Option<Color>) -> Self {
        self.line_color = color;
        self
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    pub fn closed(mut self) -> Self {
        self.close = true;
        self
    }
}

/// A polygon vertex with its rounding control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedVertex {
    /// On the incoming edge, `radius` away from the vertex.
    pub prev: Point,
    pub vertex: Point,
    /// On the outgoing edge, `radius` away from the vertex.
    pub next: Point,
}

/// Compute rounding points for every vertex; neighbours wrap cyclically.
pub fn round_vertices(points: &[Point], radius: f32) -> Vec<RoundedVertex> {
    let len = points.len();
    (0..len)
        .map(|i| {
            let p1 = points[(i + len - 1) % len];
            let p2 = points[i];
            let p3 = points[(i + 1) % len];
            RoundedVertex {
                prev: point_towards(p2, p1, radius),
                vertex: p2,
                next: point_towards(p2, p3, radius),
            }
        })
        .collect()
}

/// The point `distance` along the segment from `from` to `to`.
fn point_towards(from: Point, to: Point, distance: f32) -> Point {
    let total = from.distance(to);
    if total == 0.0 {
        return from;
    }
    from.lerp(to, distance / total)
}

pub struct ShapeRenderer<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> ShapeRenderer<'a> {
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self { surface }
    }

    /// Raw access for presets that build paths by hand.
    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    pub fn circle(&mut self, center: Point, diameter: f32, style: ShapeStyle) {
        self.surface.begin_path();
        self.surface.arc(center, diameter / 2.0, 0.0, TAU, false);
        self.finish(style);
    }

    /// `height`/`width` are the vertical/horizontal radii.
    pub fn oval(&mut self, center: Point, height: f32, width: f32, style: ShapeStyle) {
        self.surface.begin_path();
        self.surface
            .ellipse(center, width, height, style.rotate.to_radians(), 0.0, TAU);
        self.finish(style);
    }

    pub fn square(&mut self, origin: Point, side: f32, style: ShapeStyle) {
        self.rectangle(origin, side, side, style);
    }

    /// Rectangle anchored at `origin`, corners joined with arcs of `style.radius`.
    pub fn rectangle(&mut self, origin: Point, height: f32, width: f32, style: ShapeStyle) {
        let corner = |x: f32, y: f32| Point::new(x, y).rotate_about(origin, style.rotate);
        let (x, y) = (origin.x, origin.y);
        let top_right = corner(x + width, y);
        let bottom_right = corner(x + width, y + height);
        let bottom_left = corner(x, y + height);
        let top_left = corner(x, y);

        self.surface.begin_path();
        self.surface.move_to(corner(x + style.radius, y));
        self.surface.arc_to(top_right, bottom_right, style.radius);
        self.surface.arc_to(bottom_right, bottom_left, style.radius);
        self.surface.arc_to(bottom_left, top_left, style.radius);
        self.surface.arc_to(top_left, top_right, style.radius);
        self.surface.close_path();
        self.finish(style);
    }

    pub fn line(&mut self, from: Point, to: Point, style: ShapeStyle) {
        self.surface.begin_path();
        self.surface.move_to(from);
        self.surface.line_to(to);
        self.apply_line_color(style);
        self.surface.stroke();
    }

    /// Polyline through `points`; with a radius every vertex becomes a
    /// quadratic curve between its two rounding points.
    pub fn polygon(&mut self, points: &[Point], style: ShapeStyle) {
        if points.is_empty() {
            return;
        }
        self.surface.begin_path();
        if style.radius > 0.0 {
            for (i, v) in round_vertices(points, style.radius).iter().enumerate() {
                if i == 0 {
                    self.surface.move_to(v.prev);
                } else {
                    self.surface.line_to(v.prev);
                }
                self.surface.quadratic_curve_to(v.vertex, v.next);
            }
        } else {
            self.surface.move_to(points[0]);
            for p in &points[1..] {
                self.surface.line_to(*p);
            }
        }
        if style.close {
            self.surface.close_path();
        }
        self.finish(style);
    }

    fn apply_line_color(&mut self, style: ShapeStyle) {
        let color = style
            .line_color
            .unwrap_or_else(|| self.surface.stroke_color());
        self.surface.set_stroke_color(color);
    }

    fn finish(&mut self, style: ShapeStyle) {
        self.apply_line_color(style);
        self.surface.stroke();
        if let Some(color) = style.color {
            self.surface.set_fill_color(color);
            self.surface.fill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Canvas;
    use crate::surface::{DrawCall, RecordingSurface};

    fn near(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-4
    }

    fn painted_bounds(canvas: &Canvas) -> Option<((usize, usize), (usize, usize))> {
        let mut bounds: Option<((usize, usize), (usize, usize))> = None;
        for y in 0..canvas.height {
            for x in 0..canvas.width {
                if canvas.get_pixel(x, y).is_transparent() {
                    continue;
                }
                let ((x0, y0), (x1, y1)) = bounds.unwrap_or(((x, y), (x, y)));
                bounds = Some(((x0.min(x), y0.min(y)), (x1.max(x), y1.max(y))));
            }
        }
        bounds
    }

    fn square_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn sharp_polygon_visits_vertices_only() {
        let mut surface = RecordingSurface::new(20.0, 20.0);
        ShapeRenderer::new(&mut surface).polygon(&square_points(), ShapeStyle::new());

        let path: Vec<Point> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::MoveTo(p) | DrawCall::LineTo(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(path, square_points());
        assert_eq!(
            surface.count(|c| matches!(c, DrawCall::QuadraticCurveTo { .. })),
            0
        );
        assert_eq!(surface.count(|c| matches!(c, DrawCall::ClosePath)), 0);
    }

    #[test]
    fn rounded_polygon_curves_through_each_vertex() {
        let mut surface = RecordingSurface::new(20.0, 20.0);
        ShapeRenderer::new(&mut surface)
            .polygon(&square_points(), ShapeStyle::new().radius(2.0).closed());

        let curves: Vec<(Point, Point)> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::QuadraticCurveTo { control, to } => Some((*control, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(curves.len(), 4);
        assert_eq!(curves[1], (Point::new(10.0, 0.0), Point::new(10.0, 2.0)));
        assert_eq!(surface.calls()[1], DrawCall::MoveTo(Point::new(0.0, 2.0)));
        assert_eq!(surface.count(|c| matches!(c, DrawCall::ClosePath)), 1);
    }

    #[test]
    fn rounding_points_lie_between_vertex_and_radius() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ];
        let rounded = round_vertices(&pts, 3.0);
        let middle = rounded[1];
        assert_eq!(middle.vertex, Point::new(10.0, 0.0));
        assert!((middle.prev.x - 7.0).abs() < 1e-5);
        assert!((middle.next.x - 13.0).abs() < 1e-5);
        assert!(middle.prev.x > 0.0 && middle.prev.x < 10.0);
        assert!(middle.next.x > 10.0 && middle.next.x < 20.0);
    }

    #[test]
    fn coincident_vertices_do_not_produce_nan() {
        let pts = vec![Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(4.0, 1.0)];
        for v in round_vertices(&pts, 2.0) {
            assert!(v.prev.is_finite() && v.next.is_finite());
        }
    }

    #[test]
    fn fill_only_when_color_given() {
        let red = Color::rgb(255, 0, 0);
        let mut surface = RecordingSurface::new(20.0, 20.0);
        let mut shapes = ShapeRenderer::new(&mut surface);
        shapes.circle(Point::new(5.0, 5.0), 4.0, ShapeStyle::new());
        shapes.circle(Point::new(5.0, 5.0), 4.0, ShapeStyle::new().fill(Some(red)));
        assert_eq!(surface.fills(), vec![red]);
        assert_eq!(surface.strokes().len(), 2);
    }

    #[test]
    fn line_color_falls_back_to_current_stroke() {
        let blue = Color::rgb(0, 0, 255);
        let mut surface = RecordingSurface::new(20.0, 20.0);
        surface.set_stroke_color(blue);
        let mut shapes = ShapeRenderer::new(&mut surface);
        shapes.line(Point::default(), Point::new(1.0, 1.0), ShapeStyle::new());
        shapes.line(
            Point::default(),
            Point::new(1.0, 1.0),
            ShapeStyle::new().line(Some(Color::WHITE)),
        );
        shapes.line(Point::default(), Point::new(1.0, 1.0), ShapeStyle::new());
        assert_eq!(surface.strokes(), vec![blue, Color::WHITE, Color::WHITE]);
    }

    #[test]
    fn rectangle_joins_four_corners() {
        let mut surface = RecordingSurface::new(20.0, 20.0);
        ShapeRenderer::new(&mut surface).rectangle(
            Point::new(2.0, 3.0),
            4.0,
            6.0,
            ShapeStyle::new().radius(1.0),
        );
        let corners: Vec<Point> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::ArcTo { corner, .. } => Some(*corner),
                _ => None,
            })
            .collect();
        assert_eq!(
            corners,
            vec![
                Point::new(8.0, 3.0),
                Point::new(8.0, 7.0),
                Point::new(2.0, 7.0),
                Point::new(2.0, 3.0),
            ]
        );
        assert_eq!(surface.calls()[1], DrawCall::MoveTo(Point::new(3.0, 3.0)));
    }

    #[test]
    fn square_delegates_to_rectangle() {
        let mut a = RecordingSurface::new(20.0, 20.0);
        let mut b = RecordingSurface::new(20.0, 20.0);
        ShapeRenderer::new(&mut a).square(Point::new(1.0, 1.0), 5.0, ShapeStyle::new());
        ShapeRenderer::new(&mut b).rectangle(Point::new(1.0, 1.0), 5.0, 5.0, ShapeStyle::new());
        assert_eq!(a.calls(), b.calls());
    }

    #[test]
    fn oval_maps_width_and_rotation_onto_the_ellipse() {
        let mut surface = RecordingSurface::new(40.0, 40.0);
        ShapeRenderer::new(&mut surface).oval(
            Point::new(20.0, 20.0),
            5.0,
            10.0,
            ShapeStyle::new().rotate(30.0),
        );
        assert_eq!(
            surface.calls()[1],
            DrawCall::Ellipse {
                center: Point::new(20.0, 20.0),
                radius_x: 10.0,
                radius_y: 5.0,
                rotation: 30f32.to_radians(),
                start: 0.0,
                end: TAU,
            }
        );
    }

    #[test]
    fn filled_oval_spans_its_radii_on_a_canvas() {
        let mut canvas = Canvas::new(40, 40);
        canvas.set_stroke_color(Color::TRANSPARENT);
        ShapeRenderer::new(&mut canvas).oval(
            Point::new(20.0, 20.0),
            5.0,
            10.0,
            ShapeStyle::new().fill(Some(Color::WHITE)),
        );
        assert_eq!(painted_bounds(&canvas), Some(((10, 15), (29, 24))));
    }

    #[test]
    fn rotated_rectangle_turns_about_its_origin() {
        let mut surface = RecordingSurface::new(40.0, 40.0);
        ShapeRenderer::new(&mut surface).rectangle(
            Point::new(10.0, 10.0),
            20.0,
            10.0,
            ShapeStyle::new().radius(2.0).rotate(90.0),
        );

        let DrawCall::MoveTo(start) = surface.calls()[1] else {
            panic!("rectangle must start with a move");
        };
        assert!(near(start, Point::new(10.0, 12.0)));

        let corners: Vec<Point> = surface
            .calls()
            .iter()
            .filter_map(|c| match c {
                DrawCall::ArcTo { corner, .. } => Some(*corner),
                _ => None,
            })
            .collect();
        let expected = [
            Point::new(10.0, 20.0),
            Point::new(-10.0, 20.0),
            Point::new(-10.0, 10.0),
            Point::new(10.0, 10.0),
        ];
        assert_eq!(corners.len(), 4);
        for (got, want) in corners.iter().zip(expected) {
            assert!(near(*got, want), "{:?} != {:?}", got, want);
        }
    }

    #[test]
    fn tilted_rounded_rectangle_fills_with_cut_corners() {
        let mut canvas = Canvas::new(40, 40);
        canvas.set_stroke_color(Color::TRANSPARENT);
        ShapeRenderer::new(&mut canvas).rectangle(
            Point::new(30.0, 10.0),
            20.0,
            10.0,
            ShapeStyle::new()
                .radius(2.0)
                .rotate(90.0)
                .fill(Some(Color::WHITE)),
        );

        // a 10x20 rectangle on its side covers x 10..30, y 10..20
        assert_eq!(painted_bounds(&canvas), Some(((10, 10), (29, 19))));
        assert!(canvas.get_pixel(10, 10).is_transparent());
        assert_eq!(canvas.get_pixel(11, 11), Color::WHITE);
        assert_eq!(canvas.get_pixel(20, 15), Color::WHITE);
        let painted = canvas.painted_pixels();
        assert!((190..200).contains(&painted), "painted {}", painted);
    }
}
