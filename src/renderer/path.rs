//! Canvas-style path construction on a `kurbo::BezPath`.
//!
//! Commands with non-finite arguments are dropped, matching the behavior of
//! an HTML canvas. Arcs and ellipses are kept as cubic segments and only
//! converted for tiny-skia when the path is stroked or filled.

use std::f64::consts::{PI, TAU};

use kurbo::{BezPath, PathEl, Vec2};

use crate::geometry::Point;

/// Maximum distance between an arc and its cubic approximation, in pixels.
const ARC_TOLERANCE: f64 = 0.1;

#[inline]
fn pt(p: Point) -> kurbo::Point {
    kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}

#[derive(Debug, Clone, Default)]
pub struct CanvasPath {
    path: BezPath,
    current: Option<kurbo::Point>,
    /// First point of the current subpath.
    start: Option<kurbo::Point>,
    /// Set by `close_path`: the next segment reopens at `start`.
    closed: bool,
}

impl CanvasPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current.map(|p| Point::new(p.x as f32, p.y as f32))
    }

    pub fn move_to(&mut self, p: Point) {
        if p.is_finite() {
            self.begin_at(pt(p));
        }
    }

    fn begin_at(&mut self, p: kurbo::Point) {
        self.path.move_to(p);
        self.current = Some(p);
        self.start = Some(p);
        self.closed = false;
    }

    /// Make sure a subpath is open before appending a segment.
    fn reopen(&mut self) {
        if self.closed {
            if let Some(start) = self.start {
                self.begin_at(start);
            }
        }
    }

    fn line_to_pt(&mut self, p: kurbo::Point) {
        if self.current.is_none() {
            self.begin_at(p);
            return;
        }
        self.reopen();
        self.path.line_to(p);
        self.current = Some(p);
    }

    pub fn line_to(&mut self, p: Point) {
        if p.is_finite() {
            self.line_to_pt(pt(p));
        }
    }

    pub fn quadratic_to(&mut self, control: Point, to: Point) {
        if !control.is_finite() || !to.is_finite() {
            return;
        }
        if self.current.is_none() {
            self.begin_at(pt(control));
        }
        self.reopen();
        self.path.quad_to(pt(control), pt(to));
        self.current = Some(pt(to));
    }

    pub fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        if !center.is_finite() || ![radius, start, end].iter().all(|v| v.is_finite()) || radius < 0.0
        {
            return;
        }
        let radius = f64::from(radius);
        let start = f64::from(start);
        let sweep = arc_sweep(start, f64::from(end), anticlockwise);
        self.append_arc(pt(center), Vec2::new(radius, radius), 0.0, start, sweep);
    }

    pub fn ellipse(
        &mut self,
        center: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start: f32,
        end: f32,
    ) {
        let values = [radius_x, radius_y, rotation, start, end];
        if !center.is_finite() || !values.iter().all(|v| v.is_finite()) {
            return;
        }
        if radius_x < 0.0 || radius_y < 0.0 {
            return;
        }
        let start = f64::from(start);
        let sweep = arc_sweep(start, f64::from(end), false);
        self.append_arc(
            pt(center),
            Vec2::new(f64::from(radius_x), f64::from(radius_y)),
            f64::from(rotation),
            start,
            sweep,
        );
    }

    /// Connect to the arc's first point, then follow it through `sweep` radians.
    fn append_arc(
        &mut self,
        center: kurbo::Point,
        radii: Vec2,
        rotation: f64,
        start: f64,
        sweep: f64,
    ) {
        self.line_to_pt(ellipse_point(center, radii, rotation, start));
        if sweep == 0.0 || radii.x == 0.0 || radii.y == 0.0 {
            return;
        }
        let arc = kurbo::Arc {
            center,
            radii,
            start_angle: start,
            sweep_angle: sweep,
            x_rotation: rotation,
        };
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(el);
        }
        self.current = Some(ellipse_point(center, radii, rotation, start + sweep));
    }

    pub fn arc_to(&mut self, corner: Point, towards: Point, radius: f32) {
        if !corner.is_finite() || !towards.is_finite() || !radius.is_finite() || radius < 0.0 {
            return;
        }
        let (corner, towards, radius) = (pt(corner), pt(towards), f64::from(radius));
        let Some(from) = self.current else {
            self.begin_at(corner);
            return;
        };

        let a = from - corner;
        let b = towards - corner;
        let (len_a, len_b) = (a.hypot(), b.hypot());
        if radius == 0.0 || len_a == 0.0 || len_b == 0.0 || a.cross(b).abs() < 1e-6 * len_a * len_b
        {
            self.line_to_pt(corner);
            return;
        }

        let (u, v) = (a / len_a, b / len_b);
        let theta = u.dot(v).clamp(-1.0, 1.0).acos();
        let t1 = corner + u * (radius / (theta / 2.0).tan());
        let t2 = corner + v * (radius / (theta / 2.0).tan());
        let bisector = (u + v).normalize();
        let center = corner + bisector * (radius / (theta / 2.0).sin());

        let a0 = (t1 - center).atan2();
        let a1 = (t2 - center).atan2();
        let mut delta = a1 - a0;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }
        self.append_arc(center, Vec2::new(radius, radius), 0.0, a0, delta);
    }

    pub fn rect(&mut self, origin: Point, width: f32, height: f32) {
        if !origin.is_finite() || !width.is_finite() || !height.is_finite() {
            return;
        }
        let o = pt(origin);
        let (w, h) = (f64::from(width), f64::from(height));
        self.path.move_to(o);
        self.path.line_to((o.x + w, o.y));
        self.path.line_to((o.x + w, o.y + h));
        self.path.line_to((o.x, o.y + h));
        self.path.close_path();
        self.begin_at(o);
    }

    pub fn close_path(&mut self) {
        if self.current.is_none() || self.closed {
            return;
        }
        self.path.close_path();
        self.closed = true;
        self.current = self.start;
    }

    /// Convert for tiny-skia; `None` when nothing drawable is left.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder = tiny_skia::PathBuilder::new();
        for el in self.path.elements() {
            match *el {
                PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                PathEl::QuadTo(c, p) => {
                    builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32)
                }
                PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                PathEl::ClosePath => builder.close(),
            }
        }
        builder.finish()
    }
}

fn ellipse_point(center: kurbo::Point, radii: Vec2, rotation: f64, angle: f64) -> kurbo::Point {
    let (sin, cos) = angle.sin_cos();
    let (x, y) = (radii.x * cos, radii.y * sin);
    let (sin_r, cos_r) = rotation.sin_cos();
    kurbo::Point::new(
        center.x + x * cos_r - y * sin_r,
        center.y + x * sin_r + y * cos_r,
    )
}

/// Signed sweep in radians following canvas arc rules.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if !anticlockwise && end - start >= TAU {
        return TAU;
    }
    if anticlockwise && start - end >= TAU {
        return -TAU;
    }
    let forward = (end - start).rem_euclid(TAU);
    if anticlockwise {
        if forward > 0.0 {
            forward - TAU
        } else {
            0.0
        }
    } else {
        forward
    }
}
