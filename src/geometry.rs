//! Point layouts: map a sample sequence onto a line or a circle.

use std::f32::consts::PI;

/// A 2D surface coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Rotate clockwise (in surface coordinates, y pointing down) about `origin`.
    pub fn rotate_about(self, origin: Point, degrees: f32) -> Point {
        if degrees == 0.0 {
            return self;
        }
        let angle = degrees.to_radians();
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Point::new(
            cos * dx - sin * dy + origin.x,
            sin * dx + cos * dy + origin.y,
        )
    }

    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`.
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

/// Convert polar coordinates around `center` to a surface point.
#[inline]
pub fn polar(center: Point, angle: f32, radius: f32) -> Point {
    Point::new(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutShape {
    Line,
    Circle,
}

/// Paired inner/outer (or top/bottom) coordinates, index-aligned with the samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointPair {
    pub start: Vec<Point>,
    pub end: Vec<Point>,
}

/// Describes how samples are laid out.
///
/// `size` is the line length or the circle diameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub shape: LayoutShape,
    pub size: f32,
    pub origin: Point,
    pub point_count: usize,
    /// Percentage of each sample the ribbon is pulled back towards the origin side.
    pub offset_percent: f32,
    pub rotate_degrees: f32,
    pub custom_origin: Option<Point>,
}

impl Layout {
    pub fn line(size: f32, origin: Point, point_count: usize) -> Self {
        Self::new(LayoutShape::Line, size, origin, point_count)
    }

    pub fn circle(diameter: f32, center: Point, point_count: usize) -> Self {
        Self::new(LayoutShape::Circle, diameter, center, point_count)
    }

    fn new(shape: LayoutShape, size: f32, origin: Point, point_count: usize) -> Self {
        Self {
            shape,
            size,
            origin,
            point_count,
            offset_percent: 0.0,
            rotate_degrees: 0.0,
            custom_origin: None,
        }
    }

    pub fn offset(mut self, percent: f32) -> Self {
        self.offset_percent = percent;
        self
    }

    pub fn rotate(mut self, degrees: f32) -> Self {
        self.rotate_degrees = degrees;
        self
    }

    pub fn custom_origin(mut self, origin: Point) -> Self {
        self.custom_origin = Some(origin);
        self
    }

    /// Generate the start/end coordinates for `samples`.
    ///
    /// Line layouts yield `point_count + 1` pairs, circle layouts `point_count`.
    /// A sample missing from `samples` contributes a non-finite point.
    pub fn points(&self, samples: &[f32]) -> PointPair {
        match self.shape {
            LayoutShape::Line => self.line_points(samples),
            LayoutShape::Circle => self.circle_points(samples),
        }
    }

    fn line_points(&self, samples: &[f32]) -> PointPair {
        let origin = self.custom_origin.unwrap_or(self.origin);
        let increment = self.size / self.point_count as f32;
        let mut pair = PointPair {
            start: Vec::with_capacity(self.point_count + 1),
            end: Vec::with_capacity(self.point_count + 1),
        };

        for i in 0..=self.point_count {
            let sample = sample_at(samples, i);
            let offset = sample * (self.offset_percent / 100.0);
            let x = origin.x + i as f32 * increment;

            pair.start.push(
                Point::new(x, origin.y - offset).rotate_about(origin, self.rotate_degrees),
            );
            pair.end.push(
                Point::new(x, origin.y + sample - offset)
                    .rotate_about(origin, self.rotate_degrees),
            );
        }
        pair
    }

    fn circle_points(&self, samples: &[f32]) -> PointPair {
        let origin = self.origin;
        let radians_per_point = (360.0 / self.point_count as f32) * PI / 180.0;
        let radius = self.size / 2.0;
        let mut pair = PointPair {
            start: Vec::with_capacity(self.point_count),
            end: Vec::with_capacity(self.point_count),
        };

        for i in 1..=self.point_count {
            let angle = radians_per_point * i as f32;
            let sample = sample_at(samples, i - 1);
            let inner = radius - sample * (self.offset_percent / 100.0);

            pair.start
                .push(polar(origin, angle, inner).rotate_about(origin, self.rotate_degrees));
            pair.end.push(
                polar(origin, angle, inner + sample).rotate_about(origin, self.rotate_degrees),
            );
        }
        pair
    }
}

#[inline]
fn sample_at(samples: &[f32], i: usize) -> f32 {
    samples.get(i).copied().unwrap_or(f32::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        let p = Point::new(10.0, 0.0).rotate_about(Point::default(), 90.0);
        assert!(close(p, Point::new(0.0, 10.0)));
        let q = Point::new(2.0, 1.0).rotate_about(Point::new(1.0, 1.0), 180.0);
        assert!(close(q, Point::new(0.0, 1.0)));
    }

    #[test]
    fn circle_start_points_sit_on_radius() {
        let pair = Layout::circle(200.0, Point::default(), 4).points(&[0.0; 4]);
        assert_eq!(pair.start.len(), 4);
        assert_eq!(pair.end.len(), 4);
        let expected = [
            Point::new(0.0, 100.0),
            Point::new(-100.0, 0.0),
            Point::new(0.0, -100.0),
            Point::new(100.0, 0.0),
        ];
        for (got, want) in pair.start.iter().zip(expected) {
            assert!(close(*got, want), "{got:?} != {want:?}");
        }
    }

    #[test]
    fn circle_end_extends_by_sample() {
        let pair = Layout::circle(200.0, Point::new(50.0, 50.0), 4).points(&[10.0, 0.0, 0.0, 20.0]);
        assert!(close(pair.end[0], Point::new(50.0, 160.0)));
        assert!(close(pair.end[3], Point::new(170.0, 50.0)));
    }

    #[test]
    fn circle_offset_pulls_inner_edge() {
        let pair = Layout::circle(200.0, Point::default(), 4)
            .offset(50.0)
            .points(&[20.0; 4]);
        assert!((pair.start[0].distance(Point::default()) - 90.0).abs() < 1e-3);
        assert!((pair.end[0].distance(Point::default()) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn line_yields_one_extra_point() {
        let pair = Layout::line(100.0, Point::new(0.0, 50.0), 4).points(&[10.0; 5]);
        assert_eq!(pair.start.len(), 5);
        assert_eq!(pair.end.len(), 5);
        assert!(close(pair.start[4], Point::new(100.0, 50.0)));
        assert!(close(pair.end[2], Point::new(50.0, 60.0)));
    }

    #[test]
    fn line_offset_centres_ribbon() {
        let pair = Layout::line(10.0, Point::new(0.0, 50.0), 1)
            .offset(50.0)
            .points(&[20.0, 20.0]);
        assert!(close(pair.start[0], Point::new(0.0, 40.0)));
        assert!(close(pair.end[0], Point::new(0.0, 60.0)));
    }

    #[test]
    fn line_missing_sample_is_not_finite() {
        let pair = Layout::line(10.0, Point::default(), 2).points(&[1.0, 2.0]);
        assert!(pair.start[1].is_finite());
        assert!(!pair.start[2].is_finite());
    }

    #[test]
    fn custom_origin_replaces_origin() {
        let pair = Layout::line(10.0, Point::default(), 1)
            .custom_origin(Point::new(5.0, 5.0))
            .points(&[0.0, 0.0]);
        assert!(close(pair.start[0], Point::new(5.0, 5.0)));
    }

    #[test]
    fn rotated_line_turns_about_origin() {
        let pair = Layout::line(10.0, Point::default(), 1)
            .rotate(90.0)
            .points(&[0.0, 0.0]);
        assert!(close(pair.start[1], Point::new(0.0, 10.0)));
    }
}
