//! Pixel-based surface
//!
//! [`Canvas`] owns a `tiny_skia::Pixmap` and implements [`Surface`]: path
//! commands accumulate in a [`CanvasPath`] and are rasterized by tiny-skia
//! on stroke or fill, composited source-over without anti-aliasing.

pub mod path;

use tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};

use crate::color::{blend_over, Color};
use crate::geometry::Point;
use crate::surface::Surface;

use path::CanvasPath;

/// Owned RGBA pixel surface.
///
/// Pixels are stored premultiplied by tiny-skia; [`Canvas::get_pixel`]
/// returns straight alpha. A zero-sized canvas has no pixmap and ignores
/// every draw.
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pixmap: Option<Pixmap>,
    path: CanvasPath,
    stroke_color: Color,
    fill_color: Color,
    line_width: f32,
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixmap: Pixmap::new(width as u32, height as u32),
            path: CanvasPath::new(),
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
        }
    }

    /// Resize the canvas; the contents are cleared.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixmap = Pixmap::new(width as u32, height as u32);
    }

    /// Blend `color` over the pixel at (x, y).
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (Some(pixmap), Some(rect)) = (
            self.pixmap.as_mut(),
            tiny_skia::Rect::from_xywh(x as f32, y as f32, 1.0, 1.0),
        ) else {
            return;
        };
        pixmap.fill_rect(rect, &paint_for(color), Transform::identity(), None);
    }

    /// Read the color at (x, y); out of bounds reads are transparent.
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        self.pixmap
            .as_ref()
            .and_then(|p| p.pixel(x as u32, y as u32))
            .map(|px| {
                let c = px.demultiply();
                Color::rgba(c.red(), c.green(), c.blue(), c.alpha())
            })
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Count pixels that are not fully transparent.
    pub fn painted_pixels(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |p| {
            p.pixels().iter().filter(|px| px.alpha() != 0).count()
        })
    }

    /// Encode as a binary PPM, compositing over `background`.
    pub fn to_ppm(&self, background: Color) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let px = blend_over(background, self.get_pixel(x, y));
                out.extend_from_slice(&[px.r, px.g, px.b]);
            }
        }
        out
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, to: Point) {
        self.path.move_to(to);
    }

    fn line_to(&mut self, to: Point) {
        self.path.line_to(to);
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.path.quadratic_to(control, to);
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, anticlockwise: bool) {
        self.path.arc(center, radius, start, end, anticlockwise);
    }

    fn arc_to(&mut self, corner: Point, towards: Point, radius: f32) {
        self.path.arc_to(corner, towards, radius);
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
        self.path
            .ellipse(center, radius_x, radius_y, rotation, start, end);
    }

    fn rect(&mut self, origin: Point, width: f32, height: f32) {
        self.path.rect(origin, width, height);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn stroke(&mut self) {
        if self.stroke_color.is_transparent() {
            return;
        }
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), self.path.to_skia()) else {
            return;
        };
        let stroke = Stroke {
            width: self.line_width,
            ..Stroke::default()
        };
        pixmap.stroke_path(
            &path,
            &paint_for(self.stroke_color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn fill(&mut self) {
        if self.fill_color.is_transparent() {
            return;
        }
        let (Some(pixmap), Some(path)) = (self.pixmap.as_mut(), self.path.to_skia()) else {
            return;
        };
        pixmap.fill_path(
            &path,
            &paint_for(self.fill_color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn stroke_color(&self) -> Color {
        self.stroke_color
    }
}
