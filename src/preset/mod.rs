//! The built-in preset catalog.
//!
//! Each preset is a plain function composing transforms, layouts and shapes.
//! [`Preset`] is the closed set of identifiers; [`Preset::definition`] maps
//! every variant to its [`PresetDefinition`] with an exhaustive match, so a
//! new variant cannot be added without registering its drawing function.

mod bars;
mod radial;
mod waves;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::dispatch::RenderStyle;
use crate::geometry::Point;
use crate::shapes::ShapeRenderer;
use crate::surface::{DrawCall, RecordingSurface, Surface};

/// Everything a preset sees during one tick.
pub struct PresetContext<'a> {
    pub samples: &'a [f32],
    pub style: &'a RenderStyle,
    pub width: f32,
    pub height: f32,
}

impl<'a> PresetContext<'a> {
    /// Sample at `index`, `NaN` when the frame is too short.
    #[inline]
    pub fn at(&self, index: usize) -> f32 {
        self.samples.get(index).copied().unwrap_or(f32::NAN)
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.style.colors.get(index).copied()
    }

    /// The default stroke color.
    pub fn primary(&self) -> Color {
        self.style.primary()
    }

    /// The secondary color presets fill with.
    pub fn fill_color(&self) -> Option<Color> {
        self.style.fill.or_else(|| self.color(1))
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

pub type DrawFn = fn(&PresetContext<'_>, &mut ShapeRenderer<'_>);

/// A named drawing function with its throttle.
#[derive(Clone, Copy)]
pub struct PresetDefinition {
    pub name: &'static str,
    /// Redraw only on ticks where `frame % frame_divisor == 0`.
    pub frame_divisor: u32,
    /// Shortest frame for which every read of the preset is in range.
    pub min_samples: usize,
    pub draw: DrawFn,
}

impl fmt::Debug for PresetDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetDefinition")
            .field("name", &self.name)
            .field("frame_divisor", &self.frame_divisor)
            .field("min_samples", &self.min_samples)
            .finish()
    }
}

impl PresetDefinition {
    pub fn is_due(&self, frame: u64) -> bool {
        frame % u64::from(self.frame_divisor.max(1)) == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Bars,
    Dualbars,
    BarsBlocks,
    DualbarsBlocks,
    BigBars,
    Flower,
    FlowerBlocks,
    Ring,
    Rings,
    RoundWave,
    Shine,
    ShineRings,
    Shockwave,
    Star,
    Static,
    Stitches,
    Orbs,
    Cubes,
    Fireworks,
    Wave,
    Web,
}

impl Preset {
    pub const ALL: [Preset; 21] = [
        Preset::Bars,
        Preset::Dualbars,
        Preset::BarsBlocks,
        Preset::DualbarsBlocks,
        Preset::BigBars,
        Preset::Flower,
        Preset::FlowerBlocks,
        Preset::Ring,
        Preset::Rings,
        Preset::RoundWave,
        Preset::Shine,
        Preset::ShineRings,
        Preset::Shockwave,
        Preset::Star,
        Preset::Static,
        Preset::Stitches,
        Preset::Orbs,
        Preset::Cubes,
        Preset::Fireworks,
        Preset::Wave,
        Preset::Web,
    ];

    pub fn definition(self) -> &'static PresetDefinition {
        match self {
            Preset::Bars => &bars::BARS,
            Preset::Dualbars => &bars::DUALBARS,
            Preset::BarsBlocks => &bars::BARS_BLOCKS,
            Preset::DualbarsBlocks => &bars::DUALBARS_BLOCKS,
            Preset::BigBars => &bars::BIG_BARS,
            Preset::Cubes => &bars::CUBES,
            Preset::Flower => &radial::FLOWER,
            Preset::FlowerBlocks => &radial::FLOWER_BLOCKS,
            Preset::Ring => &radial::RING,
            Preset::Rings => &radial::RINGS,
            Preset::RoundWave => &radial::ROUND_WAVE,
            Preset::Shine => &radial::SHINE,
            Preset::ShineRings => &radial::SHINE_RINGS,
            Preset::Star => &radial::STAR,
            Preset::Stitches => &radial::STITCHES,
            Preset::Fireworks => &radial::FIREWORKS,
            Preset::Web => &radial::WEB,
            Preset::Shockwave => &waves::SHOCKWAVE,
            Preset::Static => &waves::STATIC,
            Preset::Orbs => &waves::ORBS,
            Preset::Wave => &waves::WAVE,
        }
    }

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn next(self) -> Self {
        let current = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(current + 1) % Self::ALL.len()]
    }

    /// Draw into `surface` with a fresh path and the style's stroke settings.
    pub fn draw(self, samples: &[f32], style: &RenderStyle, surface: &mut dyn Surface) {
        let ctx = PresetContext {
            samples,
            style,
            width: surface.width(),
            height: surface.height(),
        };
        surface.begin_path();
        surface.set_stroke_color(style.primary());
        surface.set_line_width(style.stroke);
        (self.definition().draw)(&ctx, &mut ShapeRenderer::new(surface));
    }

    /// The preset as a pure function of its inputs.
    pub fn draw_calls(
        self,
        samples: &[u8],
        style: &RenderStyle,
        width: f32,
        height: f32,
    ) -> Vec<DrawCall> {
        let data: Vec<f32> = samples.iter().map(|&v| f32::from(v)).collect();
        let mut surface = RecordingSurface::new(width, height);
        self.draw(&data, style, &mut surface);
        surface.into_calls()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    /// Accepts the canonical kebab-case names as well as spaced or
    /// underscored spellings ("bars blocks", "round_wave").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == normalized)
            .ok_or_else(|| format!("Unknown preset: {}", s))
    }
}

impl Serialize for Preset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Preset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Preset::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A requested preset name, resolved once against the catalog.
///
/// Unknown names are kept so the dispatcher can decide between skipping
/// them and reporting them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetRef {
    Known(Preset),
    Unknown(String),
}

impl From<&str> for PresetRef {
    fn from(name: &str) -> Self {
        match Preset::from_str(name) {
            Ok(preset) => PresetRef::Known(preset),
            Err(_) => PresetRef::Unknown(name.to_string()),
        }
    }
}

impl From<Preset> for PresetRef {
    fn from(preset: Preset) -> Self {
        PresetRef::Known(preset)
    }
}

impl fmt::Display for PresetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetRef::Known(preset) => write!(f, "{}", preset),
            PresetRef::Unknown(name) => f.write_str(name),
        }
    }
}

impl Serialize for PresetRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PresetRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PresetRef::from(s.as_str()))
    }
}

/// Draws one stroke per color band while a preset walks its points.
pub(crate) struct ColorBands<'a> {
    colors: &'a [Color],
    breakpoint: usize,
}

impl<'a> ColorBands<'a> {
    pub(crate) fn new(colors: &'a [Color], point_count: usize) -> Self {
        Self {
            colors,
            breakpoint: (point_count / colors.len().max(1)).max(1),
        }
    }

    /// Stroke the accumulated path when `point` closes a band.
    pub(crate) fn after(&self, surface: &mut dyn Surface, point: usize) {
        if point % self.breakpoint != 0 {
            return;
        }
        let band = point / self.breakpoint - 1;
        if let Some(color) = self.colors.get(band.min(self.colors.len().saturating_sub(1))) {
            surface.set_stroke_color(*color);
        }
        surface.stroke();
        surface.begin_path();
    }

    /// Stroke whatever the last incomplete band left on the path.
    pub(crate) fn finish(&self, surface: &mut dyn Surface, point_count: usize) {
        if point_count % self.breakpoint != 0 {
            surface.stroke();
        }
    }
}

/// Run a drawing function against a recording surface primed like a tick.
#[cfg(test)]
pub(crate) fn record(
    draw: DrawFn,
    samples: &[f32],
    style: &RenderStyle,
    width: f32,
    height: f32,
) -> RecordingSurface {
    let mut surface = RecordingSurface::new(width, height);
    let ctx = PresetContext {
        samples,
        style,
        width,
        height,
    };
    surface.set_stroke_color(style.primary());
    draw(&ctx, &mut ShapeRenderer::new(&mut surface));
    surface
}
