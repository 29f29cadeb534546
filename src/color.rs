use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// Straight (non pre-multiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from hex string like "#FF0000", "#f00", "#ff000080" or "#f008".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed).ok_or_else(|| ColorError::Invalid(s.to_string()));
        }
        let lower = trimmed.to_lowercase();
        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        palette::named::from_str(&lower)
            .map(|c: Srgb<u8>| Self::rgb(c.red, c.green, c.blue))
            .ok_or_else(|| ColorError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Named generators for a preset color list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Fire,
    Ocean,
    Forest,
    Purple,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "fire" => Ok(Self::Fire),
            "ocean" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "purple" => Ok(Self::Purple),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0) and intensity (0.0 to 1.0)
    pub fn get_color(&self, position: f32, intensity: f32) -> Color {
        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // Classic spectrum: purple -> blue -> cyan -> green -> yellow -> red
                let hue = 270.0 - (position * 270.0);
                (hue, 0.9, 0.4 + intensity * 0.3)
            }
            ColorScheme::Rainbow => {
                let hue = position * 360.0;
                (hue, 0.85, 0.5 + intensity * 0.2)
            }
            ColorScheme::Fire => {
                // Red -> orange -> yellow
                let hue = position * 60.0;
                (hue, 0.95, 0.3 + intensity * 0.4)
            }
            ColorScheme::Ocean => {
                let hue = 180.0 + position * 60.0;
                (hue, 0.8, 0.3 + intensity * 0.35)
            }
            ColorScheme::Forest => {
                let hue = 80.0 + position * 60.0;
                (hue, 0.75, 0.25 + intensity * 0.35)
            }
            ColorScheme::Purple => {
                let hue = 270.0 + position * 60.0;
                (hue, 0.8, 0.35 + intensity * 0.3)
            }
            ColorScheme::Monochrome => (0.0, 0.0, 0.2 + intensity * 0.8),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        Color::rgb(
            (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// Sample `count` evenly spaced colors, brightest first for monochrome.
    pub fn palette(&self, count: usize) -> Vec<Color> {
        let count = count.max(1);
        (0..count)
            .map(|i| {
                let position = if count == 1 {
                    0.0
                } else {
                    i as f32 / (count - 1) as f32
                };
                let intensity = match self {
                    ColorScheme::Monochrome => 1.0 - position,
                    _ => 0.5,
                };
                self.get_color(position, intensity)
            })
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Spectrum => "spectrum",
            ColorScheme::Rainbow => "rainbow",
            ColorScheme::Fire => "fire",
            ColorScheme::Ocean => "ocean",
            ColorScheme::Forest => "forest",
            ColorScheme::Purple => "purple",
            ColorScheme::Monochrome => "monochrome",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[
            ColorScheme::Spectrum,
            ColorScheme::Rainbow,
            ColorScheme::Fire,
            ColorScheme::Ocean,
            ColorScheme::Forest,
            ColorScheme::Purple,
            ColorScheme::Monochrome,
        ]
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|c| c == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }
}

/// Source-over blend of `src` onto `dst`, both straight alpha.
pub fn blend_over(dst: Color, src: Color) -> Color {
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |s: u8, d: u8| {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round() as u8,
    )
}
