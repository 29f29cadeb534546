//! Per-tick preset dispatch.
//!
//! [`render`] is the single entry point a host calls once per animation
//! tick: it resolves the requested presets, throttles them by their frame
//! divisor, primes the surface state and runs each due preset in order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::preset::{Preset, PresetContext, PresetDefinition, PresetRef};
use crate::shapes::ShapeRenderer;
use crate::surface::Surface;

pub const DEFAULT_COLORS: [Color; 4] = [
    Color::rgb(0xd9, 0x20, 0x27),
    Color::rgb(0xff, 0x92, 0x34),
    Color::rgb(0xff, 0xcd, 0x3c),
    Color::rgb(0x35, 0xd0, 0xba),
];
pub const DEFAULT_STROKE: f32 = 1.0;

/// Resolved drawing style shared by every preset in a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Never empty.
    pub colors: Vec<Color>,
    pub stroke: f32,
    /// Overrides the secondary color wherever presets fill with it.
    pub fill: Option<Color>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
            stroke: DEFAULT_STROKE,
            fill: None,
        }
    }
}

impl RenderStyle {
    /// Empty palettes and non-positive strokes fall back to the defaults.
    pub fn new(colors: Vec<Color>, stroke: f32) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            colors
        };
        let stroke = if stroke.is_finite() && stroke > 0.0 {
            stroke
        } else {
            DEFAULT_STROKE
        };
        Self {
            colors,
            stroke,
            fill: None,
        }
    }

    pub fn with_fill(mut self, fill: Option<Color>) -> Self {
        self.fill = fill;
        self
    }

    pub fn primary(&self) -> Color {
        self.colors.first().copied().unwrap_or(DEFAULT_COLORS[0])
    }
}

/// When the surface is erased during a tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ClearMode {
    /// Once before the first due preset, so layered presets stack.
    #[default]
    PerTick,
    /// Before every due preset; only the last one stays visible.
    PerPreset,
}

/// Caller-facing render options, as found in the `[render]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Presets to draw, in order. A single name or a list.
    #[serde(rename = "type", with = "preset_list")]
    pub types: Vec<PresetRef>,
    pub colors: Option<Vec<Color>>,
    pub stroke: Option<f32>,
    pub fill: Option<Color>,
    pub clear: ClearMode,
    /// Report unknown presets and short frames instead of skipping them.
    pub strict: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            types: vec![PresetRef::Known(Preset::Bars)],
            colors: None,
            stroke: None,
            fill: None,
            clear: ClearMode::default(),
            strict: false,
        }
    }
}

impl RenderOptions {
    pub fn new<I, T>(types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PresetRef>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn style(&self) -> RenderStyle {
        RenderStyle::new(
            self.colors.clone().unwrap_or_default(),
            self.stroke.unwrap_or(DEFAULT_STROKE),
        )
        .with_fill(self.fill)
    }
}

/// Accepts `type = "bars"` as well as `type = ["bars", "ring"]`.
mod preset_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::preset::PresetRef;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PresetRef),
        Many(Vec<PresetRef>),
    }

    pub fn serialize<S>(types: &[PresetRef], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        types.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<PresetRef>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(one) => vec![one],
            OneOrMany::Many(many) => many,
        })
    }
}

/// Draw one tick of `options` onto `target`.
///
/// Returns how many presets were drawn. A missing target draws nothing.
/// `frame` is the host's tick counter and drives the divisor throttle.
pub fn render<S: Surface>(
    samples: &[u8],
    target: Option<&mut S>,
    options: &RenderOptions,
    frame: u64,
) -> Result<usize> {
    let Some(surface) = target else {
        trace!("no render target, skipping tick");
        return Ok(0);
    };

    let mut definitions = Vec::with_capacity(options.types.len());
    for requested in &options.types {
        match requested {
            PresetRef::Known(preset) => definitions.push(preset.definition()),
            PresetRef::Unknown(name) if options.strict => {
                return Err(RenderError::UnknownPreset { name: name.clone() });
            }
            PresetRef::Unknown(name) => debug!(preset = %name, "skipping unknown preset"),
        }
    }

    render_definitions(
        samples,
        surface,
        &options.style(),
        &definitions,
        options.clear,
        options.strict,
        frame,
    )
}

/// Lower-level dispatch over already resolved definitions.
pub fn render_definitions(
    samples: &[u8],
    surface: &mut dyn Surface,
    style: &RenderStyle,
    definitions: &[&PresetDefinition],
    clear: ClearMode,
    strict: bool,
    frame: u64,
) -> Result<usize> {
    let due: Vec<&PresetDefinition> = definitions
        .iter()
        .copied()
        .filter(|d| d.is_due(frame))
        .collect();
    if due.is_empty() {
        debug!(frame, "no preset due this tick");
        return Ok(0);
    }

    if strict {
        if let Some(short) = due.iter().find(|d| samples.len() < d.min_samples) {
            return Err(RenderError::InsufficientSamples {
                preset: short.name,
                required: short.min_samples,
                actual: samples.len(),
            });
        }
    }

    // one copy per tick; presets only ever borrow it
    let data: Vec<f32> = samples.iter().map(|&v| f32::from(v)).collect();
    let ctx = PresetContext {
        samples: &data,
        style,
        width: surface.width(),
        height: surface.height(),
    };

    if clear == ClearMode::PerTick {
        surface.clear();
    }
    for definition in &due {
        if clear == ClearMode::PerPreset {
            surface.clear();
        }
        surface.begin_path();
        surface.set_stroke_color(style.primary());
        surface.set_line_width(style.stroke);
        (definition.draw)(&ctx, &mut ShapeRenderer::new(&mut *surface));
    }
    Ok(due.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};

    #[test]
    fn style_falls_back_to_defaults() {
        let style = RenderOptions {
            colors: Some(Vec::new()),
            stroke: Some(0.0),
            ..RenderOptions::default()
        }
        .style();
        assert_eq!(style.colors, DEFAULT_COLORS.to_vec());
        assert_eq!(style.stroke, DEFAULT_STROKE);
    }

    #[test]
    fn options_accept_a_single_type_or_a_list() {
        let one: RenderOptions = toml::from_str(r#"type = "bars""#).unwrap();
        assert_eq!(one.types, vec![PresetRef::Known(Preset::Bars)]);

        let many: RenderOptions = toml::from_str(
            r##"
            type = ["ring", "sparkles"]
            colors = ["#fff", "red"]
            clear = "per-preset"
            "##,
        )
        .unwrap();
        assert_eq!(
            many.types,
            vec![
                PresetRef::Known(Preset::Ring),
                PresetRef::Unknown("sparkles".into())
            ]
        );
        assert_eq!(many.clear, ClearMode::PerPreset);
        assert_eq!(many.style().colors[1], Color::rgb(255, 0, 0));
    }

    #[test]
    fn primes_stroke_state_before_each_preset() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut options = RenderOptions::new(["wave", "bars"]);
        options.stroke = Some(3.0);
        let drawn = render(&[10; 1024], Some(&mut surface), &options, 0).unwrap();
        assert_eq!(drawn, 2);
        assert_eq!(surface.calls()[0], DrawCall::Clear);
        assert_eq!(
            surface.count(|c| matches!(c, DrawCall::SetLineWidth(w) if *w == 3.0)),
            2
        );
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Clear)), 1);
    }

    #[test]
    fn strict_mode_checks_before_drawing() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut options = RenderOptions::new(["bars", "orbs"]);
        options.strict = true;
        let err = render(&[0; 100], Some(&mut surface), &options, 0).unwrap_err();
        assert_eq!(
            err,
            RenderError::InsufficientSamples {
                preset: "orbs",
                required: 455,
                actual: 100
            }
        );
        assert!(surface.calls().is_empty());
    }
}
