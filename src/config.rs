use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use wavibe::preset::PresetRef;
use wavibe::{ColorScheme, RenderOptions};

use crate::display::DisplayMode;
use crate::source::SourceKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub display: DisplayConfig,
    pub source: SourceConfig,
}

/// The `[render]` table: render options plus an optional generated palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    #[serde(flatten)]
    pub options: RenderOptions,
    /// Palette generator used when no explicit `colors` are given.
    pub scheme: Option<ColorScheme>,
}

/// Colors generated from a scheme.
const SCHEME_PALETTE_SIZE: usize = 5;

impl RenderConfig {
    /// Options with the scheme palette applied when `colors` is unset or empty.
    pub fn resolved(&self) -> RenderOptions {
        let mut options = self.options.clone();
        let has_colors = options.colors.as_ref().is_some_and(|c| !c.is_empty());
        if let (false, Some(scheme)) = (has_colors, self.scheme) {
            options.colors = Some(scheme.palette(SCHEME_PALETTE_SIZE));
        }
        options
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub fps: u32,
    pub rotate_presets: bool,
    pub rotation_interval_secs: u64,
    /// Snapshot size in pixels.
    pub width: usize,
    pub height: usize,
    /// Ticks to run before writing a snapshot.
    pub frames: u64,
    pub output: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            fps: 60,
            rotate_presets: false,
            rotation_interval_secs: 30,
            width: 800,
            height: 400,
            frames: 30,
            output: PathBuf::from("wavibe.ppm"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Frame length; half the analysis FFT size.
    pub bins: usize,
    pub sample_rate: u32,
    /// Time smoothing between consecutive analyses (0.0-1.0).
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Synthetic,
            bins: 1024,
            sample_rate: 44100,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/wavibe/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wavibe").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists.
    /// Returns None if the file doesn't exist; parse errors are logged.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(
                    "Failed to parse config at {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::generate_config_template())
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# Wavibe Configuration
# This file is auto-generated. Edit as needed.

[render]
# Preset name or list of presets drawn in order (see --list-presets)
type = "bars"
# type = ["ring", "shine"]
# Palette; the first color strokes, the second fills where a preset fills
colors = ["#d92027", "#ff9234", "#ffcd3c", "#35d0ba"]
# Generated palette used instead when colors is omitted:
# spectrum, rainbow, fire, ocean, forest, purple, monochrome
# scheme = "spectrum"
# Line width
stroke = 1.0
# Override the fill color
# fill = "#ffffff80"
# "per-tick" clears once per tick, "per-preset" before every preset
clear = "per-tick"
# Fail on unknown presets and short frames instead of skipping them
strict = false

[display]
# Display mode: "terminal" or "snapshot"
mode = "terminal"
# Ticks per second
fps = 60
# Automatically rotate presets
rotate_presets = false
# Rotation interval in seconds
rotation_interval_secs = 30
# Snapshot size in pixels
width = 800
height = 400
# Ticks to run before the snapshot is written
frames = 30
output = "wavibe.ppm"

[source]
# Frame source: "synthetic" test signal or raw "stdin" frames
kind = "synthetic"
# Bytes per frame
bins = 1024
# Sample rate of the synthetic signal in Hz
sample_rate = 44100
# Smoothing factor (0.0-1.0, higher = smoother)
smoothing = 0.8
# Decibel range mapped onto 0-255
min_decibels = -100.0
max_decibels = -30.0
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        let render = &mut self.render;
        if !args.preset.is_empty() {
            render.options.types = args
                .preset
                .iter()
                .map(|name| PresetRef::from(name.as_str()))
                .collect();
        }
        if !args.colors.is_empty() {
            render.options.colors = Some(args.colors.clone());
        }
        if let Some(scheme) = args.scheme {
            render.scheme = Some(scheme);
        }
        if let Some(stroke) = args.stroke {
            render.options.stroke = Some(stroke);
        }
        if let Some(fill) = args.fill {
            render.options.fill = Some(fill);
        }
        if let Some(clear) = args.clear {
            render.options.clear = clear;
        }
        if args.strict {
            render.options.strict = true;
        }

        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(fps) = args.fps {
            self.display.fps = fps.max(1);
        }
        if args.rotate {
            self.display.rotate_presets = true;
        }
        if let Some(secs) = args.rotate_interval {
            self.display.rotation_interval_secs = secs;
        }
        if let Some(width) = args.width {
            self.display.width = width;
        }
        if let Some(height) = args.height {
            self.display.height = height;
        }
        if let Some(frames) = args.frames {
            self.display.frames = frames;
        }
        if let Some(ref output) = args.output {
            self.display.output = output.clone();
        }

        if let Some(kind) = args.source {
            self.source.kind = kind;
        }
        if let Some(bins) = args.bins {
            self.source.bins = bins;
        }
        if let Some(smoothing) = args.smoothing {
            self.source.smoothing = smoothing.clamp(0.0, 1.0);
        }
    }
}
