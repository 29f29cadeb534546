//! Audio-reactive preset rendering.
//!
//! A frame of frequency magnitudes (`0..=255` per bin) is reshaped by the
//! [`transform`] operators, laid out as coordinates by [`geometry::Layout`],
//! drawn as primitives by [`shapes::ShapeRenderer`] and composed into named
//! presets that [`dispatch::render`] runs once per animation tick against any
//! [`surface::Surface`].
//!
//! ```
//! use wavibe::{render, Canvas, RenderOptions};
//!
//! let mut canvas = Canvas::new(64, 32);
//! let options = RenderOptions::new(["bars", "ring"]);
//! let drawn = render(&[128u8; 1024], Some(&mut canvas), &options, 0).unwrap();
//! assert_eq!(drawn, 2);
//! ```

pub mod color;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod preset;
pub mod renderer;
pub mod shapes;
pub mod surface;
pub mod transform;

pub use color::{Color, ColorScheme};
pub use dispatch::{render, ClearMode, RenderOptions, RenderStyle};
pub use error::{RenderError, Result};
pub use geometry::{Layout, Point, PointPair};
pub use preset::{Preset, PresetRef};
pub use renderer::Canvas;
pub use shapes::{ShapeRenderer, ShapeStyle};
pub use surface::{DrawCall, RecordingSurface, Surface};
