//! Error types for the rendering core.
//!
//! Most of the pipeline is permissive: short sample frames and
//! unknown preset names render nothing instead of failing. These errors are
//! only produced when the caller opts into strict rendering.

/// Result alias for rendering calls.
pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    /// A requested preset name does not match any catalog entry.
    #[error("unknown preset '{name}'")]
    UnknownPreset { name: String },
    /// The frame is shorter than the range a preset reads from.
    #[error("preset '{preset}' needs at least {required} samples, got {actual}")]
    InsufficientSamples {
        preset: &'static str,
        required: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color '{0}': expected #rgb, #rgba, #rrggbb, #rrggbbaa or a CSS color name")]
    Invalid(String),
}
