//! Stateless reshaping operators over magnitude sequences.
//!
//! Every operator borrows its input and returns a fresh vector; nothing keeps
//! a reference to the caller's buffer past the call. Reads outside the input
//! produce `NaN` rather than panicking, which the surfaces later ignore.

/// Index boundaries used by [`organize`].
pub const BASE_RANGE: (usize, usize) = (60, 120);
pub const VOCALS_RANGE: (usize, usize) = (120, 255);
pub const MIDS_RANGE: (usize, usize) = (255, 2000);

/// Three fixed-index regions of a frequency-bin array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bands {
    pub base: Vec<f32>,
    pub vocals: Vec<f32>,
    pub mids: Vec<f32>,
}

/// A sequence-to-sequence operator with its parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformStep {
    Mirror,
    Shrink(f32),
    Scale(f32),
    Reverb,
    Amp(f32),
    ClampMin(f32),
    /// Keep only the first `n` elements.
    Take(usize),
}

impl TransformStep {
    pub fn apply(&self, samples: &[f32]) -> Vec<f32> {
        match *self {
            TransformStep::Mirror => mirror(samples),
            TransformStep::Shrink(n) => shrink(samples, n),
            TransformStep::Scale(factor) => scale(samples, factor),
            TransformStep::Reverb => reverb(samples),
            TransformStep::Amp(factor) => amp(samples, factor),
            TransformStep::ClampMin(floor) => clamp_min(samples, floor),
            TransformStep::Take(n) => samples.iter().take(n).copied().collect(),
        }
    }
}

/// Run `steps` in order. The order is never rearranged.
pub fn apply_steps(samples: &[f32], steps: &[TransformStep]) -> Vec<f32> {
    steps
        .iter()
        .fold(samples.to_vec(), |data, step| step.apply(&data))
}

/// Even-index elements followed by the same elements reversed.
pub fn mirror(samples: &[f32]) -> Vec<f32> {
    let picked: Vec<f32> = samples.iter().step_by(2).copied().collect();
    let mut out = Vec::with_capacity(picked.len() * 2);
    out.extend_from_slice(&picked);
    out.extend(picked.iter().rev());
    out
}

/// Downsample to `n` buckets, keeping the middle element of each bucket.
///
/// A fractional `n` below 1 is a ratio of the input length.
pub fn shrink(samples: &[f32], n: f32) -> Vec<f32> {
    let n = if n < 1.0 { samples.len() as f32 * n } else { n };
    if !n.is_finite() || n < 1.0 {
        return Vec::new();
    }
    let count = n.floor() as usize;
    let split_at = (samples.len() as f32 / n).floor() as usize;

    (0..count)
        .map(|bucket| {
            let start = (bucket * split_at).min(samples.len());
            let end = (start + split_at).min(samples.len());
            let section = &samples[start..end];
            section.get(section.len() / 2).copied().unwrap_or(f32::NAN)
        })
        .collect()
}

/// Partition into `n` contiguous groups of `⌊len/n⌋`, dropping the remainder.
pub fn split(samples: &[f32], n: usize) -> Vec<Vec<f32>> {
    if n == 0 {
        return Vec::new();
    }
    let size = samples.len() / n;
    (0..n)
        .map(|group| samples[group * size..(group + 1) * size].to_vec())
        .collect()
}

/// Multiply directly for factors in `[0, 3]`, otherwise remap `[0, 255]` onto
/// `[0, factor]`.
pub fn scale(samples: &[f32], factor: f32) -> Vec<f32> {
    let multiplier = if (0.0..=3.0).contains(&factor) {
        factor
    } else {
        factor / 255.0
    };
    samples.iter().map(|v| v * multiplier).collect()
}

pub fn organize(samples: &[f32]) -> Bands {
    Bands {
        base: clamped_slice(samples, BASE_RANGE),
        vocals: clamped_slice(samples, VOCALS_RANGE),
        mids: clamped_slice(samples, MIDS_RANGE),
    }
}

/// Forward difference; the last element is kept as is.
pub fn reverb(samples: &[f32]) -> Vec<f32> {
    samples
        .iter()
        .enumerate()
        .map(|(i, v)| v - samples.get(i + 1).copied().unwrap_or(0.0))
        .collect()
}

pub fn amp(samples: &[f32], factor: f32) -> Vec<f32> {
    samples.iter().map(|v| v * (1.0 + factor)).collect()
}

pub fn clamp_min(samples: &[f32], floor: f32) -> Vec<f32> {
    samples
        .iter()
        .map(|&v| if v < floor { floor } else { v })
        .collect()
}

fn clamped_slice(samples: &[f32], (start, end): (usize, usize)) -> Vec<f32> {
    let end = end.min(samples.len());
    let start = start.min(end);
    samples[start..end].to_vec()
}
