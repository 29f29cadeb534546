//! Waveform presets laid along a horizontal line.

use super::{PresetContext, PresetDefinition};
use crate::geometry::{Layout, Point};
use crate::shapes::{ShapeRenderer, ShapeStyle};
use crate::transform::{apply_steps, organize, scale, shrink, split, TransformStep};

pub static STATIC: PresetDefinition = PresetDefinition {
    name: "static",
    frame_divisor: 1,
    min_samples: 16,
    draw: static_lines,
};

pub static WAVE: PresetDefinition = PresetDefinition {
    name: "wave",
    frame_divisor: 1,
    min_samples: 4,
    draw: wave,
};

pub static SHOCKWAVE: PresetDefinition = PresetDefinition {
    name: "shockwave",
    frame_divisor: 1,
    min_samples: 300,
    draw: shockwave,
};

pub static ORBS: PresetDefinition = PresetDefinition {
    name: "orbs",
    frame_divisor: 1,
    min_samples: 455,
    draw: orbs,
};

/// First of `n` equal groups, empty when the input is too short.
pub(super) fn first_group(samples: &[f32], n: usize) -> Vec<f32> {
    split(samples, n).into_iter().next().unwrap_or_default()
}

/// A zig-zag: each sample is a vertical tick joined to the next one.
fn static_lines(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let (w, h) = (ctx.width, ctx.height);
    let data = shrink(ctx.samples, 1.0 / 8.0);
    let data = scale(&first_group(&data, 2), h);

    let points = Layout::line(w, Point::new(0.0, h / 2.0), data.len())
        .offset(50.0)
        .points(&data);

    let mut prev: Option<Point> = None;
    for (start, end) in points.start.iter().zip(&points.end) {
        if let Some(prev) = prev {
            shapes.line(prev, *start, ShapeStyle::new());
        }
        shapes.line(*start, *end, ShapeStyle::new());
        prev = Some(*end);
    }
}

/// A filled rounded silhouette rising from the bottom edge.
fn wave(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let (w, h) = (ctx.width, ctx.height);
    let data = scale(&first_group(ctx.samples, 4), h);

    let points = Layout::line(w, Point::new(0.0, h), data.len())
        .offset(100.0)
        .points(&data);

    let mut outline = points.start;
    outline.truncate(points.end.len().saturating_sub(1));
    outline.push(Point::new(w, h));
    outline.push(Point::new(0.0, h));

    shapes.polygon(
        &outline,
        ShapeStyle::new()
            .line(Some(ctx.primary()))
            .fill(ctx.fill_color())
            .radius(h * 0.008),
    );
}

/// Three mirrored ribbons around the midline, one per color.
fn shockwave(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let (w, h) = (ctx.width, ctx.height);
    let data = shrink(ctx.samples, 300.0);
    let data = scale(&data, h / 2.0);

    for (i, group) in split(&data, 4).iter().take(3).enumerate() {
        let style = ShapeStyle::new()
            .line(ctx.color(i))
            .radius(h * 0.015);
        let layout = Layout::line(w, Point::new(0.0, h / 2.0), group.len());
        let wave = layout.clone().points(group);
        shapes.polygon(&wave.end, style);

        let inverted = layout.offset(100.0).points(group);
        shapes.polygon(&inverted.start, style);
    }
}

/// Symmetric sticks from the mid band with an orb on both tips.
fn orbs(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let (w, h) = (ctx.width, ctx.height);
    let mids = first_group(&organize(ctx.samples).mids, 2);
    let data = apply_steps(
        &mids,
        &[
            TransformStep::Shrink(100.0),
            TransformStep::Mirror,
            TransformStep::Scale(h),
            TransformStep::Amp(0.75),
        ],
    );

    let points = Layout::line(w, Point::new(0.0, h / 2.0), data.len())
        .offset(50.0)
        .points(&data);

    let orb = ShapeStyle::new().fill(ctx.fill_color().or_else(|| ctx.color(0)));
    let diameter = h * 0.01;
    for (start, end) in points.start.iter().zip(&points.end) {
        shapes.line(*start, *end, ShapeStyle::new().line(ctx.color(0)));
        shapes.circle(*start, diameter, orb);
        shapes.circle(*end, diameter, orb);
    }
}
