//! Presets arranged around the surface center.

use std::f32::consts::TAU;

use super::waves::first_group;
use super::{ColorBands, PresetContext, PresetDefinition};
use crate::color::Color;
use crate::geometry::{polar, Layout};
use crate::shapes::{ShapeRenderer, ShapeStyle};
use crate::transform::{mirror, organize, reverb, scale, shrink};

pub static FLOWER: PresetDefinition = PresetDefinition {
    name: "flower",
    frame_divisor: 1,
    min_samples: 129,
    draw: flower,
};

pub static FLOWER_BLOCKS: PresetDefinition = PresetDefinition {
    name: "flower-blocks",
    frame_divisor: 1,
    min_samples: 57,
    draw: flower_blocks,
};

pub static RING: PresetDefinition = PresetDefinition {
    name: "ring",
    frame_divisor: 1,
    min_samples: 76,
    draw: ring,
};

pub static RINGS: PresetDefinition = PresetDefinition {
    name: "rings",
    frame_divisor: 1,
    min_samples: 265,
    draw: rings,
};

pub static ROUND_WAVE: PresetDefinition = PresetDefinition {
    name: "round-wave",
    frame_divisor: 1,
    min_samples: 87,
    draw: round_wave,
};

pub static SHINE: PresetDefinition = PresetDefinition {
    name: "shine",
    frame_divisor: 1,
    min_samples: 300,
    draw: shine,
};

pub static SHINE_RINGS: PresetDefinition = PresetDefinition {
    name: "shine-rings",
    frame_divisor: 1,
    min_samples: 121,
    draw: shine_rings,
};

pub static STAR: PresetDefinition = PresetDefinition {
    name: "star",
    frame_divisor: 1,
    min_samples: 100,
    draw: star,
};

pub static STITCHES: PresetDefinition = PresetDefinition {
    name: "stitches",
    frame_divisor: 1,
    min_samples: 200,
    draw: stitches,
};

pub static FIREWORKS: PresetDefinition = PresetDefinition {
    name: "fireworks",
    frame_divisor: 1,
    min_samples: 200,
    draw: fireworks,
};

pub static WEB: PresetDefinition = PresetDefinition {
    name: "web",
    frame_divisor: 1,
    min_samples: 100,
    draw: web,
};

/// Angle between consecutive spokes, in radians.
#[inline]
fn step_angle(points: usize) -> f32 {
    (360.0 / points as f32).to_radians()
}

/// 128 spokes straddling a circle, stroked in color bands.
fn flower(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 128;
    const MIN: f32 = 5.0;
    let center = ctx.center();
    let r = ctx.height / 4.0;
    let offset = r / 2.0;
    let percent = (r - offset) / 255.0;
    let increase = step_angle(POINTS);
    let bands = ColorBands::new(&ctx.style.colors, POINTS);
    let surface = shapes.surface();

    for point in 1..=POINTS {
        let p = (ctx.at(point) + MIN) * percent;
        let a = point as f32 * increase;
        surface.move_to(polar(center, a, r - (p - offset)));
        surface.line_to(polar(center, a, r + p));
        bands.after(surface, point);
    }
    bands.finish(surface, POINTS);
}

/// 56 petals, each a quad spanning one angular step.
fn flower_blocks(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 56;
    let center = ctx.center();
    let r = ctx.height / 4.0;
    let percent = r / 255.0;
    let increase = step_angle(POINTS);
    let surface = shapes.surface();

    for point in 1..=POINTS {
        let p = ctx.at(point) * percent;
        let a = point as f32 * increase;
        let inner = polar(center, a, r - p / 2.0);
        surface.move_to(inner);
        surface.line_to(polar(center, a, r + p));
        surface.line_to(polar(center, a + increase, r + p));
        surface.line_to(polar(center, a + increase, r - p / 2.0));
        surface.line_to(inner);
    }
    if let Some(fill) = ctx.fill_color() {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.stroke();
}

/// A circle with an inward, mirrored wave of 150 beads.
fn ring(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 150;
    const BEAD: f32 = 2.0;
    let center = ctx.center();
    let r = (ctx.height - 10.0) / 2.0;
    let offset = r / 5.0;
    let percent = (r - offset) / 255.0;
    let increase = step_angle(POINTS);
    let surface = shapes.surface();

    surface.arc(center, r, 0.0, TAU, true);
    let first = polar(center, 0.0, r - ctx.at(0) * percent);
    surface.move_to(first);

    // indices climb to the middle of the ring and walk back down
    let mut index = 0usize;
    for point in 0..POINTS {
        if point < POINTS / 2 {
            index += 1;
        } else {
            index -= 1;
        }
        let p = ctx.at(index) * percent;
        let at = polar(center, point as f32 * increase, r - p);
        surface.line_to(at);
        surface.arc(at, BEAD, 0.0, TAU, false);
    }
    surface.line_to(first);
    surface.stroke();
    surface.set_fill_color(ctx.fill_color().unwrap_or(Color::rgba(255, 255, 255, 0)));
    surface.fill();
}

/// Two wobbly rings from the mid and vocal bands, joined by spokes.
fn rings(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let min = ctx.min_dimension();
    let center = ctx.center();
    let bands = organize(ctx.samples);

    let outer_data = scale(&bands.mids, min / 4.0);
    let outer_data = first_group(&shrink(&outer_data, 1.0 / 5.0), 2);
    let outer_data = reverb(&outer_data);
    let inner_data = reverb(&scale(&bands.vocals, min / 8.0));

    let outer = Layout::circle(min / 2.0, center, outer_data.len()).points(&outer_data);
    let inner = Layout::circle(min / 4.0, center, inner_data.len()).points(&inner_data);

    shapes.polygon(
        &outer.end,
        ShapeStyle::new()
            .closed()
            .radius(4.0)
            .line(ctx.color(0))
            .fill(ctx.fill_color()),
    );
    shapes.polygon(
        &inner.end,
        ShapeStyle::new()
            .closed()
            .radius(4.0)
            .line(ctx.color(2))
            .fill(ctx.color(3)),
    );

    let middle = (min / 4.0 + min / 2.0) / 2.0;
    let larger = scale(&inner_data, min / 4.0 - min / 2.0);
    let spokes = Layout::circle(middle, center, larger.len()).points(&larger);
    let spoke_style = ShapeStyle::new().line(ctx.color(4).or_else(|| ctx.color(2)));
    for (start, end) in spokes.start.iter().zip(&spokes.end) {
        shapes.line(*start, *end, spoke_style);
    }
}

fn round_wave(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 100;
    let center = ctx.center();
    let r = ctx.height / 4.0;
    let percent = r / 255.0;
    let increase = step_angle(POINTS);
    let surface = shapes.surface();

    surface.move_to(polar(center, 0.0, r));
    for point in 1..=POINTS {
        let p = ctx.at(350 % point) * percent;
        surface.line_to(polar(center, point as f32 * increase, r + p));
    }
    surface.close_path();
    surface.stroke();
    if let Some(fill) = ctx.fill_color() {
        surface.set_fill_color(fill);
        surface.fill();
    }
}

/// Rays bursting from a circle, with an optional filled core.
fn shine(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 512;
    let center = ctx.center();
    let r = ctx.height / 4.0;
    let percent = (ctx.height / 2.0 - r) / 255.0;
    let increase = step_angle(POINTS);
    let surface = shapes.surface();

    for point in (1..=POINTS).step_by(2) {
        let p = ctx.at(600 % point) * percent;
        let a = (point + 1) as f32 * increase;
        surface.move_to(polar(center, a, r));
        surface.line_to(polar(center, a, r + p));
    }
    surface.stroke();

    if let Some(fill) = ctx.fill_color() {
        surface.arc(center, r * 0.9, 0.0, TAU, false);
        surface.set_fill_color(fill);
        surface.fill();
    }
}

fn shine_rings(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let min = ctx.min_dimension();
    let center = ctx.center();
    let bands = organize(ctx.samples);
    let vocals = scale(&bands.vocals, min / 2.0 / 2.0);
    let base = scale(&bands.base, min / 4.0);

    let rays = Layout::circle(min / 2.0, center, vocals.len()).points(&vocals);
    let inner_wave = Layout::circle(min / 2.0, center, vocals.len())
        .offset(100.0)
        .points(&vocals);
    let thin = Layout::circle(min / 2.0, center, base.len())
        .offset(100.0)
        .points(&base);

    let ray_style = ShapeStyle::new().line(ctx.color(0));
    for (start, end) in rays.start.iter().zip(&rays.end) {
        shapes.line(*start, *end, ray_style);
    }
    shapes.polygon(
        &inner_wave.start,
        ShapeStyle::new()
            .closed()
            .radius(5.0)
            .line(ctx.color(1))
            .fill(ctx.color(3)),
    );
    shapes.polygon(
        &thin.start,
        ShapeStyle::new()
            .closed()
            .radius(5.0)
            .line(ctx.color(2))
            .fill(ctx.color(4)),
    );
}

/// Spikes pointing both outward and inward, outlining a star.
fn star(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 120;
    let center = ctx.center();
    let r = ctx.height / 4.0;
    let offset = r / 4.0;
    let percent = (r - offset - 35.0) / 255.0;
    let increase = step_angle(POINTS);
    let surface = shapes.surface();

    let mut top = Vec::with_capacity(POINTS);
    let mut bottom = Vec::with_capacity(POINTS);
    for point in 1..=POINTS {
        let p = ctx.at(200 % point) * percent;
        let a = point as f32 * increase;
        let inner = polar(center, a, r - p + offset);
        let outer = polar(center, a, r + p + offset);
        surface.move_to(inner);
        surface.line_to(outer);
        bottom.push(inner);
        top.push(outer);
    }

    surface.move_to(top[0]);
    for p in &top {
        surface.line_to(*p);
    }
    surface.close_path();

    surface.move_to(bottom[0]);
    for p in bottom.iter().rev() {
        surface.line_to(*p);
    }
    surface.close_path();

    if let Some(fill) = ctx.fill_color() {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.stroke();

    surface.begin_path();
    surface.move_to(bottom[0]);
    for p in &bottom {
        surface.line_to(*p);
    }
    surface.close_path();
    if let Some(inner) = ctx.color(2) {
        surface.set_fill_color(inner);
        surface.fill();
    }
    surface.stroke();
}

/// Two concentric outlines laced together with alternating stitches.
fn stitches(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let min = ctx.min_dimension();
    let data = shrink(ctx.samples, 200.0);
    let data = scale(&first_group(&data, 2), ctx.height / 2.0);

    let points = Layout::circle(min / 2.0, ctx.center(), data.len())
        .offset(50.0)
        .points(&data);
    if points.start.is_empty() {
        return;
    }

    shapes.polygon(&points.end, ShapeStyle::new().closed());
    shapes.polygon(&points.start, ShapeStyle::new().closed());

    let mut i = 0;
    while i < points.start.len() {
        let start = points.start[i];
        i += 1;
        let end = points.end.get(i).copied().unwrap_or(points.end[0]);
        shapes.line(start, end, ShapeStyle::new());
        let back = points.start.get(i + 1).copied().unwrap_or(points.start[0]);
        shapes.line(end, back, ShapeStyle::new());
        i += 1;
    }
}

/// A radial burst with a sparkle at the tip of every ray.
fn fireworks(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let h = ctx.height;
    let mut data = shrink(ctx.samples, 200.0);
    data.truncate(120);
    let data = mirror(&data);
    let data = scale(&data, h / 4.0 + h / 4.0 * 0.35);

    let points = Layout::circle(h / 2.0, ctx.center(), data.len())
        .offset(35.0)
        .rotate(270.0)
        .points(&data);

    for (start, end) in points.start.iter().zip(&points.end) {
        shapes.line(*start, *end, ShapeStyle::new());
    }
    shapes.polygon(&points.start, ShapeStyle::new().closed());

    let sparkle = ShapeStyle::new().fill(ctx.color(0));
    for end in &points.end {
        shapes.circle(*end, h * 0.01, sparkle);
    }
}

/// Three nested outlines around a filled disc, with dots beyond the rim.
fn web(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let min = ctx.min_dimension();
    let center = ctx.center();
    let data = shrink(ctx.samples, 100.0);
    let data = scale(&first_group(&data, 2), ctx.height / 4.0);
    let layout = Layout::circle(min / 2.0, center, data.len());

    let points = layout.points(&data);
    shapes.polygon(&points.end, ShapeStyle::new().closed());
    for (start, end) in points.start.iter().zip(&points.end) {
        shapes.line(*start, *end, ShapeStyle::new());
    }

    let tighter = scale(&data, 0.7);
    shapes.polygon(&layout.points(&tighter).end, ShapeStyle::new().closed());
    let tightest = scale(&tighter, 0.3);
    shapes.polygon(&layout.points(&tightest).end, ShapeStyle::new().closed());

    shapes.circle(center, min / 2.0, ShapeStyle::new().fill(ctx.color(2)));

    let wider = scale(&data, 1.4);
    let dot = ShapeStyle::new()
        .fill(ctx.color(1))
        .line(ctx.color(1).or_else(|| ctx.color(0)));
    for end in &layout.points(&wider).end {
        shapes.circle(*end, min * 0.01, dot);
    }
}
