//! Bar presets: vertical bars and block columns laid along the bottom or the
//! middle of the surface.

use super::{ColorBands, PresetContext, PresetDefinition};
use crate::color::Color;
use crate::geometry::{Layout, Point};
use crate::shapes::{ShapeRenderer, ShapeStyle};
use crate::transform::{organize, scale, shrink, TransformStep};

pub static BARS: PresetDefinition = PresetDefinition {
    name: "bars",
    frame_divisor: 1,
    min_samples: 65,
    draw: bars,
};

pub static DUALBARS: PresetDefinition = PresetDefinition {
    name: "dualbars",
    frame_divisor: 1,
    min_samples: 129,
    draw: dualbars,
};

pub static BARS_BLOCKS: PresetDefinition = PresetDefinition {
    name: "bars-blocks",
    frame_divisor: 1,
    min_samples: 64,
    draw: bars_blocks,
};

pub static DUALBARS_BLOCKS: PresetDefinition = PresetDefinition {
    name: "dualbars-blocks",
    frame_divisor: 1,
    min_samples: 51,
    draw: dualbars_blocks,
};

pub static BIG_BARS: PresetDefinition = PresetDefinition {
    name: "big-bars",
    frame_divisor: 1,
    min_samples: 130,
    draw: big_bars,
};

pub static CUBES: PresetDefinition = PresetDefinition {
    name: "cubes",
    frame_divisor: 1,
    min_samples: 80,
    draw: cubes,
};

/// 64 bars rising from the bottom edge, one stroke per color band.
fn bars(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 64;
    let (w, h) = (ctx.width, ctx.height);
    let percent = h / 255.0;
    let increase = w / POINTS as f32;
    let bands = ColorBands::new(&ctx.style.colors, POINTS);
    let surface = shapes.surface();

    for point in 1..=POINTS {
        let p = ctx.at(point) * percent;
        let x = increase * point as f32;
        surface.move_to(Point::new(x, h));
        surface.line_to(Point::new(x, h - p));
        bands.after(surface, point);
    }
    bands.finish(surface, POINTS);
}

/// 128 bars centered on the horizontal midline.
fn dualbars(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 128;
    const MIN: f32 = 5.0;
    let (w, h) = (ctx.width, ctx.height);
    let percent = h / 255.0;
    let increase = w / POINTS as f32;
    let bands = ColorBands::new(&ctx.style.colors, POINTS);
    let surface = shapes.surface();

    for point in 1..=POINTS {
        let p = (ctx.at(point) + MIN) * percent;
        let x = increase * point as f32;
        let mid = h / 2.0 + p / 2.0;
        surface.move_to(Point::new(x, mid));
        surface.line_to(Point::new(x, mid - p));
        bands.after(surface, point);
    }
    bands.finish(surface, POINTS);
}

fn bars_blocks(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 64;
    let (w, h) = (ctx.width, ctx.height);
    let percent = h / 255.0;
    let width = w / POINTS as f32;
    let surface = shapes.surface();

    for point in 0..POINTS {
        let p = ctx.at(point) * percent;
        surface.rect(Point::new(width * point as f32, h), width, -p);
    }
    surface.set_fill_color(ctx.fill_color().unwrap_or_else(|| ctx.primary()));
    surface.stroke();
    surface.fill();
}

fn dualbars_blocks(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const POINTS: usize = 50;
    let (w, h) = (ctx.width, ctx.height);
    let percent = h / 255.0;
    let width = w / POINTS as f32;
    let surface = shapes.surface();

    for point in 0..=POINTS {
        let p = ctx.at(point) * percent;
        surface.rect(
            Point::new(width * point as f32, h / 2.0 + p / 2.0),
            width,
            -p,
        );
    }
    if let Some(fill) = ctx.fill_color() {
        surface.set_fill_color(fill);
        surface.fill();
    }
    surface.stroke();
}

/// Ten wide bars built from the vocal band, colored left to right.
fn big_bars(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    let (w, h) = (ctx.width, ctx.height);
    let data = organize(ctx.samples).vocals;
    let data = shrink(&data, 10.0);
    let data = scale(&data, h);
    let data = TransformStep::Amp(1.0).apply(&data);

    let points = Layout::line(w, Point::new(0.0, h / 2.0), data.len())
        .offset(50.0)
        .points(&data);
    let color_count = ctx.style.colors.len().max(1);
    let color_stop = data.len().div_ceil(color_count);
    let bar_width = w / data.len() as f32;

    let mut color_index = 0;
    for (i, start) in points.start.iter().enumerate() {
        if color_stop > 0 && (i + 1) % color_stop == 0 {
            color_index += 1;
        }
        let height = data.get(i).copied().unwrap_or(f32::NAN);
        shapes.rectangle(
            *start,
            height,
            bar_width,
            ShapeStyle::new().fill(ctx.color(color_index)),
        );
    }
}

/// Columns of stacked squares fed by the bass band.
fn cubes(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    const SPACING: f32 = 5.0;
    let (w, h) = (ctx.width, ctx.height);
    let base = organize(ctx.samples).base;
    let mut data = shrink(&base, 20.0);
    data.truncate(19);
    let data = scale(&data, h);

    let points = Layout::line(w, Point::new(0.0, h), data.len()).points(&data);
    let square_size = w / 20.0 - SPACING;
    let total_squares = (h - SPACING * (h / square_size)) / square_size;
    let color_stop = (total_squares / ctx.style.colors.len() as f32).ceil();
    // squares stacked past the top edge are never visible
    let visible = ((h + square_size) / (square_size + SPACING)).ceil();

    for (i, start) in points.start.iter().enumerate() {
        let value = data.get(i).copied().unwrap_or(f32::NAN);
        let count = (value / square_size).ceil().min(visible);
        if !count.is_finite() || count < 1.0 {
            continue;
        }
        let mut color_index = 0;
        for j in 1..=count as usize {
            let step = j as f32;
            let origin = Point::new(start.x, start.y - square_size * step - SPACING * step);
            shapes.square(
                origin,
                square_size,
                ShapeStyle::new()
                    .fill(ctx.color(color_index))
                    .line(Some(Color::BLACK)),
            );
            if color_stop >= 1.0 && j % color_stop as usize == 0 {
                color_index = (color_index + 1).min(ctx.style.colors.len().saturating_sub(1));
            }
        }
    }
}
