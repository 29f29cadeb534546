use wavibe::dispatch::{render_definitions, DEFAULT_COLORS};
use wavibe::preset::{PresetContext, PresetDefinition};
use wavibe::{
    render, Canvas, ClearMode, Color, DrawCall, Preset, PresetRef, RecordingSurface,
    RenderError, RenderOptions, RenderStyle, ShapeRenderer, ShapeStyle,
};

fn dot(ctx: &PresetContext<'_>, shapes: &mut ShapeRenderer<'_>) {
    shapes.circle(ctx.center(), 2.0, ShapeStyle::new().fill(ctx.color(0)));
}

static EVERY_OTHER: PresetDefinition = PresetDefinition {
    name: "every-other",
    frame_divisor: 2,
    min_samples: 0,
    draw: dot,
};

static UNTHROTTLED: PresetDefinition = PresetDefinition {
    name: "unthrottled",
    frame_divisor: 0,
    min_samples: 0,
    draw: dot,
};

static HUNGRY_EVERY_OTHER: PresetDefinition = PresetDefinition {
    name: "hungry-every-other",
    frame_divisor: 2,
    min_samples: 8,
    draw: dot,
};

/// Presets whose reads are plain sample indices, so the shortest frame is exact.
const INDEXED: [Preset; 10] = [
    Preset::Bars,
    Preset::Dualbars,
    Preset::BarsBlocks,
    Preset::DualbarsBlocks,
    Preset::Flower,
    Preset::FlowerBlocks,
    Preset::Ring,
    Preset::RoundWave,
    Preset::Shine,
    Preset::Star,
];

/// Every coordinate and length handed to the surface.
fn coordinates(calls: &[DrawCall]) -> Vec<f32> {
    calls
        .iter()
        .flat_map(|call| match *call {
            DrawCall::MoveTo(p) | DrawCall::LineTo(p) => vec![p.x, p.y],
            DrawCall::QuadraticCurveTo { control, to } => vec![control.x, control.y, to.x, to.y],
            DrawCall::Arc { center, radius, .. } => vec![center.x, center.y, radius],
            DrawCall::ArcTo {
                corner,
                towards,
                radius,
            } => vec![corner.x, corner.y, towards.x, towards.y, radius],
            DrawCall::Ellipse {
                center,
                radius_x,
                radius_y,
                ..
            } => vec![center.x, center.y, radius_x, radius_y],
            DrawCall::Rect {
                origin,
                width,
                height,
            } => vec![origin.x, origin.y, width, height],
            _ => Vec::new(),
        })
        .collect()
}

fn clears(surface: &RecordingSurface) -> usize {
    surface.count(|c| matches!(c, DrawCall::Clear))
}

#[test]
fn missing_target_is_a_no_op() {
    let drawn = render::<RecordingSurface>(&[0; 1024], None, &RenderOptions::default(), 0);
    assert_eq!(drawn, Ok(0));
}

#[test]
fn unknown_presets_are_skipped() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let options = RenderOptions::new(["sparkles", "bars"]);
    assert_eq!(options.types[0], PresetRef::Unknown("sparkles".into()));

    let drawn = render(&[100; 1024], Some(&mut surface), &options, 0).unwrap();
    assert_eq!(drawn, 1);
}

#[test]
fn strict_mode_rejects_unknown_presets_before_drawing() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let mut options = RenderOptions::new(["bars", "sparkles"]);
    options.strict = true;

    let err = render(&[100; 1024], Some(&mut surface), &options, 0).unwrap_err();
    assert_eq!(
        err,
        RenderError::UnknownPreset {
            name: "sparkles".into()
        }
    );
    assert!(surface.calls().is_empty());
}

#[test]
fn strict_mode_accepts_exactly_min_samples() {
    for preset in Preset::ALL {
        let required = preset.definition().min_samples;
        let mut options = RenderOptions::new([preset]);
        options.strict = true;

        let mut surface = RecordingSurface::new(100.0, 100.0);
        let ok = render(&vec![50; required], Some(&mut surface), &options, 0);
        assert_eq!(ok, Ok(1), "{}", preset);

        if required > 0 {
            let mut surface = RecordingSurface::new(100.0, 100.0);
            let short = render(&vec![50; required - 1], Some(&mut surface), &options, 0);
            assert!(
                matches!(short, Err(RenderError::InsufficientSamples { .. })),
                "{}",
                preset
            );
        }
    }
}

#[test]
fn indexed_presets_declare_their_exact_minimum() {
    for preset in INDEXED {
        let required = preset.definition().min_samples;
        let style = RenderStyle::default();

        let full = preset.draw_calls(&vec![50; required], &style, 200.0, 200.0);
        assert!(
            coordinates(&full).iter().all(|v| v.is_finite()),
            "{} reads past {} samples",
            preset,
            required
        );

        let short = preset.draw_calls(&vec![50; required - 1], &style, 200.0, 200.0);
        assert!(
            coordinates(&short).iter().any(|v| !v.is_finite()),
            "{} draws fully from {} samples",
            preset,
            required - 1
        );
    }
}

#[test]
fn star_and_round_wave_accept_their_shortest_full_frame() {
    for (name, len) in [("star", 100), ("round-wave", 87)] {
        let mut options = RenderOptions::new([name]);
        options.strict = true;
        let mut surface = RecordingSurface::new(200.0, 200.0);
        assert_eq!(render(&vec![50; len], Some(&mut surface), &options, 0), Ok(1));
    }
}

#[test]
fn strict_mode_ignores_presets_throttled_this_tick() {
    let style = RenderStyle::default();
    let mut surface = RecordingSurface::new(10.0, 10.0);
    let drawn = render_definitions(
        &[1, 2],
        &mut surface,
        &style,
        &[&HUNGRY_EVERY_OTHER],
        ClearMode::PerTick,
        true,
        1,
    );
    assert_eq!(drawn, Ok(0));

    let drawn = render_definitions(
        &[1, 2],
        &mut surface,
        &style,
        &[&HUNGRY_EVERY_OTHER],
        ClearMode::PerTick,
        true,
        2,
    );
    assert_eq!(
        drawn,
        Err(RenderError::InsufficientSamples {
            preset: "hungry-every-other",
            required: 8,
            actual: 2,
        })
    );
    assert!(surface.calls().is_empty());
}

#[test]
fn permissive_mode_draws_short_frames() {
    let options = RenderOptions::new(Preset::ALL);
    let mut canvas = Canvas::new(50, 50);
    assert_eq!(render(&[9; 10], Some(&mut canvas), &options, 0), Ok(21));
}

#[test]
fn divisor_throttles_ticks() {
    let style = RenderStyle::default();
    let drawn: Vec<usize> = (0..6)
        .map(|frame| {
            let mut surface = RecordingSurface::new(10.0, 10.0);
            render_definitions(
                &[],
                &mut surface,
                &style,
                &[&EVERY_OTHER],
                ClearMode::PerTick,
                false,
                frame,
            )
            .unwrap()
        })
        .collect();
    assert_eq!(drawn, vec![1, 0, 1, 0, 1, 0]);
}

#[test]
fn throttled_ticks_leave_the_surface_alone() {
    let mut surface = RecordingSurface::new(10.0, 10.0);
    let style = RenderStyle::default();
    render_definitions(&[], &mut surface, &style, &[&EVERY_OTHER], ClearMode::PerTick, false, 1)
        .unwrap();
    assert!(surface.calls().is_empty());
}

#[test]
fn zero_divisor_draws_every_tick() {
    let style = RenderStyle::default();
    for frame in 0..3 {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let drawn = render_definitions(
            &[],
            &mut surface,
            &style,
            &[&UNTHROTTLED],
            ClearMode::PerTick,
            false,
            frame,
        );
        assert_eq!(drawn, Ok(1));
    }
}

#[test]
fn clear_modes() {
    let mut options = RenderOptions::new(["bars", "ring", "wave"]);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    render(&[100; 1024], Some(&mut surface), &options, 0).unwrap();
    assert_eq!(clears(&surface), 1);
    assert_eq!(surface.calls()[0], DrawCall::Clear);

    options.clear = ClearMode::PerPreset;
    let mut surface = RecordingSurface::new(100.0, 100.0);
    render(&[100; 1024], Some(&mut surface), &options, 0).unwrap();
    assert_eq!(clears(&surface), 3);
}

#[test]
fn layered_presets_stack_on_a_canvas() {
    let samples = [180u8; 1024];
    let painted = |options: &RenderOptions| {
        let mut canvas = Canvas::new(120, 80);
        render(&samples, Some(&mut canvas), options, 0).unwrap();
        canvas.painted_pixels()
    };

    let bars = painted(&RenderOptions::new(["bars"]));
    let ring = painted(&RenderOptions::new(["ring"]));
    let stacked = painted(&RenderOptions::new(["ring", "bars"]));
    assert!(stacked > bars && stacked > ring);

    let mut last_only = RenderOptions::new(["ring", "bars"]);
    last_only.clear = ClearMode::PerPreset;
    assert_eq!(painted(&last_only), bars);
}

#[test]
fn style_is_applied_to_every_preset() {
    let mut options = RenderOptions::new(["round-wave", "flower"]);
    options.colors = Some(vec![Color::rgb(9, 9, 9), Color::WHITE]);
    options.stroke = Some(2.5);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    render(&[60; 1024], Some(&mut surface), &options, 0).unwrap();
    assert_eq!(
        surface.count(|c| matches!(c, DrawCall::SetStrokeColor(col) if *col == Color::rgb(9, 9, 9))),
        2 + 1
    );
    assert_eq!(
        surface.count(|c| matches!(c, DrawCall::SetLineWidth(w) if *w == 2.5)),
        2
    );
}

#[test]
fn default_style_matches_the_classic_palette() {
    let style = RenderOptions::default().style();
    assert_eq!(style.colors, DEFAULT_COLORS.to_vec());
    assert_eq!(style.stroke, 1.0);
    assert_eq!(style.primary(), "#d92027".parse::<Color>().unwrap());
}

#[test]
fn options_round_trip_through_toml() {
    let options: RenderOptions = toml::from_str(
        r##"
        type = ["shine", "web"]
        colors = ["#000", "#ffffff80"]
        stroke = 3.0
        strict = true
        "##,
    )
    .unwrap();
    let text = toml::to_string(&options).unwrap();
    let back: RenderOptions = toml::from_str(&text).unwrap();
    assert_eq!(back, options);
    assert_eq!(back.types[1], PresetRef::Known(Preset::Web));
}

#[test]
fn center_dot_lands_in_the_middle() {
    let mut canvas = Canvas::new(11, 11);
    let style = RenderStyle::new(vec![Color::WHITE], 1.0);
    render_definitions(&[], &mut canvas, &style, &[&UNTHROTTLED], ClearMode::PerTick, false, 0)
        .unwrap();
    assert_eq!(canvas.get_pixel(5, 5), Color::WHITE);
    assert_eq!(canvas.get_pixel(0, 0), Color::TRANSPARENT);
}
