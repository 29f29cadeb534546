use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::buffer::Buffer;
use ratatui::prelude::*;
use ratatui::style::Color as TermColor;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use wavibe::color::blend_over;
use wavibe::preset::PresetRef;
use wavibe::{render, Canvas, ColorScheme, Preset, RenderOptions};

use crate::config::Config;
use crate::source;

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: char = '▀';

pub async fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Preset and palette cycling driven by keys and the rotation timer.
struct Session {
    options: RenderOptions,
    preset: Preset,
    scheme: ColorScheme,
}

impl Session {
    fn new(options: RenderOptions, scheme: Option<ColorScheme>) -> Self {
        let preset = options
            .types
            .iter()
            .find_map(|r| match r {
                PresetRef::Known(p) => Some(*p),
                PresetRef::Unknown(_) => None,
            })
            .unwrap_or(Preset::Bars);
        Self {
            options,
            preset,
            scheme: scheme.unwrap_or_default(),
        }
    }

    fn next_preset(&mut self) {
        self.preset = self.preset.next();
        self.options.types = vec![PresetRef::Known(self.preset)];
        debug!("Switched to preset {}", self.preset);
    }

    fn next_scheme(&mut self) {
        self.scheme = self.scheme.next();
        let count = self.options.style().colors.len();
        self.options.colors = Some(self.scheme.palette(count));
        debug!("Switched to color scheme {}", self.scheme.name());
    }

    fn preset_label(&self) -> String {
        self.options
            .types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join("+")
    }
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let (_source, mut frames) = source::create_frame_pipeline(&config.source, config.display.fps)?;

    let mut session = Session::new(config.render.resolved(), config.render.scheme);
    let mut canvas = Canvas::new(0, 0);
    let mut tick: u64 = 0;
    let mut rotation_timer = Instant::now();
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.display.fps.max(1)));

    loop {
        // Stdin sources end on EOF
        if frames.has_changed().is_err() {
            info!("Frame source ended, leaving terminal display");
            break;
        }

        if config.display.rotate_presets
            && rotation_timer.elapsed() > Duration::from_secs(config.display.rotation_interval_secs)
        {
            session.next_preset();
            rotation_timer = Instant::now();
        }

        let samples = frames.borrow_and_update().clone();

        terminal.draw(|frame| {
            let area = frame.area();
            let (width, height) = canvas_size(area);
            if (canvas.width, canvas.height) != (width, height) {
                canvas.resize(width, height);
            }

            if let Err(e) = render(&samples, Some(&mut canvas), &session.options, tick) {
                debug!("Render failed: {}", e);
            }

            let body = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
            blit(&canvas, frame.buffer_mut(), body);
            render_status(frame, area, &session);
        })?;
        tick = tick.wrapping_add(1);

        // Handle input
        if event::poll(frame_time)? {
            if let Event::Key(key) = event::read()? {
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    } => {
                        break;
                    }
                    KeyEvent {
                        code: KeyCode::Char('s'),
                        ..
                    } => {
                        session.next_preset();
                        rotation_timer = Instant::now();
                    }
                    KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::NONE,
                        ..
                    } => {
                        session.next_scheme();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Pixel size for an area: one column per cell, two rows per cell, minus the status line.
fn canvas_size(area: Rect) -> (usize, usize) {
    (
        area.width as usize,
        area.height.saturating_sub(1) as usize * 2,
    )
}

/// Terminal color for a canvas pixel; untouched pixels keep the terminal background.
fn cell_color(canvas: &Canvas, x: usize, y: usize) -> TermColor {
    let px = canvas.get_pixel(x, y);
    if px.is_transparent() {
        return TermColor::Reset;
    }
    let px = blend_over(wavibe::Color::BLACK, px);
    TermColor::Rgb(px.r, px.g, px.b)
}

fn blit(canvas: &Canvas, buf: &mut Buffer, area: Rect) {
    for row in 0..area.height {
        for col in 0..area.width {
            let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) else {
                continue;
            };
            let (x, y) = (col as usize, row as usize * 2);
            cell.set_char(HALF_BLOCK);
            cell.set_fg(cell_color(canvas, x, y));
            cell.set_bg(cell_color(canvas, x, y + 1));
        }
    }
}

fn render_status(frame: &mut Frame, area: Rect, session: &Session) {
    let status = format!(
        " [s]preset: {} | [c]olor: {} | [q]uit ",
        session.preset_label(),
        session.scheme.name()
    );

    for (i, ch) in status.chars().enumerate() {
        if i < area.width as usize {
            let cell = frame.buffer_mut().cell_mut((area.x + i as u16, area.y));
            if let Some(cell) = cell {
                cell.set_char(ch);
                cell.set_fg(TermColor::DarkGray);
            }
        }
    }
}
