use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{info, warn};

use wavibe::{render, Canvas, Color, RenderOptions};

use crate::config::Config;
use crate::source::{self, Frame};

/// Render `display.frames` ticks headless and write the last one as a PPM.
pub async fn run(config: Config) -> Result<()> {
    let (_source, frames) = source::create_frame_pipeline(&config.source, config.display.fps)?;
    let options = config.render.resolved();
    let mut canvas = Canvas::new(config.display.width, config.display.height);

    let ticks = render_ticks(frames, &mut canvas, &options, config.display.frames).await?;

    let path = &config.display.output;
    std::fs::write(path, canvas.to_ppm(Color::BLACK))
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    info!(
        "Wrote {}x{} snapshot after {} ticks to {}",
        canvas.width,
        canvas.height,
        ticks,
        path.display()
    );
    Ok(())
}

/// Run up to `count` ticks, one per new frame. Returns the ticks rendered.
async fn render_ticks(
    mut frames: watch::Receiver<Frame>,
    canvas: &mut Canvas,
    options: &RenderOptions,
    count: u64,
) -> Result<u64> {
    let mut tick = 0;
    while tick < count.max(1) {
        if frames.changed().await.is_err() {
            warn!("Frame source ended after {} ticks", tick);
            break;
        }
        let samples = frames.borrow_and_update().clone();
        render(&samples, Some(&mut *canvas), options, tick)?;
        tick += 1;
    }
    Ok(tick)
}
