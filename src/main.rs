use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::info;

mod config;
mod display;
mod source;

use config::Config;
use display::DisplayMode;
use source::SourceKind;
use wavibe::{ClearMode, Color, ColorScheme, Preset};

#[derive(Parser, Debug)]
#[command(name = "wavibe")]
#[command(author, version, about = "Audio-reactive preset visualizer")]
pub struct Args {
    /// Display mode: terminal or snapshot
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Presets to draw in order, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub preset: Vec<String>,

    /// Palette, comma separated hex or CSS color names
    #[arg(long, value_delimiter = ',')]
    pub colors: Vec<Color>,

    /// Generated palette when no colors are given
    #[arg(long)]
    pub scheme: Option<ColorScheme>,

    /// Line width
    #[arg(long)]
    pub stroke: Option<f32>,

    /// Fill color override
    #[arg(long)]
    pub fill: Option<Color>,

    /// When to clear the surface during a tick
    #[arg(long)]
    pub clear: Option<ClearMode>,

    /// Fail on unknown presets and short frames
    #[arg(long)]
    pub strict: bool,

    /// Ticks per second
    #[arg(long)]
    pub fps: Option<u32>,

    /// Rotate presets automatically
    #[arg(long)]
    pub rotate: bool,

    /// Rotation interval in seconds
    #[arg(long)]
    pub rotate_interval: Option<u64>,

    /// Frame source: synthetic or stdin
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Bytes per frame
    #[arg(long)]
    pub bins: Option<usize>,

    /// Analysis smoothing (0.0-1.0)
    #[arg(long)]
    pub smoothing: Option<f32>,

    /// Snapshot width in pixels
    #[arg(long)]
    pub width: Option<usize>,

    /// Snapshot height in pixels
    #[arg(long)]
    pub height: Option<usize>,

    /// Ticks to run before writing the snapshot
    #[arg(long)]
    pub frames: Option<u64>,

    /// Snapshot output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List available presets and exit
    #[arg(long)]
    pub list_presets: bool,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the terminal display
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wavibe=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "wavibe", &mut std::io::stdout());
        return Ok(());
    }

    if args.list_presets {
        for preset in Preset::ALL {
            let def = preset.definition();
            println!("{:<16} min samples: {}", def.name, def.min_samples);
        }
        return Ok(());
    }

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);

    info!(
        "Starting wavibe in {:?} mode with {:?} source",
        config.display.mode, config.source.kind
    );

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(config).await?,
        DisplayMode::Snapshot => display::snapshot::run(config).await?,
    }

    Ok(())
}
