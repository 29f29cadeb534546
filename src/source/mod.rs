mod analyser;
mod stdin;
mod synthetic;

pub use analyser::ByteAnalyser;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::sync::watch;

use crate::config::SourceConfig;

/// One frame of byte frequency data.
pub type Frame = Arc<Vec<u8>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Deterministic test tones run through the analyser.
    #[default]
    Synthetic,
    /// Raw frames of `bins` bytes read from stdin.
    Stdin,
}

/// Handle on the producer thread; dropping it stops production.
pub struct FrameSource {
    // Keep the thread handle to ensure it stays alive
    _thread: thread::JoinHandle<()>,
    stop_flag: Arc<AtomicBool>,
}

impl Drop for FrameSource {
    fn drop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }
}

/// Start the configured source and return its latest-frame channel.
///
/// The channel starts with a silent frame. The sender is dropped when the
/// source ends, which receivers observe as a closed channel.
pub fn create_frame_pipeline(
    config: &SourceConfig,
    fps: u32,
) -> Result<(FrameSource, watch::Receiver<Frame>)> {
    if config.bins == 0 {
        bail!("source.bins must be at least 1");
    }
    let (tx, rx) = watch::channel(Arc::new(vec![0u8; config.bins]));
    let stop_flag = Arc::new(AtomicBool::new(false));
    let flag = stop_flag.clone();

    let handle = match config.kind {
        SourceKind::Synthetic => {
            let config = config.clone();
            thread::Builder::new()
                .name("wavibe-synthetic".into())
                .spawn(move || synthetic::run(&config, fps, tx, flag))?
        }
        SourceKind::Stdin => {
            let bins = config.bins;
            thread::Builder::new()
                .name("wavibe-stdin".into())
                .spawn(move || stdin::run(bins, tx, flag))?
        }
    };

    Ok((
        FrameSource {
            _thread: handle,
            stop_flag,
        },
        rx,
    ))
}
