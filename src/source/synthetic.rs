use std::f64::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use super::{ByteAnalyser, Frame};
use crate::config::SourceConfig;

/// A repeatable mix of tones: a pulsing bass line, a steady mid tone and a
/// slowly sweeping high tone.
pub struct TestSignal {
    sample_rate: f64,
}

impl TestSignal {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: f64::from(sample_rate.max(1)),
        }
    }

    /// `len` samples starting `time` seconds into the signal.
    pub fn block(&self, time: f64, len: usize) -> Vec<f32> {
        let beat = (0.5 + 0.5 * (TAU * 2.0 * time).sin()).powi(2);
        let sweep = 1000.0 + 3000.0 * (0.5 + 0.5 * (TAU * 0.1 * time).sin());

        (0..len)
            .map(|i| {
                let t = time + i as f64 / self.sample_rate;
                let bass = 0.5 * beat * (TAU * 80.0 * t).sin();
                let mid = 0.25 * (TAU * 440.0 * t).sin();
                let high = 0.15 * (TAU * sweep * t).sin();
                (bass + mid + high) as f32
            })
            .collect()
    }
}

pub(super) fn run(config: &SourceConfig, fps: u32, sender: watch::Sender<Frame>, stop_flag: Arc<AtomicBool>) {
    let signal = TestSignal::new(config.sample_rate);
    let mut analyser = ByteAnalyser::new(
        config.bins,
        config.smoothing,
        config.min_decibels,
        config.max_decibels,
    );
    let tick = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
    let block_len = analyser.bins() * 2;
    let mut time = 0.0;

    info!(
        "Synthetic source: {} bins at {} Hz, {} fps",
        config.bins, config.sample_rate, fps
    );

    loop {
        if stop_flag.load(Ordering::Relaxed) {
            debug!("Stop flag set, ending synthetic source");
            break;
        }

        let frame = analyser.process(&signal.block(time, block_len));
        if sender.send(Arc::new(frame)).is_err() {
            debug!("Frame receiver dropped, stopping synthetic source");
            break;
        }

        time += tick.as_secs_f64();
        thread::sleep(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_is_deterministic_and_bounded() {
        let signal = TestSignal::new(44100);
        let a = signal.block(1.25, 512);
        let b = signal.block(1.25, 512);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.abs() <= 0.9 + 1e-6));
    }

    #[test]
    fn analysed_signal_lights_up_low_bins() {
        let signal = TestSignal::new(44100);
        let mut analyser = ByteAnalyser::new(1024, 0.0, -100.0, -30.0);
        // a beat peak, so the bass tone is at full strength
        let frame = analyser.process(&signal.block(0.125, 2048));
        // 440 Hz lands near bin 20 at 21.5 Hz per bin
        assert!(frame[20] > 200);
        assert!(frame[1000] < frame[20]);
    }
}
