use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Turns blocks of time-domain samples into byte frequency frames.
///
/// Follows the usual analyser-node recipe: Blackman window, magnitude
/// normalised by the FFT size, exponential time smoothing, then decibels
/// mapped linearly from `[min_db, max_db]` onto `0..=255`.
pub struct ByteAnalyser {
    fft_size: usize,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    window: Vec<f32>,
    previous: Vec<f32>,
}

impl ByteAnalyser {
    /// `bins` output bytes per frame, from an FFT of twice that size.
    pub fn new(bins: usize, smoothing: f32, min_db: f32, max_db: f32) -> Self {
        let fft_size = bins * 2;
        let fft = FftPlanner::new().plan_fft_forward(fft_size);

        let window = (0..fft_size)
            .map(|i| {
                let x = i as f32 / fft_size as f32;
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            })
            .collect();

        Self {
            fft_size,
            smoothing: smoothing.clamp(0.0, 1.0),
            min_db,
            max_db,
            fft,
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            window,
            previous: vec![0.0; bins],
        }
    }

    pub fn bins(&self) -> usize {
        self.previous.len()
    }

    pub fn process(&mut self, samples: &[f32]) -> Vec<u8> {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let range = (self.max_db - self.min_db).max(f32::EPSILON);
        let scale = 1.0 / self.fft_size as f32;
        let mut out = Vec::with_capacity(self.previous.len());
        for (bin, previous) in self.previous.iter_mut().enumerate() {
            let magnitude = self.buffer[bin].norm() * scale;
            let smoothed = self.smoothing * *previous + (1.0 - self.smoothing) * magnitude;
            *previous = if smoothed.is_finite() { smoothed } else { 0.0 };

            let db = 20.0 * previous.log10();
            let scaled = 255.0 * (db - self.min_db) / range;
            out.push(if scaled.is_finite() {
                scaled.clamp(0.0, 255.0) as u8
            } else {
                0
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn silence_maps_to_zero() {
        let mut analyser = ByteAnalyser::new(64, 0.0, -100.0, -30.0);
        assert_eq!(analyser.process(&[0.0; 128]), vec![0; 64]);
    }

    #[test]
    fn a_tone_peaks_at_its_bin() {
        // bin width = 8000 / 256 = 31.25 Hz
        let mut analyser = ByteAnalyser::new(128, 0.0, -100.0, -30.0);
        let frame = analyser.process(&tone(1000.0, 8000.0, 256));
        assert_eq!(frame[32], 255);
        assert!(frame[16] < frame[32]);
        assert!(frame[100] < frame[32]);
    }

    #[test]
    fn smoothing_decays_gradually() {
        let mut analyser = ByteAnalyser::new(128, 0.8, -100.0, -30.0);
        let loud = tone(1000.0, 8000.0, 256);
        analyser.process(&loud);
        let after_silence = analyser.process(&[0.0; 256]);
        assert!(after_silence[32] > 0);
    }
}
