//! Display spectrum estimation
//!
//! Produces the 0–30 Hz, 0–100 normalized magnitude curve shown next to the
//! time-domain plot. Frames shorter than [`MIN_SPECTRUM_SAMPLES`] yield an
//! empty spectrum rather than an error.

use super::fft::{largest_power_of_two, FftEngine};
use super::windowing::hann_window;
use crate::config::Band;
use crate::error::{check_sample_rate, Result};
use crate::signal::Sample;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Minimum frame length for a spectrum
pub const MIN_SPECTRUM_SAMPLES: usize = 512;

/// Highest displayed frequency (Hz)
pub const MAX_DISPLAY_HZ: f64 = 30.0;

/// Half-width of the centered moving average, in bins
pub const SMOOTHING_HALF_WIDTH: usize = 3;

/// One bin of the display spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Bin frequency (Hz)
    pub frequency: f64,

    /// Normalized magnitude, 0–100
    pub magnitude: f64,
}

/// Spectrum estimator with a cached FFT plan
pub struct SpectrumEstimator {
    sample_rate: f64,
    fft_engine: Option<FftEngine>,
}

impl SpectrumEstimator {
    pub fn new(sample_rate: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        Ok(Self {
            sample_rate,
            fft_engine: None,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Estimate the display spectrum of `samples`
    ///
    /// The frame is truncated to the largest power of two, Hann windowed,
    /// and every sample whose implied frequency `1/(2π·time)` falls inside
    /// `band` is zeroed before the transform. Magnitudes are `|X_k|/N`,
    /// smoothed and normalized so the largest bin reads 100.
    ///
    /// # Returns
    /// Points in ascending frequency, empty below [`MIN_SPECTRUM_SAMPLES`]
    pub fn estimate(&mut self, samples: &[Sample], band: &Band) -> Result<Vec<SpectrumPoint>> {
        band.validate(self.sample_rate)?;

        if samples.len() < MIN_SPECTRUM_SAMPLES {
            log::debug!(
                "Spectrum skipped: {} samples < {}",
                samples.len(),
                MIN_SPECTRUM_SAMPLES
            );
            return Ok(Vec::new());
        }

        let n = largest_power_of_two(samples.len());
        let window = hann_window(n);
        let frame: Vec<f64> = samples[..n]
            .iter()
            .zip(window.iter())
            .map(|(s, &w)| {
                if band.contains(implied_frequency(s.time)) {
                    0.0
                } else {
                    s.original * w
                }
            })
            .collect();

        let sample_rate = self.sample_rate;
        let engine = self.engine_for(n);
        let magnitudes = engine.compute_magnitude(&frame)?;

        let mut frequencies = Vec::new();
        let mut raw = Vec::new();
        for (k, &magnitude) in magnitudes.iter().enumerate().take(n / 2) {
            let frequency = engine.bin_to_hz(k, sample_rate);
            if frequency > MAX_DISPLAY_HZ {
                break;
            }
            frequencies.push(frequency);
            raw.push(magnitude / n as f64);
        }

        let normalized = normalize(&smooth(&raw, SMOOTHING_HALF_WIDTH));

        Ok(frequencies
            .into_iter()
            .zip(normalized)
            .map(|(frequency, magnitude)| SpectrumPoint {
                frequency,
                magnitude,
            })
            .collect())
    }

    /// Reuse the cached plan, replanning only when the frame size changes
    fn engine_for(&mut self, size: usize) -> &mut FftEngine {
        if self.fft_engine.as_ref().map(FftEngine::fft_size) != Some(size) {
            log::debug!("Planning FFT of size {}", size);
            self.fft_engine = Some(FftEngine::new(size));
        }
        self.fft_engine.get_or_insert_with(|| FftEngine::new(size))
    }
}

/// Frequency implied by a sample's timestamp
#[inline]
fn implied_frequency(time: f64) -> f64 {
    1.0 / (2.0 * PI * time)
}

/// Centered moving average; the first and last `half_width` bins pass through
pub fn smooth(values: &[f64], half_width: usize) -> Vec<f64> {
    let len = values.len();
    (0..len)
        .map(|i| {
            if i < half_width || i + half_width >= len {
                values[i]
            } else {
                let span = &values[i - half_width..=i + half_width];
                span.iter().sum::<f64>() / span.len() as f64
            }
        })
        .collect()
}

/// Scale so the maximum is 100; an all-zero input stays zero
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(0.0, f64::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max * 100.0).collect()
}
