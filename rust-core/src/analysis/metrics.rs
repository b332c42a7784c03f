//! Signal quality metrics
//!
//! Every ratio has a defined fallback so a degenerate window (silence,
//! a perfect filter, a single sample) still yields finite numbers.

use crate::error::Result;
use crate::signal::Sample;
use crate::spectrum::{largest_power_of_two, FftEngine};
use serde::{Deserialize, Serialize};

/// Summary of a filtered window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Filtered-to-residual power ratio (dB)
    pub snr: f64,

    /// Mean share of the filtered value in each sample, 0–100
    pub quality: f64,

    /// Dominant frequency from zero crossings of the filtered signal (Hz)
    pub frequency: f64,
}

impl Metrics {
    /// All three metrics over `samples`; empty input gives zeros
    pub fn compute(samples: &[Sample]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        Self {
            snr: snr_db(samples),
            quality: quality_percent(samples),
            frequency: zero_crossing_frequency(samples),
        }
    }
}

/// `10·log10(Σ filtered² / Σ (original − filtered)²)`
///
/// 0 when either power is zero.
pub fn snr_db(samples: &[Sample]) -> f64 {
    let (signal_power, noise_power) = samples.iter().fold((0.0, 0.0), |(sig, noise), s| {
        let residual = s.original - s.filtered;
        (sig + s.filtered * s.filtered, noise + residual * residual)
    });

    if noise_power == 0.0 || signal_power == 0.0 {
        return 0.0;
    }
    10.0 * (signal_power / noise_power).log10()
}

/// Mean of `|f| / (|f| + |o − f|)` as a percentage; `0/0` terms count as 0
pub fn quality_percent(samples: &[Sample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let total: f64 = samples
        .iter()
        .map(|s| {
            let kept = s.filtered.abs();
            let denominator = kept + (s.original - s.filtered).abs();
            if denominator == 0.0 {
                0.0
            } else {
                kept / denominator
            }
        })
        .sum();

    total / samples.len() as f64 * 100.0
}

/// Half the number of strict sign changes of `filtered`, per second of span
///
/// A window wrapped past the end of its buffer ends earlier than it starts;
/// its span is the elapsed replay time, `(len − 1)` sample steps. 0 for
/// fewer than two samples or a zero span.
pub fn zero_crossing_frequency(samples: &[Sample]) -> f64 {
    let duration = match elapsed_span(samples) {
        Some(duration) => duration,
        None => return 0.0,
    };

    let crossings = samples
        .windows(2)
        .filter(|pair| {
            (pair[0].filtered > 0.0 && pair[1].filtered < 0.0)
                || (pair[0].filtered < 0.0 && pair[1].filtered > 0.0)
        })
        .count();

    crossings as f64 / 2.0 / duration
}

/// Elapsed time covered by `samples`, `None` when it is zero
fn elapsed_span(samples: &[Sample]) -> Option<f64> {
    let (first, last) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) if samples.len() >= 2 => (first, last),
        _ => return None,
    };

    let duration = last.time - first.time;
    if duration > 0.0 {
        return Some(duration);
    }

    // Wrapped: time restarts mid-window, step from the first increasing pair
    samples
        .windows(2)
        .map(|pair| pair[1].time - pair[0].time)
        .find(|&step| step > 0.0)
        .map(|step| step * (samples.len() - 1) as f64)
}

/// Root mean square; 0 for an empty slice
pub fn rms(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}

/// Frequency of the strongest FFT bin below Nyquist (Hz)
///
/// Analyzes the largest power-of-two prefix; DC is skipped. Fewer than two
/// values give 0.
pub fn peak_frequency(values: &[f64], sample_rate: f64) -> Result<f64> {
    let n = largest_power_of_two(values.len());
    if n < 2 {
        return Ok(0.0);
    }

    let mut engine = FftEngine::new(n);
    let magnitudes = engine.compute_magnitude(&values[..n])?;

    let peak_bin = magnitudes[..n / 2]
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map_or(0, |(bin, _)| bin);

    Ok(engine.bin_to_hz(peak_bin, sample_rate))
}
