//! Discrete Hilbert transform and instantaneous phase/frequency
//!
//! Direct O(N²) convolution with the ideal Hilbert kernel `1/(π·n)`. Meant
//! for buffers of a few thousand samples; a 10 000-sample buffer costs on
//! the order of 10⁸ multiply-adds.

use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

/// Analytic signal `x[i] + j·H{x}[i]`
///
/// `H{x}[i] = Σ_{j≠i} x[j] / (π·(i − j))`
pub fn analytic_signal(values: &[f64]) -> Vec<Complex64> {
    (0..values.len())
        .map(|i| {
            let mut imag = 0.0;
            for (j, &x) in values.iter().enumerate() {
                if j != i {
                    imag += x / (PI * (i as f64 - j as f64));
                }
            }
            Complex64::new(values[i], imag)
        })
        .collect()
}

/// Instantaneous phase `atan2(H{x}, x)` in radians
pub fn instantaneous_phase(values: &[f64]) -> Vec<f64> {
    analytic_signal(values).iter().map(|z| z.arg()).collect()
}

/// Instantaneous frequency in Hz
///
/// Consecutive phase differences wrapped into `(−π, π]`, scaled by
/// `sample_rate / 2π`. The first sample has no predecessor and reads 0.
pub fn instantaneous_frequency(values: &[f64], sample_rate: f64) -> Vec<f64> {
    let phase = instantaneous_phase(values);
    let mut frequency = vec![0.0; phase.len()];

    for i in 1..phase.len() {
        frequency[i] = wrap_phase(phase[i] - phase[i - 1]) * sample_rate / TAU;
    }

    frequency
}

/// Wrap a phase difference into `(−π, π]`
#[inline]
fn wrap_phase(delta: f64) -> f64 {
    if delta > PI {
        delta - TAU
    } else if delta <= -PI {
        delta + TAU
    } else {
        delta
    }
}
