//! FFT engine using realfft for real-valued signals
//!
//! O(N log N). Bin magnitudes match a direct O(N²) DFT summation to within
//! floating-point rounding.

use crate::error::{DspError, Result};
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Fixed-size FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer (realfft overwrites it)
    input_buffer: Vec<f64>,

    /// Reusable output buffer, bins 0..=fft_size/2
    output_buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, at least 1)
    pub fn new(fft_size: usize) -> Self {
        let fft_size = fft_size.max(1);
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute the unscaled magnitude spectrum |X[k]|
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded or truncated to fft_size)
    ///
    /// # Returns
    /// |X[k]| for k = 0..=fft_size/2
    pub fn compute_magnitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let copy_len = signal.len().min(self.fft_size);
        self.input_buffer[..copy_len].copy_from_slice(&signal[..copy_len]);
        self.input_buffer[copy_len..].fill(0.0);

        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|e| DspError::Transform(e.to_string()))?;

        Ok(self.output_buffer.iter().map(|c| c.norm()).collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Center frequency of a bin in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }
}

/// Largest power of two not exceeding `n` (0 for 0)
pub fn largest_power_of_two(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    /// Direct O(N²) DFT magnitude of one bin
    fn direct_dft_magnitude(signal: &[f64], bin: usize) -> f64 {
        let n = signal.len() as f64;
        let (mut real, mut imag) = (0.0, 0.0);
        for (i, &x) in signal.iter().enumerate() {
            let angle = -2.0 * PI * bin as f64 * i as f64 / n;
            real += x * angle.cos();
            imag += x * angle.sin();
        }
        (real * real + imag * imag).sqrt()
    }

    #[test]
    fn test_fft_dc_signal() {
        let mut fft = FftEngine::new(1024);

        // DC signal, zero-padded
        let spectrum = fft.compute_magnitude(&vec![1.0; 100]).unwrap();

        assert_eq!(spectrum.len(), 513);
        assert!((spectrum[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fft_matches_direct_dft() {
        let mut fft = FftEngine::new(512);
        let signal: Vec<f64> = (0..512)
            .map(|i| {
                let t = i as f64 / 1000.0;
                (2.0 * PI * 12.0 * t).sin() + 0.3 * (2.0 * PI * 3.0 * t).cos() + 0.1
            })
            .collect();

        let spectrum = fft.compute_magnitude(&signal).unwrap();
        for bin in [0, 1, 3, 6, 15, 100, 256] {
            let direct = direct_dft_magnitude(&signal, bin);
            assert!(
                (spectrum[bin] - direct).abs() < 1e-8,
                "bin {}: fft {} vs direct {}",
                bin,
                spectrum[bin],
                direct
            );
        }
    }

    #[test]
    fn test_bin_frequencies() {
        let fft = FftEngine::new(1024);
        assert_eq!(fft.bin_to_hz(0, 1000.0), 0.0);
        assert!((fft.bin_to_hz(512, 1000.0) - 500.0).abs() < 1e-12);
    }

    #[test]
    fn test_largest_power_of_two() {
        assert_eq!(largest_power_of_two(0), 0);
        assert_eq!(largest_power_of_two(1), 1);
        assert_eq!(largest_power_of_two(512), 512);
        assert_eq!(largest_power_of_two(1000), 512);
        assert_eq!(largest_power_of_two(1025), 1024);
    }
}
