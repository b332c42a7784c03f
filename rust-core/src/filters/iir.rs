//! Recursive filtering by direct-form recurrence
//!
//! Coefficient sets from the designer run section by section in pole order;
//! plain direct-form sets run as a single recurrence. History before the
//! start of the buffer is zero (causal, no wraparound).

use super::design::{self, CoefficientLayout, FilterCoefficients};
use super::resonant;
use crate::config::Band;
use crate::error::{check_sample_rate, DspError, Result};
use crate::signal::{originals, Sample};

/// Filtering strategy, chosen by call path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStrategy {
    /// Butterworth high-pass/low-pass cascade (offline batch analysis)
    IirCascade,

    /// Per-sample resonant gain driven by each sample's instantaneous
    /// frequency (live windowed replay). Not numerically equivalent to
    /// the cascade.
    ResonantScalar,
}

/// Apply a coefficient set to a sample sequence
///
/// # Arguments
/// * `samples` - Input samples x[n]
/// * `coeffs` - Designed sections or a direct-form set
///
/// # Returns
/// Filtered output y[n], same length as input
pub fn apply(samples: &[f64], coeffs: &FilterCoefficients) -> Vec<f64> {
    match coeffs.layout() {
        CoefficientLayout::DirectForm => {
            direct_form(samples, coeffs.feedforward(), coeffs.feedback())
        }
        _ => coeffs
            .sections()
            .iter()
            .fold(samples.to_vec(), |signal, section| {
                direct_form(&signal, &section.feedforward, &section.feedback)
            }),
    }
}

/// y[i] = (Σ b[j]·x[i-j] − Σ_{j≥1} a[j]·y[i-j]) / a[0]
fn direct_form(input: &[f64], feedforward: &[f64], feedback: &[f64]) -> Vec<f64> {
    let a0 = feedback[0];
    let mut output = vec![0.0; input.len()];

    for i in 0..input.len() {
        let mut sum = 0.0;

        for (j, &b) in feedforward.iter().enumerate().take(i + 1) {
            sum += b * input[i - j];
        }
        for (j, &a) in feedback.iter().enumerate().take(i + 1).skip(1) {
            sum -= a * output[i - j];
        }

        output[i] = sum / a0;
    }

    output
}

/// Designed band-pass cascade: high-pass at `band.low`, low-pass at `band.high`
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassCoefficients {
    band: Band,
    highpass: FilterCoefficients,
    lowpass: FilterCoefficients,
}

impl BandpassCoefficients {
    pub fn band(&self) -> &Band {
        &self.band
    }

    /// Run the high-pass sections, then the low-pass sections
    pub fn apply(&self, samples: &[f64]) -> Vec<f64> {
        apply(&apply(samples, &self.highpass), &self.lowpass)
    }
}

/// Band, low and high-pass filtering at a fixed sample rate and order
#[derive(Debug, Clone)]
pub struct FilterEngine {
    sample_rate: f64,
    order: usize,
}

impl FilterEngine {
    /// Create a filter engine
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz
    /// * `order` - Butterworth order for every designed stage
    pub fn new(sample_rate: f64, order: usize) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if order == 0 {
            return Err(DspError::InvalidParameter(
                "filter order must be at least 1".into(),
            ));
        }
        Ok(Self { sample_rate, order })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Low-pass response at `cutoff_hz`
    pub fn lowpass(&self, samples: &[f64], cutoff_hz: f64) -> Result<Vec<f64>> {
        let coeffs = design::design(cutoff_hz, self.sample_rate, self.order)?;
        Ok(apply(samples, &coeffs))
    }

    /// High-pass response as the complement `input − lowpass(input)`
    pub fn highpass(&self, samples: &[f64], cutoff_hz: f64) -> Result<Vec<f64>> {
        let lowpassed = self.lowpass(samples, cutoff_hz)?;
        Ok(samples
            .iter()
            .zip(lowpassed.iter())
            .map(|(&x, &lp)| x - lp)
            .collect())
    }

    /// Design both stages of the band-pass cascade for `band`
    pub fn design_bandpass(&self, band: &Band) -> Result<BandpassCoefficients> {
        band.validate(self.sample_rate)?;

        Ok(BandpassCoefficients {
            band: *band,
            highpass: design::design_highpass(band.low, self.sample_rate, self.order)?,
            lowpass: design::design(band.high, self.sample_rate, self.order)?,
        })
    }

    /// Band-pass response: high-pass at `band.low`, then low-pass at `band.high`
    pub fn bandpass(&self, samples: &[f64], band: &Band) -> Result<Vec<f64>> {
        Ok(self.design_bandpass(band)?.apply(samples))
    }

    /// Write a band-limited version of each sample into `Sample::filtered`
    ///
    /// The resonant strategy uses only the band of `bandpass`.
    pub fn filter_samples(
        &self,
        samples: &mut [Sample],
        bandpass: &BandpassCoefficients,
        strategy: FilterStrategy,
    ) {
        match strategy {
            FilterStrategy::IirCascade => {
                let filtered = bandpass.apply(&originals(samples));
                for (sample, value) in samples.iter_mut().zip(filtered) {
                    sample.filtered = value;
                }
            }
            FilterStrategy::ResonantScalar => {
                resonant::filter_in_place(samples, bandpass.band());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|n| (2.0 * PI * freq * n as f64 / 1000.0).sin())
            .collect()
    }

    fn rms(signal: &[f64]) -> f64 {
        (signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64).sqrt()
    }

    #[test]
    fn test_zero_input_gives_zero_output() {
        let zeros = vec![0.0; 256];

        let designed = design::design(11.5, 1000.0, 4).unwrap();
        assert!(apply(&zeros, &designed).iter().all(|&y| y == 0.0));

        let highpass = design::design_highpass(7.6, 1000.0, 3).unwrap();
        assert!(apply(&zeros, &highpass).iter().all(|&y| y == 0.0));

        let direct = FilterCoefficients::direct_form(vec![0.3, 0.2], vec![2.0, -0.9]).unwrap();
        assert!(apply(&zeros, &direct).iter().all(|&y| y == 0.0));
    }

    #[test]
    fn test_direct_form_moving_average() {
        let coeffs = FilterCoefficients::direct_form(vec![0.5, 0.5], vec![1.0]).unwrap();
        let output = apply(&[1.0, 2.0, 3.0, 4.0], &coeffs);

        // No history before the first sample
        let expected = [0.5, 1.5, 2.5, 3.5];
        assert_eq!(output.len(), 4);
        for (y, e) in output.iter().zip(expected.iter()) {
            assert!((y - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_direct_form_feedback_and_scaling() {
        // y[i] = (x[i] + 0.5·y[i-1]) / 2
        let coeffs = FilterCoefficients::direct_form(vec![1.0], vec![2.0, -0.5]).unwrap();
        let output = apply(&[2.0, 0.0, 0.0], &coeffs);

        assert!((output[0] - 1.0).abs() < 1e-12);
        assert!((output[1] - 0.25).abs() < 1e-12);
        assert!((output[2] - 0.0625).abs() < 1e-12);
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        let output = engine.lowpass(&vec![1.0; 3000], 11.5).unwrap();
        assert!((output[2999] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_highpass_is_complement_of_lowpass() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        let input = tone(3.0, 500);

        let low = engine.lowpass(&input, 10.0).unwrap();
        let high = engine.highpass(&input, 10.0).unwrap();

        for i in 0..input.len() {
            assert!((low[i] + high[i] - input[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bandpass_rejects_out_of_band() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        let band = Band::new(7.6, 11.5);

        // Skip the start-up transient before measuring
        let in_band = engine.bandpass(&tone(9.5, 4000), &band).unwrap();
        let above = engine.bandpass(&tone(19.0, 4000), &band).unwrap();
        let below = engine.bandpass(&tone(4.75, 4000), &band).unwrap();

        let in_gain = rms(&in_band[2000..]) / rms(&tone(9.5, 4000)[2000..]);
        let above_gain = rms(&above[2000..]) / rms(&tone(19.0, 4000)[2000..]);
        let below_gain = rms(&below[2000..]) / rms(&tone(4.75, 4000)[2000..]);

        assert!(in_gain > 0.5, "in-band gain {}", in_gain);
        assert!(above_gain < 0.1 * in_gain, "gain at 2x band {}", above_gain);
        assert!(below_gain < 0.1 * in_gain, "gain at band/2 {}", below_gain);
    }

    #[test]
    fn test_bandpass_output_is_finite_and_same_length() {
        let engine = FilterEngine::new(1000.0, 8).unwrap();
        let input = tone(50.0, 5000);
        let output = engine.bandpass(&input, &Band::new(2.0, 20.0)).unwrap();

        assert_eq!(output.len(), input.len());
        assert!(output.iter().all(|y| y.is_finite()));
    }

    #[test]
    fn test_designed_bandpass_matches_one_shot() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        let band = Band::new(7.6, 11.5);
        let input = tone(9.5, 1000);

        let bandpass = engine.design_bandpass(&band).unwrap();
        assert_eq!(bandpass.band(), &band);
        assert_eq!(bandpass.apply(&input), engine.bandpass(&input, &band).unwrap());
        assert!(engine.design_bandpass(&Band::new(11.5, 7.6)).is_err());
    }

    #[test]
    fn test_bandpass_invalid_band() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        assert!(engine.bandpass(&[0.0; 8], &Band::new(12.0, 8.0)).is_err());
        assert!(engine.lowpass(&[0.0; 8], 500.0).is_err());
        assert!(FilterEngine::new(1000.0, 0).is_err());
    }

    #[test]
    fn test_filter_samples_strategies_differ() {
        let engine = FilterEngine::new(1000.0, 4).unwrap();
        let band = Band::new(7.6, 11.5);

        let mut iir: Vec<Sample> = tone(9.5, 2000)
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let mut s = Sample::new(i as f64 / 1000.0, x);
                s.instantaneous_frequency = 9.5;
                s
            })
            .collect();
        let mut resonant = iir.clone();

        let bandpass = engine.design_bandpass(&band).unwrap();
        engine.filter_samples(&mut iir, &bandpass, FilterStrategy::IirCascade);
        engine.filter_samples(&mut resonant, &bandpass, FilterStrategy::ResonantScalar);

        // Resonant gain is memoryless: filtered / original is constant
        let ratio = resonant[100].filtered / resonant[100].original;
        assert!((ratio - 1.0 / (1.0 + (0.05f64 / 1.95).powi(2))).abs() < 1e-12);

        // The cascade has a start-up transient and phase shift
        assert!((iir[100].filtered - resonant[100].filtered).abs() > 1e-3);
    }
}
