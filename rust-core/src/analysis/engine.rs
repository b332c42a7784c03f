//! Instantaneous analysis over sample buffers

use super::hilbert;
use super::metrics::Metrics;
use crate::error::{check_sample_rate, Result};
use crate::signal::{originals, Sample};

/// Hilbert annotation and metric computation at a fixed sample rate
#[derive(Debug, Clone)]
pub struct InstantaneousAnalyzer {
    sample_rate: f64,
}

impl InstantaneousAnalyzer {
    pub fn new(sample_rate: f64) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        Ok(Self { sample_rate })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Instantaneous frequency of the raw values (Hz)
    pub fn instantaneous_frequency(&self, samples: &[Sample]) -> Vec<f64> {
        hilbert::instantaneous_frequency(&originals(samples), self.sample_rate)
    }

    /// Write each sample's instantaneous frequency in place
    ///
    /// O(N²) in the buffer length.
    pub fn annotate(&self, samples: &mut [Sample]) {
        let frequencies = self.instantaneous_frequency(samples);
        for (sample, frequency) in samples.iter_mut().zip(frequencies) {
            sample.instantaneous_frequency = frequency;
        }
        log::debug!("Annotated {} samples", samples.len());
    }

    /// SNR, quality and dominant frequency of already-filtered samples
    pub fn analyze(&self, samples: &[Sample]) -> Metrics {
        Metrics::compute(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::from_values;
    use std::f64::consts::TAU;

    #[test]
    fn test_annotate_sine() {
        let analyzer = InstantaneousAnalyzer::new(1000.0).unwrap();
        let values: Vec<f64> = (0..1500)
            .map(|i| (TAU * 12.0 * i as f64 / 1000.0).sin())
            .collect();
        let mut samples = from_values(&values, 1000.0);

        analyzer.annotate(&mut samples);

        assert_eq!(samples[0].instantaneous_frequency, 0.0);
        let middle = &samples[500..1000];
        let mean = middle.iter().map(|s| s.instantaneous_frequency).sum::<f64>()
            / middle.len() as f64;
        assert!((mean - 12.0).abs() < 0.5, "mean {} Hz", mean);

        // Raw and filtered values untouched
        assert_eq!(samples[7].original, values[7]);
        assert_eq!(samples[7].filtered, values[7]);
    }

    #[test]
    fn test_analyze_empty() {
        let analyzer = InstantaneousAnalyzer::new(1000.0).unwrap();
        assert_eq!(analyzer.analyze(&[]), Metrics::default());
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(InstantaneousAnalyzer::new(-1.0).is_err());
    }
}
