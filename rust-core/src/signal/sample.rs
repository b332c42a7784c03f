//! Sample model and ingestion
//!
//! The core receives already-parsed `(time, value)` pairs; parsing and
//! row validation stay with the ingestion layer.

use serde::{Deserialize, Serialize};

/// One point of a uniformly sampled signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample time in seconds
    pub time: f64,

    /// Raw value as ingested
    pub original: f64,

    /// Output of the most recent filter pass (equals `original` until filtered)
    pub filtered: f64,

    /// Instantaneous frequency in Hz (0 until annotated)
    pub instantaneous_frequency: f64,

    /// Absolute amplitude of the raw value
    pub amplitude: f64,
}

impl Sample {
    pub fn new(time: f64, original: f64) -> Self {
        Self {
            time,
            original,
            filtered: original,
            instantaneous_frequency: 0.0,
            amplitude: original.abs(),
        }
    }
}

/// Build samples from ordered `(time, value)` pairs
pub fn from_pairs(pairs: &[(f64, f64)]) -> Vec<Sample> {
    pairs
        .iter()
        .map(|&(time, value)| Sample::new(time, value))
        .collect()
}

/// Build samples from a raw value series, with `time = i / sample_rate`
pub fn from_values(values: &[f64], sample_rate: f64) -> Vec<Sample> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Sample::new(i as f64 / sample_rate, value))
        .collect()
}

/// Copy out the raw values
pub fn originals(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.original).collect()
}

/// Copy out the filtered values
pub fn filtered(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(|s| s.filtered).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sample_defaults() {
        let s = Sample::new(0.25, -3.0);
        assert_eq!(s.filtered, -3.0);
        assert_eq!(s.amplitude, 3.0);
        assert_eq!(s.instantaneous_frequency, 0.0);
    }

    #[test]
    fn test_from_values_spacing() {
        let samples = from_values(&[1.0, 2.0, 3.0, 4.0], 1000.0);
        assert_eq!(samples.len(), 4);
        for (i, s) in samples.iter().enumerate() {
            assert!((s.time - i as f64 * 1e-3).abs() < 1e-12);
        }
        assert_eq!(originals(&samples), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_pairs_keeps_times() {
        let samples = from_pairs(&[(0.5, 1.0), (0.501, -1.0)]);
        assert_eq!(samples[1].time, 0.501);
        assert_eq!(filtered(&samples), vec![1.0, -1.0]);
    }
}
