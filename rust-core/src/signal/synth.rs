//! Synthetic test signal
//!
//! A 10.5 Hz tone buried under a 30 Hz interferer, uniform noise and a
//! slow 0.5 Hz drift. Seeded so runs are reproducible.

use super::sample::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Generator settings
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Signal length in seconds (both ends included)
    pub duration_secs: f64,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Frequency of the wanted tone in Hz
    pub main_freq: f64,

    /// Peak-to-peak width of the uniform noise
    pub noise_level: f64,

    /// RNG seed
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            sample_rate: 1000.0,
            main_freq: 10.5,
            noise_level: 1.5,
            seed: 0x5EED,
        }
    }
}

const MAIN_AMPLITUDE: f64 = 5.0;
const INTERFERER_FREQ: f64 = 30.0;
const INTERFERER_AMPLITUDE: f64 = 2.0;
const DRIFT_FREQ: f64 = 0.5;

/// Generate a noisy test signal
///
/// `filtered` holds the clean tone (a ground truth for metrics) and
/// `instantaneous_frequency` wobbles ±1 Hz around `main_freq` once per second.
pub fn generate(params: &SynthParams) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let count = (params.duration_secs * params.sample_rate).floor() as usize + 1;

    (0..count)
        .map(|i| {
            let t = i as f64 / params.sample_rate;

            let main = MAIN_AMPLITUDE * (2.0 * PI * params.main_freq * t).sin();
            let interferer = INTERFERER_AMPLITUDE * (2.0 * PI * INTERFERER_FREQ * t).sin();
            let noise = (rng.random::<f64>() - 0.5) * params.noise_level;
            let drift = (2.0 * PI * DRIFT_FREQ * t).sin();

            Sample {
                time: t,
                original: main + interferer + noise + drift,
                filtered: main,
                instantaneous_frequency: params.main_freq + (2.0 * PI * t).sin(),
                amplitude: main.abs(),
            }
        })
        .collect()
}
