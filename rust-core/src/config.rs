//! Engine configuration and filter parameters
//!
//! Loaded from TOML (every field optional) and validated once at the
//! boundary, before any coefficient synthesis happens.

use crate::error::{check_sample_rate, DspError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Frequency band in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band center (Hz)
    pub fn center(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    /// Band width (Hz)
    pub fn bandwidth(&self) -> f64 {
        self.high - self.low
    }

    /// Inclusive membership test
    pub fn contains(&self, freq: f64) -> bool {
        freq >= self.low && freq <= self.high
    }

    /// Check `0 < low < high < sample_rate / 2`
    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        check_sample_rate(sample_rate)?;
        let nyquist = sample_rate / 2.0;

        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(DspError::InvalidParameter(format!(
                "band edges must be finite (got {} - {} Hz)",
                self.low, self.high
            )));
        }
        if self.low <= 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "lower band edge must be positive (got {} Hz)",
                self.low
            )));
        }
        if self.low >= self.high {
            return Err(DspError::InvalidParameter(format!(
                "lower band edge {} Hz must be below upper edge {} Hz",
                self.low, self.high
            )));
        }
        if self.high >= nyquist {
            return Err(DspError::InvalidParameter(format!(
                "upper band edge {} Hz must be below Nyquist ({} Hz)",
                self.high, nyquist
            )));
        }
        Ok(())
    }
}

/// User-adjustable filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    pub bandpass: Band,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            bandpass: Band::new(DEFAULT_BAND_LOW_HZ, DEFAULT_BAND_HIGH_HZ),
        }
    }
}

impl FilterParams {
    pub fn bandpass(low: f64, high: f64) -> Self {
        Self {
            bandpass: Band::new(low, high),
        }
    }

    pub fn validate(&self, sample_rate: f64) -> Result<()> {
        self.bandpass.validate(sample_rate)
    }
}

pub const DEFAULT_SAMPLE_RATE: f64 = 1000.0;
pub const DEFAULT_BAND_LOW_HZ: f64 = 7.6;
pub const DEFAULT_BAND_HIGH_HZ: f64 = 11.5;

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,

    /// Length of the live replay window in seconds
    #[serde(default = "default_window_duration")]
    pub window_duration_secs: f64,

    /// Target tick period in milliseconds (~30 Hz)
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: f64,

    /// Butterworth order used by the batch cascade
    #[serde(default = "default_filter_order")]
    pub filter_order: usize,

    #[serde(default)]
    pub filter: FilterParams,
}

fn default_sample_rate() -> f64 { DEFAULT_SAMPLE_RATE }
fn default_window_duration() -> f64 { 1.0 }
fn default_tick_interval() -> f64 { 1000.0 / 30.0 }
fn default_filter_order() -> usize { 4 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            window_duration_secs: default_window_duration(),
            tick_interval_ms: default_tick_interval(),
            filter_order: default_filter_order(),
            filter: FilterParams::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| DspError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DspError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_sample_rate(self.sample_rate)?;

        if !self.window_duration_secs.is_finite() || self.window_duration_secs <= 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "window duration must be positive (got {} s)",
                self.window_duration_secs
            )));
        }
        if self.window_size_samples() == 0 {
            return Err(DspError::InvalidParameter(format!(
                "window of {} s holds no samples at {} Hz",
                self.window_duration_secs, self.sample_rate
            )));
        }
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms < 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "tick interval must be non-negative (got {} ms)",
                self.tick_interval_ms
            )));
        }
        if self.filter_order == 0 {
            return Err(DspError::InvalidParameter(
                "filter order must be at least 1".into(),
            ));
        }
        self.filter.validate(self.sample_rate)
    }

    /// Live window length in samples: `floor(sample_rate * window_duration)`
    pub fn window_size_samples(&self) -> usize {
        (self.sample_rate * self.window_duration_secs).floor() as usize
    }
}
