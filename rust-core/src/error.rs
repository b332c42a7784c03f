//! Error types for the DSP core
//!
//! Only configuration and state mistakes are raised. Short buffers and
//! zero-valued metric denominators are expected during ramp-up and resolve
//! to empty results or zero fallbacks instead.

use crate::stream::FeederPhase;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Stream feeder is {actual:?}, operation requires {expected:?}")]
    InvalidState {
        expected: FeederPhase,
        actual: FeederPhase,
    },

    #[error("FFT processing failed: {0}")]
    Transform(String),

    #[error("Failed to load configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DspError>;

/// Reject non-finite or non-positive sample rates
pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(DspError::InvalidParameter(format!(
            "sample rate must be positive and finite (got {} Hz)",
            sample_rate
        )));
    }
    Ok(())
}
