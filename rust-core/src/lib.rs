//! Signal Suite - band-limited signal analysis core
//!
//! Butterworth filtering, display spectra, Hilbert instantaneous frequency
//! and windowed live replay of a loaded buffer, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod analysis;
pub mod config;
pub mod error;
pub mod filters;
pub mod processor;
pub mod signal;
pub mod spectrum;
pub mod stream;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use analysis::{InstantaneousAnalyzer, Metrics};
pub use config::{Band, EngineConfig, FilterParams};
pub use error::{DspError, Result};
pub use filters::{FilterCoefficients, FilterEngine, FilterStrategy};
pub use processor::{BatchResults, Frame, SignalProcessor};
pub use signal::Sample;
pub use spectrum::{SpectrumEstimator, SpectrumPoint};
pub use stream::{FeederPhase, StreamState, StreamingWindowFeeder, TickScheduler};
