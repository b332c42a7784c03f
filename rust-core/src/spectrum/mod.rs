//! Spectral estimation with a real-input FFT

pub mod estimator;
pub mod fft;
pub mod windowing;

pub use estimator::{SpectrumEstimator, SpectrumPoint, MAX_DISPLAY_HZ, MIN_SPECTRUM_SAMPLES};
pub use fft::{largest_power_of_two, FftEngine};
pub use windowing::hann_window;
