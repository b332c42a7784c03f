//! Hilbert-based instantaneous analysis and quality metrics

pub mod engine;
pub mod hilbert;
pub mod metrics;

pub use engine::InstantaneousAnalyzer;
pub use metrics::{peak_frequency, rms, Metrics};
