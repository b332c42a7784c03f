//! Sample model, ingestion and synthetic signals

pub mod sample;
pub mod synth;

pub use sample::{filtered, from_pairs, from_values, originals, Sample};
pub use synth::{generate, SynthParams};
