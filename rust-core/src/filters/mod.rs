//! Butterworth IIR design, recursive filtering and the resonant scalar filter

pub mod design;
pub mod iir;
pub mod resonant;

pub use design::{
    design, design_butterworth, design_highpass, CoefficientLayout, FilterCoefficients, PassKind,
};
pub use iir::{apply, BandpassCoefficients, FilterEngine, FilterStrategy};
