//! Butterworth IIR filter design using the bilinear transform
//!
//! Each analog pole becomes its own second-order section: one feedforward
//! term (the section gain) and three feedback terms `[1, a1, a2]`. The
//! sections are emitted in pole order and must be applied in that order;
//! they are not collapsed into a single polynomial.

use crate::error::{check_sample_rate, DspError, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// How a coefficient set is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientLayout {
    /// Plain `b`/`a` polynomials for a single direct-form recurrence
    DirectForm,

    /// One low-pass section per pole, numerator taps `gain * [1, 2, 1]`
    LowPassSections,

    /// One high-pass section per pole, numerator taps `gain * [1, -2, 1]`
    HighPassSections,
}

/// Prototype response to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    LowPass,
    HighPass,
}

/// Recursive filter coefficients
///
/// Fields are private: a coefficient set is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    feedforward: Vec<f64>,
    feedback: Vec<f64>,
    layout: CoefficientLayout,
}

/// One second-order section expanded to full taps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub feedforward: [f64; 3],
    pub feedback: [f64; 3],
}

impl FilterCoefficients {
    /// Wrap arbitrary direct-form polynomials
    ///
    /// # Arguments
    /// * `feedforward` - Numerator taps b[0..]
    /// * `feedback` - Denominator taps a[0..]; a[0] must be finite and nonzero
    pub fn direct_form(feedforward: Vec<f64>, feedback: Vec<f64>) -> Result<Self> {
        if feedforward.is_empty() {
            return Err(DspError::InvalidParameter(
                "feedforward coefficients must not be empty".into(),
            ));
        }
        match feedback.first() {
            Some(&a0) if a0.is_finite() && a0 != 0.0 => {}
            _ => {
                return Err(DspError::InvalidParameter(
                    "first feedback coefficient must be finite and nonzero".into(),
                ))
            }
        }
        if feedforward.iter().chain(feedback.iter()).any(|c| !c.is_finite()) {
            return Err(DspError::InvalidParameter(
                "coefficients must be finite".into(),
            ));
        }

        Ok(Self {
            feedforward,
            feedback,
            layout: CoefficientLayout::DirectForm,
        })
    }

    pub fn feedforward(&self) -> &[f64] {
        &self.feedforward
    }

    pub fn feedback(&self) -> &[f64] {
        &self.feedback
    }

    pub fn layout(&self) -> CoefficientLayout {
        self.layout
    }

    /// Number of pole sections (0 for direct-form sets)
    pub fn num_sections(&self) -> usize {
        match self.layout {
            CoefficientLayout::DirectForm => 0,
            _ => self.feedforward.len(),
        }
    }

    /// Expand pole sections in pole order
    ///
    /// Direct-form sets have no sections and yield an empty vector.
    pub fn sections(&self) -> Vec<Section> {
        let taps = match self.layout {
            CoefficientLayout::DirectForm => return Vec::new(),
            CoefficientLayout::LowPassSections => [1.0, 2.0, 1.0],
            CoefficientLayout::HighPassSections => [1.0, -2.0, 1.0],
        };

        self.feedforward
            .iter()
            .zip(self.feedback.chunks_exact(3))
            .map(|(&gain, a)| Section {
                feedforward: [gain * taps[0], gain * taps[1], gain * taps[2]],
                feedback: [a[0], a[1], a[2]],
            })
            .collect()
    }
}

/// Fraction of `wc` under which a pole counts as sitting on the jω axis
const AXIS_TOLERANCE: f64 = 1e-9;

/// Design a Butterworth low-pass filter
///
/// # Arguments
/// * `cutoff_hz` - Cutoff frequency in Hz, `0 < cutoff_hz < sample_rate_hz / 2`
/// * `sample_rate_hz` - Sample rate in Hz
/// * `order` - Number of analog poles (>= 1)
///
/// # Returns
/// One section per pole: `order` feedforward terms, `3 * order` feedback terms
pub fn design(cutoff_hz: f64, sample_rate_hz: f64, order: usize) -> Result<FilterCoefficients> {
    design_butterworth(cutoff_hz, sample_rate_hz, order, PassKind::LowPass)
}

/// Design a Butterworth high-pass filter (same poles, zeros at DC)
pub fn design_highpass(
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
) -> Result<FilterCoefficients> {
    design_butterworth(cutoff_hz, sample_rate_hz, order, PassKind::HighPass)
}

/// Design a Butterworth filter of the given kind
///
/// # Algorithm
/// 1. Normalize the cutoff to Nyquist and pre-warp: `wc = tan(π·fc_norm/2)`
/// 2. For k in 0..order place the analog pole `θ_k = π(2k+1)/(2·order)`,
///    `p_k = -wc·cos θ_k + j·wc·sin θ_k`
/// 3. Fold right-half-plane poles into the left half-plane (same magnitude
///    response) and move a pole on the jω axis onto the real axis at `-wc`
/// 4. Map the pole pair `p_k, p_k*` through the bilinear transform
pub fn design_butterworth(
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
    kind: PassKind,
) -> Result<FilterCoefficients> {
    check_sample_rate(sample_rate_hz)?;
    let nyquist = sample_rate_hz / 2.0;

    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 {
        return Err(DspError::InvalidParameter(format!(
            "cutoff must be positive (got {} Hz)",
            cutoff_hz
        )));
    }
    if cutoff_hz >= nyquist {
        return Err(DspError::InvalidParameter(format!(
            "cutoff {} Hz must be below Nyquist ({} Hz)",
            cutoff_hz, nyquist
        )));
    }
    if order == 0 {
        return Err(DspError::InvalidParameter(
            "filter order must be at least 1".into(),
        ));
    }

    let normalized_cutoff = cutoff_hz / nyquist;
    let wc = (PI * normalized_cutoff / 2.0).tan();

    let mut feedforward = Vec::with_capacity(order);
    let mut feedback = Vec::with_capacity(3 * order);

    for k in 0..order {
        let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
        let (re, im) = stable_pole(-wc * theta.cos(), wc * theta.sin(), wc);

        // |p|^2 and the bilinear denominator (1 - re)^2 + im^2
        let magnitude_sq = re * re + im * im;
        let denominator = ((1.0 - re).powi(2) + im * im).max(f64::EPSILON);

        let gain = match kind {
            PassKind::LowPass => magnitude_sq / denominator,
            PassKind::HighPass => 1.0 / denominator,
        };

        feedforward.push(gain);
        feedback.push(1.0);
        feedback.push(2.0 * (magnitude_sq - 1.0) / denominator);
        feedback.push(((1.0 + re).powi(2) + im * im) / denominator);
    }

    log::debug!(
        "Designed order-{} Butterworth {:?} at {:.3} Hz (fs = {} Hz, wc = {:.6})",
        order,
        kind,
        cutoff_hz,
        sample_rate_hz,
        wc
    );

    let layout = match kind {
        PassKind::LowPass => CoefficientLayout::LowPassSections,
        PassKind::HighPass => CoefficientLayout::HighPassSections,
    };

    Ok(FilterCoefficients {
        feedforward,
        feedback,
        layout,
    })
}

/// Keep an analog pole strictly inside the left half-plane
fn stable_pole(re: f64, im: f64, wc: f64) -> (f64, f64) {
    if re.abs() <= wc * AXIS_TOLERANCE {
        // Undamped pole: use the real pole of the same radius
        (-wc, 0.0)
    } else {
        (-re.abs(), im)
    }
}

/// Complex frequency response H(e^jω) at a frequency in Hz
pub fn frequency_response(coeffs: &FilterCoefficients, freq_hz: f64, sample_rate: f64) -> Complex64 {
    let omega = 2.0 * PI * freq_hz / sample_rate;

    let poly = |taps: &[f64]| -> Complex64 {
        taps.iter()
            .enumerate()
            .map(|(n, &c)| c * Complex64::from_polar(1.0, -omega * n as f64))
            .sum()
    };

    match coeffs.layout() {
        CoefficientLayout::DirectForm => poly(coeffs.feedforward()) / poly(coeffs.feedback()),
        _ => coeffs
            .sections()
            .iter()
            .map(|s| poly(&s.feedforward) / poly(&s.feedback))
            .product(),
    }
}

/// Magnitude response in dB at a frequency in Hz
pub fn magnitude_response_db(coeffs: &FilterCoefficients, freq_hz: f64, sample_rate: f64) -> f64 {
    20.0 * frequency_response(coeffs, freq_hz, sample_rate)
        .norm()
        .max(1e-12)
        .log10()
}
