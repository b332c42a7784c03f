//! Resonant scalar band filter
//!
//! A memoryless per-sample gain `1 / (1 + ((f − center) / (bw/2))²)` where
//! `f` is the sample's own instantaneous frequency. Cheap enough for the
//! live replay path; not equivalent to the Butterworth cascade.

use crate::config::Band;
use crate::signal::Sample;

/// Gain of the resonant response at `freq`
///
/// A zero-width band passes its center frequency and blocks everything else.
#[inline]
pub fn response(freq: f64, band: &Band) -> f64 {
    let half_width = band.bandwidth() / 2.0;
    if half_width <= 0.0 {
        return if freq == band.center() { 1.0 } else { 0.0 };
    }

    let normalized = (freq - band.center()) / half_width;
    1.0 / (1.0 + normalized * normalized)
}

/// Filter one value given its instantaneous frequency
#[inline]
pub fn filter_sample(original: f64, freq: f64, band: &Band) -> f64 {
    original * response(freq, band)
}

/// Set `filtered` on every sample from its own instantaneous frequency
pub fn filter_in_place(samples: &mut [Sample], band: &Band) {
    for sample in samples.iter_mut() {
        sample.filtered = filter_sample(sample.original, sample.instantaneous_frequency, band);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_at_center_half_at_edges() {
        let band = Band::new(8.0, 12.0);
        assert!((response(10.0, &band) - 1.0).abs() < 1e-12);
        assert!((response(8.0, &band) - 0.5).abs() < 1e-12);
        assert!((response(12.0, &band) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_response_falls_off_symmetrically() {
        let band = Band::new(8.0, 12.0);
        assert!((response(6.0, &band) - response(14.0, &band)).abs() < 1e-12);
        assert!(response(20.0, &band) < response(14.0, &band));
        assert!((response(14.0, &band) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_zero_bandwidth_is_defined() {
        let band = Band::new(10.0, 10.0);
        assert_eq!(response(10.0, &band), 1.0);
        assert_eq!(response(10.5, &band), 0.0);
        assert!(filter_sample(3.0, 9.0, &band).is_finite());
    }

    #[test]
    fn test_filter_in_place() {
        let band = Band::new(8.0, 12.0);
        let mut samples = vec![Sample::new(0.0, 2.0), Sample::new(0.001, -4.0)];
        samples[0].instantaneous_frequency = 10.0;
        samples[1].instantaneous_frequency = 12.0;

        filter_in_place(&mut samples, &band);

        assert!((samples[0].filtered - 2.0).abs() < 1e-12);
        assert!((samples[1].filtered + 2.0).abs() < 1e-12);
        assert_eq!(samples[1].original, -4.0);
    }
}
