//! Python bindings for spectrum estimation

use crate::config::Band;
use crate::signal::from_values;
use crate::spectrum::SpectrumEstimator;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

/// Display spectrum estimator exposed to Python
#[pyclass(name = "SpectrumEstimator")]
pub struct PySpectrumEstimator {
    estimator: SpectrumEstimator,
}

#[pymethods]
impl PySpectrumEstimator {
    /// Create a new spectrum estimator
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    #[new]
    #[pyo3(signature = (sample_rate=1000.0))]
    fn new(sample_rate: f64) -> PyResult<Self> {
        Ok(Self {
            estimator: SpectrumEstimator::new(sample_rate)?,
        })
    }

    /// Estimate the 0-30 Hz display spectrum
    ///
    /// Args:
    ///     signal: Values sampled at the estimator's rate, starting at t = 0
    ///     low: Lower band edge in Hz
    ///     high: Upper band edge in Hz
    ///
    /// Returns:
    ///     Tuple of (frequencies, magnitudes); both empty below 512 samples
    #[pyo3(signature = (signal, low=7.6, high=11.5))]
    fn estimate<'py>(
        &mut self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
        low: f64,
        high: f64,
    ) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let samples = from_values(
            &signal.as_array().to_vec(),
            self.estimator.sample_rate(),
        );
        let points = self.estimator.estimate(&samples, &Band::new(low, high))?;

        let frequencies: Vec<f64> = points.iter().map(|p| p.frequency).collect();
        let magnitudes: Vec<f64> = points.iter().map(|p| p.magnitude).collect();

        Ok((
            PyArray1::from_vec(py, frequencies),
            PyArray1::from_vec(py, magnitudes),
        ))
    }
}
