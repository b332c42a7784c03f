//! Python bindings for Butterworth design and filtering

use crate::config::Band;
use crate::filters::{self, FilterCoefficients, FilterEngine};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

/// Designed Butterworth coefficient set exposed to Python
#[pyclass(name = "FilterDesigner")]
pub struct PyFilterDesigner {
    coeffs: FilterCoefficients,
    sample_rate: f64,
}

#[pymethods]
impl PyFilterDesigner {
    /// Design a low-pass Butterworth filter
    ///
    /// Args:
    ///     cutoff_hz: Cutoff frequency in Hz
    ///     sample_rate: Sample rate in Hz
    ///     order: Filter order (number of poles)
    #[staticmethod]
    #[pyo3(signature = (cutoff_hz, sample_rate=1000.0, order=4))]
    fn lowpass(cutoff_hz: f64, sample_rate: f64, order: usize) -> PyResult<Self> {
        Ok(Self {
            coeffs: filters::design(cutoff_hz, sample_rate, order)?,
            sample_rate,
        })
    }

    /// Design a high-pass Butterworth filter
    #[staticmethod]
    #[pyo3(signature = (cutoff_hz, sample_rate=1000.0, order=4))]
    fn highpass(cutoff_hz: f64, sample_rate: f64, order: usize) -> PyResult<Self> {
        Ok(Self {
            coeffs: filters::design_highpass(cutoff_hz, sample_rate, order)?,
            sample_rate,
        })
    }

    /// Filter a block of samples (zero initial history)
    fn apply<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let input = signal.as_array().to_vec();
        Ok(PyArray1::from_vec(py, filters::apply(&input, &self.coeffs)))
    }

    /// Section gains, one per pole
    fn feedforward<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.coeffs.feedforward())
    }

    /// Section feedback terms `[1, a1, a2]`, flattened in pole order
    fn feedback<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.coeffs.feedback())
    }

    fn num_sections(&self) -> usize {
        self.coeffs.num_sections()
    }

    /// Magnitude response in dB at `freq_hz`
    fn magnitude_db(&self, freq_hz: f64) -> f64 {
        filters::design::magnitude_response_db(&self.coeffs, freq_hz, self.sample_rate)
    }
}

/// Band-pass a signal: high-pass at `low`, then low-pass at `high`
#[pyfunction]
#[pyo3(signature = (signal, low, high, sample_rate=1000.0, order=4))]
pub fn bandpass<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    low: f64,
    high: f64,
    sample_rate: f64,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let engine = FilterEngine::new(sample_rate, order)?;
    let output = engine.bandpass(&signal.as_array().to_vec(), &Band::new(low, high))?;
    Ok(PyArray1::from_vec(py, output))
}

/// Low-pass a signal
#[pyfunction]
#[pyo3(signature = (signal, cutoff_hz, sample_rate=1000.0, order=4))]
pub fn lowpass<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    cutoff_hz: f64,
    sample_rate: f64,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let engine = FilterEngine::new(sample_rate, order)?;
    let output = engine.lowpass(&signal.as_array().to_vec(), cutoff_hz)?;
    Ok(PyArray1::from_vec(py, output))
}

/// High-pass a signal as `signal - lowpass(signal)`
#[pyfunction]
#[pyo3(signature = (signal, cutoff_hz, sample_rate=1000.0, order=4))]
pub fn highpass<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    cutoff_hz: f64,
    sample_rate: f64,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let engine = FilterEngine::new(sample_rate, order)?;
    let output = engine.highpass(&signal.as_array().to_vec(), cutoff_hz)?;
    Ok(PyArray1::from_vec(py, output))
}
