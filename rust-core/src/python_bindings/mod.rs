//! PyO3 bindings for Python integration

use crate::error::DspError;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

mod filter_bindings;
mod processor_bindings;
mod spectrum_bindings;

impl From<DspError> for PyErr {
    fn from(err: DspError) -> Self {
        match err {
            DspError::InvalidParameter(_) | DspError::Config(_) => {
                PyValueError::new_err(err.to_string())
            }
            DspError::InvalidState { .. } | DspError::Transform(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
        }
    }
}

/// Python module definition
#[pymodule]
fn signal_suite(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<filter_bindings::PyFilterDesigner>()?;
    m.add_class::<spectrum_bindings::PySpectrumEstimator>()?;
    m.add_class::<processor_bindings::PySignalProcessor>()?;

    m.add_function(wrap_pyfunction!(filter_bindings::bandpass, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::lowpass, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::highpass, m)?)?;

    Ok(())
}
