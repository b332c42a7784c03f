//! Python bindings for the signal processor

use crate::analysis::Metrics;
use crate::config::{EngineConfig, FilterParams};
use crate::processor::SignalProcessor;
use crate::signal::{filtered, originals, Sample};
use crate::spectrum::SpectrumPoint;
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::path::Path;

/// Signal processor exposed to Python
///
/// Ticks are driven by the caller's frame clock through `poll`.
#[pyclass(name = "SignalProcessor", unsendable)]
pub struct PySignalProcessor {
    processor: SignalProcessor,
}

/// Pack samples, metrics and spectrum into a result dictionary
fn results_dict<'py>(
    py: Python<'py>,
    samples: &[Sample],
    metrics: &Metrics,
    spectrum: &[SpectrumPoint],
) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);

    let times: Vec<f64> = samples.iter().map(|s| s.time).collect();
    dict.set_item("time", PyArray1::from_vec(py, times))?;
    dict.set_item("original", PyArray1::from_vec(py, originals(samples)))?;
    dict.set_item("filtered", PyArray1::from_vec(py, filtered(samples)))?;

    dict.set_item("snr", metrics.snr)?;
    dict.set_item("quality", metrics.quality)?;
    dict.set_item("frequency", metrics.frequency)?;

    let frequencies: Vec<f64> = spectrum.iter().map(|p| p.frequency).collect();
    let magnitudes: Vec<f64> = spectrum.iter().map(|p| p.magnitude).collect();
    dict.set_item("spectrum_frequencies", PyArray1::from_vec(py, frequencies))?;
    dict.set_item("spectrum_magnitude", PyArray1::from_vec(py, magnitudes))?;

    Ok(dict)
}

#[pymethods]
impl PySignalProcessor {
    /// Create a processor
    ///
    /// Args:
    ///     config_path: Optional TOML configuration file
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<&str>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => EngineConfig::load(Path::new(path))?,
            None => EngineConfig::default(),
        };
        Ok(Self {
            processor: SignalProcessor::new(config)?,
        })
    }

    /// Load values sampled at the configured rate
    fn load_values(&mut self, values: PyReadonlyArray1<f64>) {
        self.processor.load_values(&values.as_array().to_vec());
    }

    /// Load parallel time and value arrays
    fn load_pairs(&mut self, times: PyReadonlyArray1<f64>, values: PyReadonlyArray1<f64>) {
        let pairs: Vec<(f64, f64)> = times
            .as_array()
            .iter()
            .zip(values.as_array().iter())
            .map(|(&t, &v)| (t, v))
            .collect();
        self.processor.load_pairs(&pairs);
    }

    /// Set the pass band in Hz
    fn set_band(&mut self, low: f64, high: f64) -> PyResult<()> {
        Ok(self
            .processor
            .set_filter_params(FilterParams::bandpass(low, high))?)
    }

    /// Band-pass and analyze the whole buffer
    fn process_batch<'py>(&mut self, py: Python<'py>) -> PyResult<&'py PyDict> {
        let results = self.processor.process_batch()?;
        results_dict(py, &results.samples, &results.metrics, &results.spectrum)
    }

    fn start(&mut self) -> PyResult<()> {
        Ok(self.processor.start()?)
    }

    fn pause(&mut self) {
        self.processor.pause();
    }

    fn clear(&mut self) {
        self.processor.clear();
    }

    fn is_running(&self) -> bool {
        self.processor.is_running()
    }

    /// Current replay cursor
    fn cursor(&self) -> usize {
        self.processor.state().cursor
    }

    /// Advance the replay by one step and return the frame
    fn tick<'py>(&mut self, py: Python<'py>) -> PyResult<&'py PyDict> {
        let frame = self.processor.tick()?;
        results_dict(py, &frame.window, &frame.metrics, &frame.spectrum)
    }

    /// Frame for `timestamp_ms` if one is due, else None
    fn poll<'py>(&mut self, py: Python<'py>, timestamp_ms: f64) -> PyResult<Option<&'py PyDict>> {
        match self.processor.poll(timestamp_ms)? {
            Some(frame) => results_dict(py, &frame.window, &frame.metrics, &frame.spectrum).map(Some),
            None => Ok(None),
        }
    }
}
