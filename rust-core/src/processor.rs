//! Signal processor - one owner for the buffer, filter settings and replay
//!
//! Batch analysis runs the Butterworth cascade over the whole buffer; live
//! replay ticks the window feeder with the resonant filter. Both read the
//! same filter parameters, so a change applies to whichever runs next.

use crate::analysis::{InstantaneousAnalyzer, Metrics};
use crate::config::{EngineConfig, FilterParams};
use crate::error::Result;
use crate::filters::{BandpassCoefficients, FilterEngine, FilterStrategy};
use crate::signal::{from_pairs, from_values, Sample};
use crate::spectrum::{SpectrumEstimator, SpectrumPoint};
use crate::stream::{FeederPhase, StreamState, StreamingWindowFeeder, TickScheduler};
use serde::Serialize;

/// Results of a full-buffer analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResults {
    /// Buffer with `filtered` from the band-pass cascade
    pub samples: Vec<Sample>,

    pub metrics: Metrics,

    /// Display spectrum of the buffer
    pub spectrum: Vec<SpectrumPoint>,
}

/// One live replay frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Resonant-filtered window
    pub window: Vec<Sample>,

    pub metrics: Metrics,

    /// Display spectrum of the window (empty below 512 samples)
    pub spectrum: Vec<SpectrumPoint>,
}

/// Buffer owner and analysis front end
pub struct SignalProcessor {
    config: EngineConfig,
    params: FilterParams,
    bandpass: BandpassCoefficients,
    samples: Vec<Sample>,
    filter_engine: FilterEngine,
    analyzer: InstantaneousAnalyzer,
    estimator: SpectrumEstimator,
    feeder: StreamingWindowFeeder,
    state: StreamState,
    scheduler: TickScheduler,
}

impl SignalProcessor {
    /// Create a processor from a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let filter_engine = FilterEngine::new(config.sample_rate, config.filter_order)?;
        let bandpass = filter_engine.design_bandpass(&config.filter.bandpass)?;
        let feeder = StreamingWindowFeeder::from_config(&config)?;
        let state = StreamState::new(config.window_size_samples());

        Ok(Self {
            params: config.filter,
            bandpass,
            samples: Vec::new(),
            filter_engine,
            analyzer: InstantaneousAnalyzer::new(config.sample_rate)?,
            estimator: SpectrumEstimator::new(config.sample_rate)?,
            feeder,
            state,
            scheduler: TickScheduler::new(config.tick_interval_ms),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn filter_params(&self) -> FilterParams {
        self.params
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    pub fn phase(&self) -> FeederPhase {
        self.feeder.phase()
    }

    pub fn is_running(&self) -> bool {
        self.feeder.is_running()
    }

    /// Load ordered `(time, value)` pairs
    pub fn load_pairs(&mut self, pairs: &[(f64, f64)]) {
        self.load(from_pairs(pairs));
    }

    /// Load a value series sampled at the configured rate
    pub fn load_values(&mut self, values: &[f64]) {
        self.load(from_values(values, self.config.sample_rate));
    }

    /// Annotate instantaneous frequency and rewind the replay
    fn load(&mut self, mut samples: Vec<Sample>) {
        self.analyzer.annotate(&mut samples);
        self.state = self.feeder.load(samples.clone());
        self.samples = samples;
        self.scheduler.reset();
    }

    /// Replace the band and redesign the cascade; the replay cursor is kept
    pub fn set_filter_params(&mut self, params: FilterParams) -> Result<()> {
        self.bandpass = self.filter_engine.design_bandpass(&params.bandpass)?;
        self.params = params;
        log::debug!(
            "Band set to {} - {} Hz",
            params.bandpass.low,
            params.bandpass.high
        );
        Ok(())
    }

    /// Band-pass the whole buffer and measure it
    pub fn process_batch(&mut self) -> Result<BatchResults> {
        let mut samples = self.samples.clone();
        self.filter_engine
            .filter_samples(&mut samples, &self.bandpass, FilterStrategy::IirCascade);

        let metrics = self.analyzer.analyze(&samples);
        let spectrum = self.estimator.estimate(&samples, &self.params.bandpass)?;

        Ok(BatchResults {
            samples,
            metrics,
            spectrum,
        })
    }

    pub fn start(&mut self) -> Result<()> {
        self.feeder.start()
    }

    pub fn pause(&mut self) {
        self.feeder.pause();
    }

    /// Drop the buffer and rewind
    pub fn clear(&mut self) {
        self.samples.clear();
        self.state = self.feeder.clear();
        self.scheduler.reset();
    }

    /// Advance the replay by one window step
    pub fn tick(&mut self) -> Result<Frame> {
        let tick = self.feeder.tick(self.state, &self.params)?;
        let spectrum = self.estimator.estimate(&tick.window, &self.params.bandpass)?;
        self.state = tick.state;

        Ok(Frame {
            window: tick.window,
            metrics: tick.metrics,
            spectrum,
        })
    }

    /// Tick if running and the frame interval has elapsed at `timestamp_ms`
    pub fn poll(&mut self, timestamp_ms: f64) -> Result<Option<Frame>> {
        if !self.is_running() || !self.scheduler.poll(timestamp_ms) {
            return Ok(None);
        }
        self.tick().map(Some)
    }
}
