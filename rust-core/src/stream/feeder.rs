//! Windowed replay of a loaded buffer
//!
//! The feeder owns the buffer and its phase; the read cursor lives in a
//! [`StreamState`] value the caller passes into every tick and gets back
//! advanced.

use crate::analysis::Metrics;
use crate::config::{EngineConfig, FilterParams};
use crate::error::{check_sample_rate, DspError, Result};
use crate::filters::resonant;
use crate::signal::Sample;
use serde::{Deserialize, Serialize};

/// Cursor advance per tick, as a fraction of the window (1/30)
pub const TICKS_PER_WINDOW: usize = 30;

/// Lifecycle of the feeder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeederPhase {
    /// No buffer loaded
    Idle,
    /// Buffer loaded, not advancing
    Ready,
    /// Advancing on every tick
    Running,
}

/// Replay position carried between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamState {
    /// Index of the first sample of the next window
    pub cursor: usize,

    /// Samples per window
    pub window_size_samples: usize,
}

impl StreamState {
    pub fn new(window_size_samples: usize) -> Self {
        Self {
            cursor: 0,
            window_size_samples,
        }
    }

    /// Cursor step per tick
    pub fn advance_step(&self) -> usize {
        self.window_size_samples / TICKS_PER_WINDOW
    }
}

/// Output of one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// State to pass into the next tick
    pub state: StreamState,

    /// Filtered window, in replay order
    pub window: Vec<Sample>,

    /// Metrics over `window`
    pub metrics: Metrics,
}

/// Replays a buffer as a sliding, wrapping window
#[derive(Debug, Clone)]
pub struct StreamingWindowFeeder {
    buffer: Vec<Sample>,
    phase: FeederPhase,
    sample_rate: f64,
    window_size_samples: usize,
}

impl StreamingWindowFeeder {
    /// Create an idle feeder
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz (band validation)
    /// * `window_size_samples` - Window length, at least 1
    pub fn new(sample_rate: f64, window_size_samples: usize) -> Result<Self> {
        check_sample_rate(sample_rate)?;
        if window_size_samples == 0 {
            return Err(DspError::InvalidParameter(
                "window must hold at least one sample".into(),
            ));
        }

        Ok(Self {
            buffer: Vec::new(),
            phase: FeederPhase::Idle,
            sample_rate,
            window_size_samples,
        })
    }

    /// Create an idle feeder sized by the configured window duration
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Self::new(config.sample_rate, config.window_size_samples())
    }

    pub fn phase(&self) -> FeederPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == FeederPhase::Running
    }

    pub fn buffer(&self) -> &[Sample] {
        &self.buffer
    }

    /// Replace the buffer and rewind
    ///
    /// Ready when `buffer` is nonempty, Idle otherwise.
    pub fn load(&mut self, buffer: Vec<Sample>) -> StreamState {
        self.phase = if buffer.is_empty() {
            FeederPhase::Idle
        } else {
            FeederPhase::Ready
        };
        self.buffer = buffer;
        log::info!(
            "Feeder loaded {} samples ({:?})",
            self.buffer.len(),
            self.phase
        );
        StreamState::new(self.window_size_samples)
    }

    /// Begin advancing; requires a loaded buffer
    pub fn start(&mut self) -> Result<()> {
        match self.phase {
            FeederPhase::Idle => {
                log::warn!("Start rejected: no buffer loaded");
                Err(DspError::InvalidState {
                    expected: FeederPhase::Ready,
                    actual: FeederPhase::Idle,
                })
            }
            FeederPhase::Ready => {
                self.phase = FeederPhase::Running;
                log::info!("Feeder running");
                Ok(())
            }
            FeederPhase::Running => Ok(()),
        }
    }

    /// Stop advancing; the caller keeps its state
    pub fn pause(&mut self) {
        if self.phase == FeederPhase::Running {
            self.phase = FeederPhase::Ready;
            log::info!("Feeder paused");
        }
    }

    /// Drop the buffer and rewind
    pub fn clear(&mut self) -> StreamState {
        self.buffer.clear();
        self.phase = FeederPhase::Idle;
        log::info!("Feeder cleared");
        StreamState::new(self.window_size_samples)
    }

    /// Produce the next window and the advanced state
    ///
    /// The window starts at `state.cursor` and wraps to the start of the
    /// buffer; it is never longer than the buffer. Each sample is filtered
    /// by the resonant response at its own instantaneous frequency.
    pub fn tick(&self, state: StreamState, params: &FilterParams) -> Result<Tick> {
        if self.phase != FeederPhase::Running {
            log::warn!("Tick rejected in {:?}", self.phase);
            return Err(DspError::InvalidState {
                expected: FeederPhase::Running,
                actual: self.phase,
            });
        }
        params.validate(self.sample_rate)?;

        let len = self.buffer.len();
        let start = state.cursor % len;
        let count = state.window_size_samples.min(len);

        let mut window: Vec<Sample> = self.buffer[start..]
            .iter()
            .chain(self.buffer[..start].iter())
            .take(count)
            .copied()
            .collect();
        resonant::filter_in_place(&mut window, &params.bandpass);

        let metrics = Metrics::compute(&window);
        let next = StreamState {
            cursor: (start + state.advance_step()) % len,
            ..state
        };
        log::trace!("Tick at {} -> {}", start, next.cursor);

        Ok(Tick {
            state: next,
            window,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::from_values;

    fn ramp(len: usize) -> Vec<Sample> {
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        from_values(&values, 1000.0)
    }

    fn running_feeder(window: usize, buffer: Vec<Sample>) -> (StreamingWindowFeeder, StreamState) {
        let mut feeder = StreamingWindowFeeder::new(1000.0, window).unwrap();
        let state = feeder.load(buffer);
        feeder.start().unwrap();
        (feeder, state)
    }

    #[test]
    fn test_phase_transitions() {
        let mut feeder = StreamingWindowFeeder::new(1000.0, 4).unwrap();
        assert_eq!(feeder.phase(), FeederPhase::Idle);
        assert!(feeder.start().is_err());

        let state = feeder.load(ramp(10));
        assert_eq!(state, StreamState::new(4));
        assert_eq!(feeder.phase(), FeederPhase::Ready);

        feeder.start().unwrap();
        assert!(feeder.is_running());

        feeder.pause();
        assert_eq!(feeder.phase(), FeederPhase::Ready);

        feeder.start().unwrap();
        let state = feeder.clear();
        assert_eq!(state.cursor, 0);
        assert_eq!(feeder.phase(), FeederPhase::Idle);
        assert!(feeder.buffer().is_empty());
    }

    #[test]
    fn test_load_empty_stays_idle() {
        let mut feeder = StreamingWindowFeeder::new(1000.0, 4).unwrap();
        feeder.load(Vec::new());
        assert_eq!(feeder.phase(), FeederPhase::Idle);
    }

    #[test]
    fn test_tick_requires_running() {
        let mut feeder = StreamingWindowFeeder::new(1000.0, 4).unwrap();
        let state = feeder.load(ramp(10));

        let err = feeder.tick(state, &FilterParams::default()).unwrap_err();
        assert_eq!(
            err,
            DspError::InvalidState {
                expected: FeederPhase::Running,
                actual: FeederPhase::Ready,
            }
        );
    }

    #[test]
    fn test_window_wraps_around() {
        let (feeder, state) = running_feeder(4, ramp(10));
        let state = StreamState { cursor: 8, ..state };

        let tick = feeder.tick(state, &FilterParams::default()).unwrap();
        let originals: Vec<f64> = tick.window.iter().map(|s| s.original).collect();
        assert_eq!(originals, vec![8.0, 9.0, 0.0, 1.0]);
    }

    #[test]
    fn test_window_capped_at_buffer_length() {
        let (feeder, state) = running_feeder(50, ramp(10));
        let state = StreamState { cursor: 3, ..state };

        let tick = feeder.tick(state, &FilterParams::default()).unwrap();
        assert_eq!(tick.window.len(), 10);
        assert_eq!(tick.window[0].original, 3.0);
        assert_eq!(tick.window[9].original, 2.0);

        // 50 / 30 = 1
        assert_eq!(tick.state.cursor, 4);
    }

    #[test]
    fn test_cursor_advances_and_wraps() {
        let (feeder, mut state) = running_feeder(1000, ramp(2500));
        let params = FilterParams::default();

        for expected in [33, 66, 99] {
            state = feeder.tick(state, &params).unwrap().state;
            assert_eq!(state.cursor, expected);
        }

        state.cursor = 2490;
        state = feeder.tick(state, &params).unwrap().state;
        assert_eq!(state.cursor, 23);
    }

    #[test]
    fn test_small_window_does_not_advance() {
        let (feeder, state) = running_feeder(4, ramp(10));
        let tick = feeder.tick(state, &FilterParams::default()).unwrap();
        assert_eq!(tick.state.cursor, 0);
    }

    #[test]
    fn test_tick_filters_and_measures_window() {
        let mut buffer = ramp(10);
        for sample in buffer.iter_mut() {
            sample.instantaneous_frequency = 9.55;
        }
        let (feeder, state) = running_feeder(4, buffer);

        let tick = feeder.tick(state, &FilterParams::default()).unwrap();

        // At the band center the resonant gain is 1
        for sample in &tick.window {
            assert!((sample.filtered - sample.original).abs() < 1e-12);
        }
        assert!((tick.metrics.quality - 75.0).abs() < 1e-9);
        assert_eq!(tick.metrics.snr, 0.0);
    }

    #[test]
    fn test_tick_rejects_invalid_band() {
        let (feeder, state) = running_feeder(4, ramp(10));
        assert!(feeder.tick(state, &FilterParams::bandpass(12.0, 8.0)).is_err());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(StreamingWindowFeeder::new(1000.0, 0).is_err());
        assert!(StreamingWindowFeeder::new(0.0, 4).is_err());
        assert!(StreamingWindowFeeder::from_config(&EngineConfig::default()).is_ok());
    }
}
