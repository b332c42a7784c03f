//! Frame-rate gate for feeder ticks

/// Accepts a tick when at least `interval_ms` has passed since the last one
///
/// Timestamps come from the host's frame clock. The first reference point
/// is 0, so a tick at `t >= interval_ms` is accepted immediately.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval_ms: f64,
    last_tick_ms: f64,
}

impl TickScheduler {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_tick_ms: 0.0,
        }
    }

    /// True when a tick is due at `timestamp_ms`; records it as the last tick
    pub fn poll(&mut self, timestamp_ms: f64) -> bool {
        if timestamp_ms - self.last_tick_ms >= self.interval_ms {
            self.last_tick_ms = timestamp_ms;
            true
        } else {
            false
        }
    }

    /// Forget the last tick
    pub fn reset(&mut self) {
        self.last_tick_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gates_by_interval() {
        let mut scheduler = TickScheduler::new(1000.0 / 30.0);

        assert!(!scheduler.poll(10.0));
        assert!(scheduler.poll(34.0));
        assert!(!scheduler.poll(50.0));
        assert!(scheduler.poll(67.5));
        assert!(scheduler.poll(200.0));
    }

    #[test]
    fn test_reset() {
        let mut scheduler = TickScheduler::new(100.0);
        assert!(scheduler.poll(500.0));
        assert!(!scheduler.poll(550.0));

        scheduler.reset();
        assert!(scheduler.poll(550.0));
    }
}
