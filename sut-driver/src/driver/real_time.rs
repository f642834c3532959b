use std::fmt;
use std::time::Duration;

use crate::error::ExecutionError;
use crate::time::{Clock, SystemClock, TimeSource};

use super::{DriverIo, TimePolicy};

/// A [`TimePolicy`] testing against wall-clock time.
///
/// Steps are started every quarter of a model time unit, which lets the
/// system under test react to inputs and timeouts with a bounded latency
/// without busy-looping.
pub struct RealTime {
    time_unit: f64,
    poll_period: Duration,
    time_source: Box<dyn TimeSource>,
}

impl RealTime {
    /// Creates a real-time policy based on the system clock, where a model
    /// time unit lasts `time_unit` milliseconds.
    pub fn new(time_unit: f64) -> Self {
        Self::with_time_source(time_unit, SystemClock::new())
    }

    /// Creates a real-time policy based on the provided time source, where a
    /// model time unit lasts `time_unit` milliseconds.
    pub fn with_time_source(time_unit: f64, time_source: impl TimeSource + 'static) -> Self {
        Self::from_boxed(time_unit, Box::new(time_source))
    }

    pub(crate) fn from_boxed(time_unit: f64, time_source: Box<dyn TimeSource>) -> Self {
        // Whole milliseconds only, rounded down.
        let poll_period = Duration::from_millis(time_unit as u64 / 4);

        Self {
            time_unit,
            poll_period,
            time_source,
        }
    }

    /// Returns the wall-clock delay between the end of a step and the
    /// beginning of the next one.
    pub fn poll_period(&self) -> Duration {
        self.poll_period
    }
}

impl TimePolicy for RealTime {
    /// Returns immediately.
    fn start(&mut self, _: &mut DriverIo) -> Result<(), ExecutionError> {
        Ok(())
    }

    /// Sleeps for the poll period.
    fn on_step_done(&mut self, _: &mut DriverIo) -> Result<(), ExecutionError> {
        self.time_source.sleep(self.poll_period);

        Ok(())
    }

    /// Returns the whole milliseconds elapsed since `clock` was reset, divided
    /// by the time unit.
    fn get_value(&self, clock: Clock) -> f64 {
        let elapsed = clock.elapsed_until(self.time_source.now());

        elapsed.as_millis() as f64 / self.time_unit
    }

    fn reset_time(&self) -> Clock {
        Clock::at(self.time_source.now())
    }
}

impl fmt::Debug for RealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealTime")
            .field("time_unit", &self.time_unit)
            .field("poll_period", &self.poll_period)
            .finish_non_exhaustive()
    }
}
