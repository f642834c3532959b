use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::ExecutionError;
use crate::input::{InputBuffer, Line};
use crate::time::{Clock, MonotonicTime, SharedTime, TimeReader};

use super::{DriverIo, TimePolicy};

/// Virtual time elapsed between two consecutive steps of a delay window.
const TICK: Duration = Duration::from_millis(1);

/// A [`TimePolicy`] simulating time.
///
/// Virtual time only advances when the test environment allows it with a
/// `Delay: <N>` directive, which opens a delay window of `N` virtual
/// milliseconds. Within a window, time advances by one millisecond after each
/// step so that no clock threshold of the system under test can be skipped.
///
/// The window closes as soon as the system under test writes an output or
/// when the requested delay has fully elapsed, whichever comes first. The
/// policy then writes `Delayed: <M>`, where `M` is the delay actually
/// consumed in milliseconds, and waits for the next directive before
/// starting another step.
///
/// With simulated time, one model time unit lasts one virtual millisecond.
pub struct SimulatedTime {
    time: MonotonicTime,
    delay_start: MonotonicTime,
    max_time: MonotonicTime,
    shared_time: SharedTime,
}

impl SimulatedTime {
    /// Creates a simulated-time policy starting at [`MonotonicTime::EPOCH`].
    pub fn new() -> Self {
        Self::with_start_time(MonotonicTime::EPOCH)
    }

    /// Creates a simulated-time policy starting at the specified time.
    pub fn with_start_time(start_time: MonotonicTime) -> Self {
        Self::with_shared_time(SharedTime::new(start_time))
    }

    pub(crate) fn with_shared_time(shared_time: SharedTime) -> Self {
        let time = shared_time.reader().read();

        Self {
            time,
            delay_start: time,
            max_time: time,
            shared_time,
        }
    }

    /// Returns the current virtual time.
    pub fn time(&self) -> MonotonicTime {
        self.time
    }

    /// Waits for a delay directive and opens the corresponding delay window.
    ///
    /// All buffered directives are taken out of the input buffer regardless
    /// of their position, and the window is sized by the earliest one; the
    /// order of the remaining lines is unchanged.
    fn wait_for_delay(&mut self, input: &InputBuffer) -> Result<(), ExecutionError> {
        loop {
            let directives = input.remove_matching(Line::is_delay_directive);
            if let Some(directive) = directives.first() {
                if directives.len() > 1 {
                    debug!(
                        discarded = directives.len() - 1,
                        "superseded delay directives discarded"
                    );
                }
                let delay = directive.delay()?;
                self.delay_start = self.time;
                self.max_time = self.time + delay;
                debug!(delay = ?delay, "delay window opened");

                return Ok(());
            }

            // The listener fires at once if a directive slipped in since the
            // buffer was searched, and is dropped if the input was closed.
            let (waker, waiter) = mpsc::sync_channel(1);
            input.register_one_shot(Line::is_delay_directive, move || {
                let _ = waker.try_send(());
            });
            if waiter.recv().is_err() {
                return Err(ExecutionError::InputClosed);
            }
        }
    }

    fn advance(&mut self) {
        self.time = self.time + TICK;
        self.shared_time.write(self.time);
    }
}

impl Default for SimulatedTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePolicy for SimulatedTime {
    /// Waits for the first delay directive.
    fn start(&mut self, io: &mut DriverIo) -> Result<(), ExecutionError> {
        self.wait_for_delay(io.input())
    }

    /// Closes the delay window if an output was written or if the requested
    /// delay has elapsed, otherwise advances time by one millisecond.
    fn on_step_done(&mut self, io: &mut DriverIo) -> Result<(), ExecutionError> {
        if io.has_outputted() || self.time >= self.max_time {
            let delayed = self.time.duration_since(self.delay_start);
            io.write(&format!("Delayed: {}", delayed.as_millis()))?;
            io.clear_outputted();
            debug!(delayed = ?delayed, "delay window closed");

            return self.wait_for_delay(io.input());
        }

        self.advance();
        trace!(time = %self.time, "virtual time advanced");

        Ok(())
    }

    /// Returns the whole virtual milliseconds elapsed since `clock` was reset.
    fn get_value(&self, clock: Clock) -> f64 {
        clock.elapsed_until(self.time).as_millis() as f64
    }

    fn reset_time(&self) -> Clock {
        Clock::at(self.time)
    }

    fn time_reader(&self) -> Option<TimeReader> {
        Some(self.shared_time.reader())
    }
}

impl fmt::Debug for SimulatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedTime")
            .field("time", &self.time)
            .field("delay_start", &self.delay_start)
            .field("max_time", &self.max_time)
            .finish_non_exhaustive()
    }
}
