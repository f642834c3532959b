use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tai_time::MonotonicClock;

use crate::time::MonotonicTime;

/// An anchor from which the value of a model clock is measured.
///
/// A clock is reset by replacing it with a fresh value obtained from
/// [`TestDriver::reset_time()`](crate::driver::TestDriver::reset_time), and
/// its value in model time units is read with
/// [`TestDriver::get_value()`](crate::driver::TestDriver::get_value). The
/// driver never keeps track of the clocks it hands out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clock(MonotonicTime);

impl Clock {
    pub(crate) fn at(time: MonotonicTime) -> Self {
        Self(time)
    }

    /// Returns the duration elapsed between the anchor and `now`, or zero if
    /// `now` precedes the anchor.
    pub(crate) fn elapsed_until(self, now: MonotonicTime) -> Duration {
        if now > self.0 {
            now.duration_since(self.0)
        } else {
            Duration::ZERO
        }
    }
}

/// A source of wall-clock time.
///
/// This trait abstracts over the system's monotonic clock and over manually
/// driven clocks, which make it possible to test real-time behavior without
/// depending on the scheduler.
pub trait TimeSource: Send {
    /// Returns the current time.
    fn now(&self) -> MonotonicTime;

    /// Blocks for the specified duration.
    fn sleep(&mut self, duration: Duration);
}

/// A [`TimeSource`] based on the system's monotonic clock.
#[derive(Copy, Clone, Debug)]
pub struct SystemClock(MonotonicClock);

impl SystemClock {
    /// Constructs a `SystemClock` that reads [`MonotonicTime::EPOCH`] now.
    pub fn new() -> Self {
        Self::from_instant(MonotonicTime::EPOCH, Instant::now())
    }

    /// Constructs a `SystemClock` with an offset between its time and the
    /// wall clock specified by a timestamp matched to an [`Instant`].
    ///
    /// The provided reference time may lie in the past or in the future.
    pub fn from_instant(time_ref: MonotonicTime, wall_clock_ref: Instant) -> Self {
        Self(MonotonicClock::init_from_instant(time_ref, wall_clock_ref))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> MonotonicTime {
        self.0.now()
    }

    /// Blocks for the specified duration, spinning for the last fraction of
    /// the sleep to achieve sub-millisecond accuracy.
    fn sleep(&mut self, duration: Duration) {
        spin_sleep::sleep(duration);
    }
}

/// A [`TimeSource`] that only advances when told to.
///
/// Sleeping on a `ManualClock` returns immediately after advancing the clock
/// by the requested duration. Clones share the same time, so a clone can be
/// kept to advance the time seen by a driver.
#[derive(Clone, Debug)]
pub struct ManualClock {
    time: Arc<Mutex<MonotonicTime>>,
}

impl ManualClock {
    /// Constructs a `ManualClock` reading the specified time.
    pub fn new(time: MonotonicTime) -> Self {
        Self {
            time: Arc::new(Mutex::new(time)),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
        *time = *time + duration;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> MonotonicTime {
        *self.time.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}
