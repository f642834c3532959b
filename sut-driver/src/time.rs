//! Model clocks and time sources.
//!
//! This module provides most notably:
//!
//! * [`Clock`]: the opaque anchor held by a system under test for each of its
//!   model clocks, created by
//!   [`TestDriver::reset_time()`](crate::driver::TestDriver::reset_time) and
//!   measured by [`TestDriver::get_value()`](crate::driver::TestDriver::get_value),
//! * [`TimeSource`]: a trait for wall-clock time sources used by the
//!   real-time policy, implemented by [`SystemClock`] and by the manually
//!   driven [`ManualClock`],
//! * [`TimeReader`]: a read handle on the virtual time of a simulated-time
//!   driver, used for instance to timestamp log events.
//!
//! All timestamps are expressed as [`MonotonicTime`] values, whether they
//! refer to wall-clock time or to virtual time.
//!
//! # Examples
//!
//! Measuring a model clock with a manually driven time source:
//!
//! ```
//! use std::time::Duration;
//!
//! use sut_driver::driver::RealTime;
//! use sut_driver::driver::TimePolicy;
//! use sut_driver::time::{ManualClock, MonotonicTime};
//!
//! let wall_clock = ManualClock::new(MonotonicTime::EPOCH);
//!
//! // One model time unit lasts 100ms.
//! let policy = RealTime::with_time_source(100.0, wall_clock.clone());
//!
//! let x = policy.reset_time();
//! wall_clock.advance(Duration::from_millis(250));
//! assert_eq!(policy.get_value(x), 2.5);
//! ```

mod clock;
mod shared_time;

pub use tai_time::MonotonicTime;

pub use clock::{Clock, ManualClock, SystemClock, TimeSource};
pub(crate) use shared_time::SharedTime;
pub use shared_time::TimeReader;
