//! Support for structured logging.
//!
//! # Overview
//!
//! The driver emits [`tracing`] events: `trace` for inputs, outputs and
//! steps, `debug` for delay windows and the end of the input, `info` at
//! initialization and `warn` on input failures.
//!
//! The standard output carries the test protocol, so log events must never be
//! written there. The [`init()`] and [`init_with_virtual_time()`] helpers
//! install a [`tracing_subscriber::fmt`][mod@tracing_subscriber::fmt]
//! subscriber writing to the standard error, filtered with the `RUST_LOG`
//! environment variable:
//!
//! ```text
//! $ RUST_LOG=sut_driver=debug car_alarm --simulate
//! ```
//!
//! # Virtual timestamps
//!
//! When time is simulated, it is often more useful to know the virtual time at
//! which an event occurred than the wall-clock time. The [`VirtualTime`]
//! timer appends the virtual time to the wall-clock timestamp:
//!
//! ```text
//! 2024-09-10T14:39:24.670921Z [1970-01-01 00:00:00.020] DEBUG sut_driver::driver::simulated_time: delay window closed delayed=20ms
//! ```

use std::error::Error;
use std::fmt;
use std::io;

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::EnvFilter;

use crate::time::TimeReader;

/// A timer that can be used in conjunction with the
/// [`tracing-subscriber`][tracing_subscriber] crate to stamp events with the
/// virtual time of a simulated-time driver on top of the wall-clock time.
///
/// See the [module-level documentation][crate::logging] for more details.
pub struct VirtualTime<T = SystemTime> {
    reader: TimeReader,
    sys_timer: T,
}

impl VirtualTime<SystemTime> {
    /// Constructs a timer prepending the [`SystemTime`] timestamp.
    pub fn new(reader: TimeReader) -> Self {
        Self::with_custom_timer(reader, SystemTime)
    }
}

impl<T: FormatTime> VirtualTime<T> {
    /// Constructs a timer prepending a timestamp generated with the provided
    /// timer.
    pub fn with_custom_timer(reader: TimeReader, sys_timer: T) -> Self {
        Self { reader, sys_timer }
    }
}

impl<T: FormatTime> FormatTime for VirtualTime<T> {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        self.sys_timer.format_time(w)?;

        write!(w, " [{:.3}]", self.reader.read())
    }
}

impl<T> fmt::Debug for VirtualTime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualTime")
            .field("reader", &self.reader)
            .finish_non_exhaustive()
    }
}

/// Installs a global subscriber logging to the standard error.
///
/// An error is returned if a global subscriber was already installed.
pub fn init() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
}

/// Installs a global subscriber logging to the standard error, stamping
/// events with the virtual time in addition to the wall-clock time.
///
/// An error is returned if a global subscriber was already installed.
pub fn init_with_virtual_time(
    reader: TimeReader,
) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .with_timer(VirtualTime::new(reader))
        .try_init()
}
