use std::fmt;
use std::io::BufRead;

use tracing::info;

use crate::error::InitError;
use crate::input::{InputBuffer, LineSource};
use crate::output::{OutputSink, StdoutSink};
use crate::time::{MonotonicTime, SharedTime, SystemClock, TimeReader, TimeSource};

use super::{DriverIo, RealTime, SimulatedTime, TestDriver, TimePolicy};

/// Where the driver takes its input lines from.
enum InputChannel {
    Stdin,
    Reader(Box<dyn BufRead + Send>),
    Buffer(InputBuffer),
}

/// Builder for a [`TestDriver`].
///
/// By default, the driver reads from the standard input, writes to the
/// standard output and tests in real time with a time unit of
/// [`DriverInit::DEFAULT_TIME_UNIT`] milliseconds.
pub struct DriverInit {
    time_unit: f64,
    simulate: bool,
    input: InputChannel,
    output: Box<dyn OutputSink>,
    time_source: Box<dyn TimeSource>,
    virtual_time: SharedTime,
}

impl DriverInit {
    /// Default duration of a model time unit, in milliseconds.
    pub const DEFAULT_TIME_UNIT: f64 = 1000.0;

    /// Creates a builder with the default settings.
    pub fn new() -> Self {
        Self {
            time_unit: Self::DEFAULT_TIME_UNIT,
            simulate: false,
            input: InputChannel::Stdin,
            output: Box::new(StdoutSink::new()),
            time_source: Box::new(SystemClock::new()),
            virtual_time: SharedTime::new(MonotonicTime::EPOCH),
        }
    }

    /// Sets the duration of a model time unit in milliseconds.
    ///
    /// This is only relevant for real-time testing: with simulated time, a
    /// model time unit always lasts one virtual millisecond.
    pub fn time_unit(mut self, time_unit: f64) -> Self {
        self.time_unit = time_unit;

        self
    }

    /// Selects simulated time (`true`) or real time (`false`).
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;

        self
    }

    /// Reads input lines from the provided reader on a background thread
    /// instead of the standard input.
    pub fn input_reader(mut self, reader: impl BufRead + Send + 'static) -> Self {
        self.input = InputChannel::Reader(Box::new(reader));

        self
    }

    /// Takes input lines from an existing buffer, without spawning a reader.
    ///
    /// Lines are then fed by pushing them to the buffer.
    pub fn input_buffer(mut self, buffer: InputBuffer) -> Self {
        self.input = InputChannel::Buffer(buffer);

        self
    }

    /// Writes output lines to the provided sink instead of the standard
    /// output.
    pub fn output(mut self, sink: impl OutputSink + 'static) -> Self {
        self.output = Box::new(sink);

        self
    }

    /// Uses the provided wall-clock time source for real-time testing.
    ///
    /// If not set, the [`SystemClock`] is used.
    pub fn time_source(mut self, time_source: impl TimeSource + 'static) -> Self {
        self.time_source = Box::new(time_source);

        self
    }

    /// Returns a reader of the virtual time of the future driver.
    ///
    /// This makes it possible to set up logging with virtual timestamps before
    /// the driver is built. The time stays at [`MonotonicTime::EPOCH`] if time
    /// is not simulated.
    pub fn virtual_time_reader(&self) -> TimeReader {
        self.virtual_time.reader()
    }

    /// Builds the driver, spawning the input reader if needed.
    pub fn init(self) -> Result<TestDriver, InitError> {
        if !(self.time_unit.is_finite() && self.time_unit > 0.0) {
            return Err(InitError::InvalidTimeUnit(self.time_unit));
        }

        let (buffer, line_source) = match self.input {
            InputChannel::Stdin => {
                let buffer = InputBuffer::new();
                let source = LineSource::stdin(buffer.clone())?;
                (buffer, Some(source))
            }
            InputChannel::Reader(reader) => {
                let buffer = InputBuffer::new();
                let source = LineSource::spawn(reader, buffer.clone())?;
                (buffer, Some(source))
            }
            InputChannel::Buffer(buffer) => (buffer, None),
        };

        let policy: Box<dyn TimePolicy> = if self.simulate {
            Box::new(SimulatedTime::with_shared_time(self.virtual_time))
        } else {
            Box::new(RealTime::from_boxed(self.time_unit, self.time_source))
        };
        info!(
            simulate = self.simulate,
            time_unit = self.time_unit,
            "test driver initialized"
        );

        Ok(TestDriver::new(
            DriverIo::new(buffer, self.output),
            policy,
            line_source,
        ))
    }
}

impl Default for DriverInit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DriverInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverInit")
            .field("time_unit", &self.time_unit)
            .field("simulate", &self.simulate)
            .finish_non_exhaustive()
    }
}
