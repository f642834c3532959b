//! Test driver and time policies.
//!
//! # Overview
//!
//! A [`TestDriver`] sits between the test environment, which talks to it over
//! a line-based protocol, and a system under test implementing the [`Sut`]
//! trait. The system under test is executed in *steps*: during a step, its
//! [`update()`](Sut::update) method is called repeatedly until it reports
//! [`Progress::Quiescent`], meaning that no input is ready and no time-based
//! transition is enabled. Once a step is done, the active [`TimePolicy`]
//! decides when the next step begins:
//!
//! * [`RealTime`] lets wall-clock time elapse and starts a new step every
//!   quarter of a model time unit,
//! * [`SimulatedTime`] keeps a virtual time that only advances, one
//!   millisecond per step, within the windows granted by `Delay: <N>`
//!   directives of the test environment, and reports the consumed delay with
//!   a `Delayed: <N>` line when the window closes.
//!
//! # The step contract
//!
//! Each call to [`Sut::update()`] must do exactly one of the following:
//!
//! * consume one input with [`TestDriver::read()`] and take a transition,
//! * take a transition enabled by the value of a clock, possibly writing
//!   outputs with [`TestDriver::write()`],
//! * report [`Progress::Quiescent`] *without* changing its state.
//!
//! Quiescence is the only way a step ends, so a system under test that keeps
//! transitioning forever stalls the driver.
//!
//! # Examples
//!
//! A vending machine that hands out a drink two time units after a coin was
//! inserted, driven with simulated time:
//!
//! ```
//! use sut_driver::driver::{DriverInit, Progress, Sut, TestDriver};
//! use sut_driver::error::ExecutionError;
//! use sut_driver::input::InputBuffer;
//! use sut_driver::output::LineBuffer;
//! use sut_driver::time::Clock;
//!
//! struct Vendor {
//!     paid_at: Option<Clock>,
//! }
//!
//! impl Sut for Vendor {
//!     fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError> {
//!         match self.paid_at {
//!             None if driver.input_ready() => {
//!                 let input = driver.read()?;
//!                 if input != "coin" {
//!                     return Err(ExecutionError::unexpected_input("idle", input));
//!                 }
//!                 self.paid_at = Some(driver.reset_time());
//!             }
//!             Some(x) if driver.get_value(x) >= 2.0 => {
//!                 driver.write("drink")?;
//!                 self.paid_at = None;
//!             }
//!             _ => return Ok(Progress::Quiescent),
//!         }
//!
//!         Ok(Progress::Transitioned)
//!     }
//! }
//!
//! let input = InputBuffer::new();
//! let output = LineBuffer::new();
//! let mut driver = DriverInit::new()
//!     .simulate(true)
//!     .input_buffer(input.clone())
//!     .output(output.clone())
//!     .init()
//!     .unwrap();
//!
//! input.push("coin");
//! input.push("Delay: 5");
//! input.close();
//!
//! // The run ends once the input is closed and no delay is left.
//! driver.run(&mut Vendor { paid_at: None }).unwrap();
//!
//! assert_eq!(output.drain(), vec!["drink", "Delayed: 2"]);
//! ```

mod driver_init;
mod real_time;
mod simulated_time;

use std::convert::Infallible;
use std::fmt;

use tracing::{debug, trace};

use crate::error::{ExecutionError, InitError};
use crate::input::{InputBuffer, Line, LineSource};
use crate::output::OutputSink;
use crate::time::{Clock, TimeReader};

pub use driver_init::DriverInit;
pub use real_time::RealTime;
pub use simulated_time::SimulatedTime;

/// The outcome of a single call to [`Sut::update()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Progress {
    /// A transition was taken; the step goes on.
    Transitioned,
    /// No input is ready and no time-based transition is enabled; the step
    /// is over.
    Quiescent,
}

/// A system under test driven in steps.
pub trait Sut {
    /// Takes at most one transition.
    ///
    /// See the [module-level documentation](crate::driver) for the contract
    /// this method must honor. An error aborts the test execution.
    fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError>;
}

impl<S: Sut + ?Sized> Sut for &mut S {
    fn update(&mut self, driver: &mut TestDriver) -> Result<Progress, ExecutionError> {
        (**self).update(driver)
    }
}

/// The phase of the step loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepState {
    /// A step is in progress.
    Running,
    /// The system under test reported quiescence.
    Quiescent,
    /// The time policy is deciding when the next step begins.
    AwaitingNextStep,
}

/// The input and output channels of a driver, as seen by a [`TimePolicy`].
pub struct DriverIo {
    input: InputBuffer,
    output: Box<dyn OutputSink>,
    has_outputted: bool,
}

impl DriverIo {
    pub(crate) fn new(input: InputBuffer, output: Box<dyn OutputSink>) -> Self {
        Self {
            input,
            output,
            has_outputted: false,
        }
    }

    /// Returns the input buffer.
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    /// Writes a line to the output channel and records that an output
    /// occurred.
    pub fn write(&mut self, line: &str) -> Result<(), ExecutionError> {
        self.output.write_line(line)?;
        self.has_outputted = true;

        Ok(())
    }

    /// Checks whether a line was written since the flag was last cleared.
    pub fn has_outputted(&self) -> bool {
        self.has_outputted
    }

    /// Clears the output flag.
    pub fn clear_outputted(&mut self) {
        self.has_outputted = false;
    }
}

impl fmt::Debug for DriverIo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverIo")
            .field("input", &self.input)
            .field("has_outputted", &self.has_outputted)
            .finish_non_exhaustive()
    }
}

/// A policy deciding how time passes between steps.
pub trait TimePolicy: Send {
    /// Waits until the first step may begin.
    fn start(&mut self, io: &mut DriverIo) -> Result<(), ExecutionError>;

    /// Waits until the next step may begin, once the current step reached
    /// quiescence.
    fn on_step_done(&mut self, io: &mut DriverIo) -> Result<(), ExecutionError>;

    /// Returns the time elapsed since `clock` was reset, in model time units.
    fn get_value(&self, clock: Clock) -> f64;

    /// Returns a clock anchored at the current time.
    fn reset_time(&self) -> Clock;

    /// Returns a reader of the virtual time, if the policy simulates time.
    fn time_reader(&self) -> Option<TimeReader> {
        None
    }
}

/// A driver executing a system under test against a test environment.
///
/// See the [module-level documentation](crate::driver) for more details.
pub struct TestDriver {
    io: DriverIo,
    policy: Box<dyn TimePolicy>,
    state: StepState,
    // Detached on drop: the reader may be blocked on the input channel.
    _line_source: Option<LineSource>,
}

impl TestDriver {
    /// Creates a driver talking over the standard input and output.
    ///
    /// `time_unit` is the duration of a model time unit in milliseconds; it is
    /// only relevant for real-time testing. If `simulate` is true, time is
    /// simulated rather than real.
    pub fn create(time_unit: f64, simulate: bool) -> Result<Self, InitError> {
        DriverInit::new()
            .time_unit(time_unit)
            .simulate(simulate)
            .init()
    }

    pub(crate) fn new(
        io: DriverIo,
        policy: Box<dyn TimePolicy>,
        line_source: Option<LineSource>,
    ) -> Self {
        Self {
            io,
            policy,
            state: StepState::Running,
            _line_source: line_source,
        }
    }

    /// Checks whether an input is ready to be read.
    pub fn input_ready(&self) -> bool {
        self.io.input.input_ready()
    }

    /// Reads and consumes the earliest input.
    ///
    /// An error is returned if no input is ready.
    pub fn read(&mut self) -> Result<Line, ExecutionError> {
        let line = self.io.input.read()?;
        trace!(%line, "input consumed");

        Ok(line)
    }

    /// Writes an output symbol to the test environment.
    pub fn write(&mut self, message: &str) -> Result<(), ExecutionError> {
        trace!(message, "output emitted");

        self.io.write(message)
    }

    /// Writes several output symbols to the test environment, in order.
    pub fn write_all<I>(&mut self, messages: I) -> Result<(), ExecutionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for message in messages {
            self.write(message.as_ref())?;
        }

        Ok(())
    }

    /// Returns the value of a clock in model time units.
    pub fn get_value(&self, clock: Clock) -> f64 {
        self.policy.get_value(clock)
    }

    /// Returns a clock anchored at the current time.
    pub fn reset_time(&self) -> Clock {
        self.policy.reset_time()
    }

    /// Returns the input buffer.
    pub fn input(&self) -> &InputBuffer {
        &self.io.input
    }

    /// Returns a reader of the virtual time, if time is simulated.
    pub fn time_reader(&self) -> Option<TimeReader> {
        self.policy.time_reader()
    }

    /// Returns the phase of the step loop.
    pub fn state(&self) -> StepState {
        self.state
    }

    /// Waits until the first step may begin.
    pub fn start(&mut self) -> Result<(), ExecutionError> {
        self.policy.start(&mut self.io)?;
        self.state = StepState::Running;

        Ok(())
    }

    /// Runs a step, calling [`Sut::update()`] until the system under test
    /// reports quiescence.
    ///
    /// Returns the number of transitions taken during the step.
    pub fn run_step<S: Sut + ?Sized>(&mut self, sut: &mut S) -> Result<usize, ExecutionError> {
        self.state = StepState::Running;

        let mut transitions = 0;
        while sut.update(self)? == Progress::Transitioned {
            transitions += 1;
        }
        self.state = StepState::Quiescent;
        trace!(transitions, "step done");

        Ok(transitions)
    }

    /// Waits until the next step may begin.
    pub fn on_step_done(&mut self) -> Result<(), ExecutionError> {
        self.state = StepState::AwaitingNextStep;
        self.policy.on_step_done(&mut self.io)?;
        self.state = StepState::Running;

        Ok(())
    }

    /// Drives the system under test until the test ends.
    ///
    /// With simulated time, the run ends with `Ok(())` when the input channel
    /// is closed while the driver waits for a delay directive. With real time,
    /// only an error can end the run.
    pub fn run<S: Sut + ?Sized>(&mut self, sut: &mut S) -> Result<(), ExecutionError> {
        match self.drive(sut) {
            Ok(never) => match never {},
            Err(ExecutionError::InputClosed) => {
                debug!("input closed, test execution finished");

                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn drive<S: Sut + ?Sized>(&mut self, sut: &mut S) -> Result<Infallible, ExecutionError> {
        self.start()?;
        loop {
            self.run_step(sut)?;
            self.on_step_done()?;
        }
    }
}

impl fmt::Debug for TestDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestDriver")
            .field("io", &self.io)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
