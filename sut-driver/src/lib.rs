//! A driver for the conformance testing of timed systems.
//!
//! Model-based test generators produce test sequences for systems specified
//! as timed automata. This crate executes such sequences against a system
//! under test (SUT): the test environment sends input symbols over the
//! standard input, one per line, and the driver forwards the outputs of the
//! SUT over the standard output, one per line.
//!
//! The driver buffers inputs as they arrive, runs the state machine of the
//! SUT in *steps* until it is quiescent, and decides how time passes between
//! steps. Time can either be real, in which case the SUT is polled every
//! quarter of a model time unit, or simulated, in which case time only
//! advances when the test environment allows it.
//!
//! # A practical overview
//!
//! ## Writing a system under test
//!
//! A SUT implements the [`Sut`](driver::Sut) trait. Its
//! [`update()`](driver::Sut::update) method takes at most one transition per
//! call and reports [`Progress::Quiescent`](driver::Progress::Quiescent) when
//! no input is ready and no time-based transition is enabled. Clocks are
//! [`Clock`](time::Clock) values obtained from
//! [`TestDriver::reset_time()`](driver::TestDriver::reset_time) and read in
//! model time units with
//! [`TestDriver::get_value()`](driver::TestDriver::get_value).
//!
//! The [`models`] module contains two complete examples, a car alarm system
//! and a fish retailer.
//!
//! ## Running a test
//!
//! A [`TestDriver`](driver::TestDriver) is built with a
//! [`DriverInit`](driver::DriverInit) builder, or with
//! [`TestDriver::create()`](driver::TestDriver::create) to talk over the
//! standard input and output:
//!
//! ```no_run
//! use sut_driver::driver::TestDriver;
//! use sut_driver::models::CarAlarm;
//!
//! // Simulated time; the time unit is only used in real time.
//! let mut driver = TestDriver::create(100.0, true)?;
//! let mut alarm = CarAlarm::new(&driver);
//!
//! driver.run(&mut alarm)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Simulated time
//!
//! With simulated time, one model time unit lasts one virtual millisecond.
//! The test environment grants time with `Delay: <N>` lines: virtual time then
//! advances by one millisecond per step until the SUT writes an output or the
//! delay is exhausted, and the driver answers with `Delayed: <M>`, `M` being
//! the delay actually consumed. See [`SimulatedTime`](driver::SimulatedTime).
//!
//! The run ends when the input channel is closed while the driver waits for a
//! delay directive.
//!
//! # Logging
//!
//! The driver emits [`tracing`] events; the [`logging`] module installs a
//! subscriber writing to the standard error so as to keep the standard output
//! free for the test protocol.
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod driver;
pub mod error;
pub mod input;
pub mod logging;
pub mod models;
pub mod output;
pub mod time;
