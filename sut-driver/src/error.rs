//! Driver errors.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::input::Line;

/// An error that ends a test execution.
///
/// Apart from [`ExecutionError::InputClosed`], which signals the regular end
/// of a simulated-time run, all these errors are fatal: they mean that the
/// test sequence and the system under test went out of sync, or that the
/// driver can no longer communicate with the test environment.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The system under test received an input it does not accept in its
    /// current location.
    #[error("unexpected input `{input}` in location {location}")]
    UnexpectedInput {
        /// The location of the system under test.
        location: String,
        /// The offending input.
        input: Line,
    },
    /// An input was read while none was ready.
    #[error("no input is ready to be read")]
    NoInput,
    /// A line starting with `Delay:` is not a well-formed delay directive.
    #[error("malformed delay directive `{0}`")]
    MalformedDelay(Line),
    /// The input channel was closed while the driver waited for a delay
    /// directive.
    #[error("the input channel was closed")]
    InputClosed,
    /// Writing to the output channel failed.
    #[error("failed to write to the output channel: {0}")]
    Output(#[from] io::Error),
}

impl ExecutionError {
    /// Creates an `UnexpectedInput` error for the specified location.
    pub fn unexpected_input(location: impl fmt::Debug, input: Line) -> Self {
        Self::UnexpectedInput {
            location: format!("{:?}", location),
            input,
        }
    }

    /// Checks whether the error means that the test sequence and the system
    /// under test went out of sync.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedInput { .. } | Self::NoInput
                | Self::MalformedDelay(_)
        )
    }
}

/// An error raised while building a [`TestDriver`](crate::driver::TestDriver).
#[derive(Debug, Error)]
pub enum InitError {
    /// The time unit is not a positive, finite number of milliseconds.
    #[error("invalid time unit {0} (expected a positive number of milliseconds)")]
    InvalidTimeUnit(f64),
    /// The thread reading the input channel could not be spawned.
    #[error("failed to spawn the line source: {0}")]
    Spawn(#[from] io::Error),
}
