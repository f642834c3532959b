//! Output channels towards the test environment.
//!
//! The driver emits one line per output symbol through an [`OutputSink`].
//! Lines must reach the test environment immediately, so sinks backed by a
//! writer flush after every line.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// A destination for the lines emitted by the driver.
pub trait OutputSink: Send {
    /// Writes a single line, without its terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// An [`OutputSink`] writing to the standard output.
#[derive(Copy, Clone, Debug, Default)]
pub struct StdoutSink {}

impl StdoutSink {
    /// Creates a sink writing to the standard output.
    pub fn new() -> Self {
        Self {}
    }
}

impl OutputSink for StdoutSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;

        stdout.flush()
    }
}

/// An [`OutputSink`] writing to an arbitrary writer.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    /// Creates a sink writing to the provided writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> OutputSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;

        self.writer.flush()
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

/// An [`OutputSink`] recording lines in memory.
///
/// Clones share the same storage, so a clone can be handed to the driver
/// while another is used to inspect the output. Lines are returned in
/// first-in-first-out order by the [`Iterator`] implementation; note that even
/// if the iterator returns `None`, more lines may be written later.
#[derive(Clone, Default)]
pub struct LineBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
}

impl LineBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of lines not yet consumed.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether all lines were consumed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes and returns all lines not yet consumed.
    pub fn drain(&self) -> Vec<String> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for LineBuffer {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lock().push_back(line.to_owned());

        Ok(())
    }
}

impl Iterator for LineBuffer {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.lock().pop_front()
    }
}

impl fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuffer")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
