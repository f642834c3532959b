use std::fmt;
use std::io::{self, BufRead, BufReader};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};

use super::InputBuffer;

/// A background reader feeding an [`InputBuffer`] with the lines of an input
/// channel.
///
/// The reader runs on a dedicated thread until the end of the input or until
/// a read fails, at which point the buffer is closed.
pub struct LineSource {
    handle: JoinHandle<()>,
}

impl LineSource {
    /// Spawns a thread reading lines from the standard input.
    pub fn stdin(buffer: InputBuffer) -> io::Result<Self> {
        Self::spawn(BufReader::new(io::stdin()), buffer)
    }

    /// Spawns a thread reading lines from the provided reader.
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped.
    pub fn spawn<R>(reader: R, buffer: InputBuffer) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("line-source".into())
            .spawn(move || Self::listen(reader, &buffer))?;

        Ok(Self { handle })
    }

    /// Checks whether the reader has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits until the reader has stopped.
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }

    fn listen<R: BufRead>(reader: R, buffer: &InputBuffer) {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    trace!(%line, "input received");
                    buffer.push(line);
                }
                Err(err) => {
                    warn!(error = %err, "failed to read from the input channel");
                    break;
                }
            }
        }

        debug!("input channel closed");
        buffer.close();
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("is_finished", &self.is_finished())
            .finish()
    }
}
