//! A scripted test environment.

use std::collections::VecDeque;
use std::io;

use sut_driver::driver::{DriverInit, TestDriver};
use sut_driver::input::InputBuffer;
use sut_driver::output::{LineBuffer, OutputSink};

/// An output sink playing the test environment of a simulated-time driver.
///
/// The script is a list of chunks, each ending with a delay directive. A chunk
/// is fed to the driver each time a delay window closes, and the input is
/// closed once the script is exhausted.
pub struct ScriptedEnv {
    input: InputBuffer,
    log: LineBuffer,
    chunks: VecDeque<Vec<String>>,
}

impl ScriptedEnv {
    fn feed_next_chunk(&mut self) {
        match self.chunks.pop_front() {
            Some(chunk) => {
                for line in chunk {
                    self.input.push(line);
                }
            }
            None => self.input.close(),
        }
    }
}

impl OutputSink for ScriptedEnv {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.log.write_line(line)?;
        if line.starts_with("Delayed:") {
            self.feed_next_chunk();
        }

        Ok(())
    }
}

/// Builds a simulated-time driver playing the provided script.
///
/// Returns the driver and the log of all outputs.
pub fn scripted_driver<I, C, L>(script: I) -> (TestDriver, LineBuffer)
where
    I: IntoIterator<Item = C>,
    C: IntoIterator<Item = L>,
    L: Into<String>,
{
    let input = InputBuffer::new();
    let log = LineBuffer::new();
    let mut env = ScriptedEnv {
        input: input.clone(),
        log: log.clone(),
        chunks: script
            .into_iter()
            .map(|chunk| chunk.into_iter().map(Into::into).collect())
            .collect(),
    };
    env.feed_next_chunk();

    let driver = DriverInit::new()
        .simulate(true)
        .input_buffer(input)
        .output(env)
        .init()
        .unwrap();

    (driver, log)
}
