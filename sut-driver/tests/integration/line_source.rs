//! End-to-end runs reading the test sequence from a byte stream.

use std::fmt;
use std::io::{self, Cursor, Read, Write};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use sut_driver::driver::DriverInit;
use sut_driver::error::ExecutionError;
use sut_driver::input::{InputBuffer, LineSource};
use sut_driver::models::CarAlarm;
use sut_driver::output::{LineBuffer, WriterSink};

#[test]
fn simulated_run_from_reader() {
    let output = LineBuffer::new();
    let mut driver = DriverInit::new()
        .simulate(true)
        .input_reader(Cursor::new("close\nlock\nDelay: 25\n"))
        .output(output.clone())
        .init()
        .unwrap();
    let mut alarm = CarAlarm::new(&driver);

    driver.run(&mut alarm).unwrap();

    assert_eq!(output.drain(), vec!["armedOn", "Delayed: 20"]);
}

#[test]
fn malformed_directive_from_reader() {
    let mut driver = DriverInit::new()
        .simulate(true)
        .input_reader(Cursor::new("close\nDelay: -3\n"))
        .output(LineBuffer::new())
        .init()
        .unwrap();
    let mut alarm = CarAlarm::new(&driver);

    assert!(matches!(
        driver.run(&mut alarm),
        Err(ExecutionError::MalformedDelay(line)) if line == "Delay: -3"
    ));
}

#[test]
fn streamed_input_to_writer() {
    let input = InputBuffer::new();
    let (tx, rx) = mpsc::channel();
    let source = LineSource::spawn(ChannelReader::new(rx), input.clone()).unwrap();

    let written = SharedBytes::default();
    let mut driver = DriverInit::new()
        .simulate(true)
        .input_buffer(input)
        .output(WriterSink::new(written.clone()))
        .init()
        .unwrap();
    let mut alarm = CarAlarm::new(&driver);

    let env = thread::spawn(move || {
        for line in ["lock\n", "close\n", "Delay: 30\n"] {
            tx.send(line.as_bytes().to_vec()).unwrap();
        }
        // Dropping the sender ends the stream.
    });

    driver.run(&mut alarm).unwrap();
    env.join().unwrap();
    source.join().unwrap();

    assert_eq!(written.to_string(), "armedOn\nDelayed: 20\n");
}

// A byte sink that can be inspected while the driver owns a handle to it.
#[derive(Clone, Default)]
struct SharedBytes(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBytes {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for SharedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0.lock().unwrap()))
    }
}

// A reader yielding the byte chunks sent through a channel.
struct ChannelReader {
    rx: mpsc::Receiver<Vec<u8>>,
    pending: Cursor<Vec<u8>>,
}

impl ChannelReader {
    fn new(rx: mpsc::Receiver<Vec<u8>>) -> io::BufReader<Self> {
        io::BufReader::new(Self {
            rx,
            pending: Cursor::new(Vec::new()),
        })
    }
}

impl Read for ChannelReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let n = self.pending.read(buf)?;
            if n > 0 {
                return Ok(n);
            }
            match self.rx.recv() {
                Ok(chunk) => self.pending = Cursor::new(chunk),
                Err(_) => return Ok(0),
            }
        }
    }
}
