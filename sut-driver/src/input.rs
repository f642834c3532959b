//! Buffering of the lines received from the test environment.
//!
//! The test environment sends its inputs asynchronously, one per line. A
//! [`LineSource`] reads them on a background thread and appends them to an
//! [`InputBuffer`], from which the driver and the system under test consume
//! them at their own pace.
//!
//! Consumers that need to wait for a particular kind of line register a
//! one-shot listener with
//! [`InputBuffer::register_one_shot()`](InputBuffer::register_one_shot)
//! rather than polling the buffer.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use sut_driver::input::{InputBuffer, Line, LineSource};
//!
//! let buffer = InputBuffer::new();
//! let source = LineSource::spawn(Cursor::new("coin\nDelay: 3\n"), buffer.clone()).unwrap();
//! source.join().unwrap();
//!
//! let directives = buffer.remove_matching(Line::is_delay_directive);
//! assert_eq!(directives[0].delay().unwrap().as_millis(), 3);
//! assert_eq!(buffer.read().unwrap(), "coin");
//! ```

mod buffer;
mod line;
mod source;

pub use buffer::InputBuffer;
pub use line::Line;
pub use source::LineSource;
