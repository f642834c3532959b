//! Virtual time shared with other threads.
use std::fmt;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use super::MonotonicTime;

/// A tearable atomic storage for a `MonotonicTime`.
///
/// Only the driver thread writes the time. A load that races with a store
/// may mix the seconds of one timestamp with the nanoseconds of the other,
/// which is acceptable for log timestamps, the sole cross-thread use.
struct AtomicTime {
    secs: AtomicI64,
    nanos: AtomicU32,
}

impl AtomicTime {
    fn load(&self) -> MonotonicTime {
        // Each field is valid on its own, so even a torn load yields a valid
        // timestamp.
        MonotonicTime::new(
            self.secs.load(Ordering::Relaxed),
            self.nanos.load(Ordering::Relaxed),
        )
        .unwrap_or(MonotonicTime::EPOCH)
    }

    fn store(&self, time: MonotonicTime) {
        self.secs.store(time.as_secs(), Ordering::Relaxed);
        self.nanos.store(time.subsec_nanos(), Ordering::Relaxed);
    }
}

/// The writer side of a shared virtual time.
pub(crate) struct SharedTime {
    inner: Arc<AtomicTime>,
}

impl SharedTime {
    pub(crate) fn new(time: MonotonicTime) -> Self {
        Self {
            inner: Arc::new(AtomicTime {
                secs: AtomicI64::new(time.as_secs()),
                nanos: AtomicU32::new(time.subsec_nanos()),
            }),
        }
    }

    pub(crate) fn write(&self, time: MonotonicTime) {
        self.inner.store(time);
    }

    pub(crate) fn reader(&self) -> TimeReader {
        TimeReader {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for SharedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedTime")
            .field("time", &self.inner.load())
            .finish()
    }
}

/// A read handle on the virtual time of a simulated-time driver.
#[derive(Clone)]
pub struct TimeReader {
    inner: Arc<AtomicTime>,
}

impl TimeReader {
    /// Returns the last published virtual time.
    pub fn read(&self) -> MonotonicTime {
        self.inner.load()
    }
}

impl fmt::Debug for TimeReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeReader")
            .field("time", &self.read())
            .finish()
    }
}
