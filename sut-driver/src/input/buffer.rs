use std::collections::VecDeque;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use slab::Slab;
use tracing::trace;

use crate::error::ExecutionError;

use super::Line;

type Predicate = Box<dyn Fn(&Line) -> bool + Send>;
type Callback = Box<dyn FnOnce() + Send>;

/// A one-shot callback waiting for a matching line.
struct Listener {
    predicate: Predicate,
    callback: Callback,
}

/// The state shared by all handles of an `InputBuffer`.
struct State {
    lines: VecDeque<Line>,
    listeners: Slab<Listener>,
    is_closed: bool,
}

/// The ordered collection of input lines not yet consumed by the driver.
///
/// Lines are appended by a producer (normally a [`LineSource`]) and consumed
/// in first-in-first-out order, except for lines extracted explicitly with
/// [`remove_matching()`](InputBuffer::remove_matching).
///
/// The buffer also holds a set of one-shot listeners that are notified when a
/// matching line arrives. All buffer operations are serialized by a single
/// lock, but listener callbacks are always invoked after the lock has been
/// released so that they may freely access the buffer again.
///
/// Cloning an `InputBuffer` yields another handle to the same buffer.
///
/// [`LineSource`]: crate::input::LineSource
#[derive(Clone)]
pub struct InputBuffer {
    state: Arc<Mutex<State>>,
}

impl InputBuffer {
    /// Creates an open, empty buffer.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                lines: VecDeque::new(),
                listeners: Slab::new(),
                is_closed: false,
            })),
        }
    }

    /// Checks whether at least one line is ready to be read.
    pub fn input_ready(&self) -> bool {
        !self.lock().lines.is_empty()
    }

    /// Returns the number of buffered lines.
    pub fn len(&self) -> usize {
        self.lock().lines.len()
    }

    /// Checks whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().lines.is_empty()
    }

    /// Removes and returns the earliest buffered line.
    ///
    /// An error is returned if no line is ready, which means that the caller
    /// did not check [`input_ready()`](InputBuffer::input_ready) first.
    pub fn read(&self) -> Result<Line, ExecutionError> {
        self.lock().lines.pop_front().ok_or(ExecutionError::NoInput)
    }

    /// Removes and returns all lines satisfying the predicate, in arrival
    /// order, leaving the relative order of all other lines untouched.
    pub fn remove_matching(&self, predicate: impl Fn(&Line) -> bool) -> Vec<Line> {
        let mut state = self.lock();

        let (matching, kept): (VecDeque<Line>, VecDeque<Line>) =
            mem::take(&mut state.lines).into_iter().partition(|line| predicate(line));
        state.lines = kept;

        matching.into()
    }

    /// Appends a line and notifies all listeners whose predicate it
    /// satisfies.
    ///
    /// Lines pushed after the buffer was closed are discarded.
    pub fn push(&self, line: impl Into<Line>) {
        let line = line.into();

        let ready = {
            let mut state = self.lock();
            if state.is_closed {
                trace!(%line, "line discarded by closed input buffer");
                return;
            }

            let keys: Vec<usize> = state
                .listeners
                .iter()
                .filter(|(_, listener)| (listener.predicate)(&line))
                .map(|(key, _)| key)
                .collect();
            let ready: Vec<Listener> = keys
                .into_iter()
                .map(|key| state.listeners.remove(key))
                .collect();

            state.lines.push_back(line);

            ready
        };

        for listener in ready {
            (listener.callback)();
        }
    }

    /// Registers a callback to be invoked once, as soon as the buffer holds a
    /// line satisfying the predicate.
    ///
    /// If a buffered line already satisfies the predicate, the callback is
    /// invoked immediately on the calling thread and `false` is returned.
    /// Otherwise the callback is invoked by the thread that pushes the next
    /// matching line, and `true` is returned.
    ///
    /// If the buffer is closed and no buffered line matches, the callback is
    /// dropped without being invoked and `false` is returned.
    pub fn register_one_shot<P, F>(&self, predicate: P, callback: F) -> bool
    where
        P: Fn(&Line) -> bool + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.lock();

        if state.lines.iter().any(&predicate) {
            drop(state);
            callback();

            return false;
        }
        if state.is_closed {
            drop(state);

            return false;
        }

        state.listeners.insert(Listener {
            predicate: Box::new(predicate),
            callback: Box::new(callback),
        });

        true
    }

    /// Closes the buffer.
    ///
    /// Already buffered lines remain readable but new lines are discarded.
    /// Pending listeners are dropped without being invoked, which lets a
    /// thread waiting on a listener notice that no more input will arrive.
    pub fn close(&self) {
        let listeners = {
            let mut state = self.lock();
            state.is_closed = true;

            mem::take(&mut state.listeners)
        };
        drop(listeners);
    }

    /// Checks whether the buffer was closed.
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking listener predicate cannot leave the state inconsistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();

        f.debug_struct("InputBuffer")
            .field("lines", &state.lines)
            .field("listeners", &state.listeners.len())
            .field("is_closed", &state.is_closed)
            .finish()
    }
}
