//! Shutdown collaborator consumed by the liveness worker.
//!
//! Mirrors the lock/condvar coordination this codebase already uses for its
//! own background maintenance thread (the WAL group-commit loop): the
//! worker blocks on a condition variable for either a timeout or a
//! shutdown signal, never polling.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// The stopper collaborator: `should_stop` is a non-blocking poll, `wait`
/// parks the calling thread until either `timeout` elapses or shutdown is
/// signalled, returning `true` in the latter case.
pub trait Stopper: Send + Sync {
    fn should_stop(&self) -> bool;
    fn wait(&self, timeout: Duration) -> bool;
}

/// Default [`Stopper`] for a single background worker owned by this process.
pub struct ThreadStopper {
    stopping: Mutex<bool>,
    condvar: Condvar,
}

impl ThreadStopper {
    pub fn new() -> Self {
        Self {
            stopping: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    /// Signals shutdown and wakes any thread parked in [`Stopper::wait`].
    pub fn stop(&self) {
        *self.stopping.lock() = true;
        self.condvar.notify_all();
    }
}

impl Default for ThreadStopper {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopper for ThreadStopper {
    fn should_stop(&self) -> bool {
        *self.stopping.lock()
    }

    fn wait(&self, timeout: Duration) -> bool {
        let mut stopping = self.stopping.lock();
        if *stopping {
            return true;
        }
        self.condvar.wait_for(&mut stopping, timeout);
        *stopping
    }
}
