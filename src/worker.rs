//! §4.7 liveness worker: a background thread that ages out stores whose
//! deadline has passed, modeled on this codebase's WAL group-commit thread
//! (lock, compute next deadline, release lock, wait on a condvar/stopper).

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::pool::StorePool;
use crate::stopper::Stopper;

/// Owns the background thread that keeps a [`StorePool`]'s liveness queue
/// draining. Dropping this without calling [`LivenessWorker::join`] leaves
/// the thread running; callers that want a clean shutdown should signal
/// their [`Stopper`] and then `join`.
pub struct LivenessWorker {
    handle: JoinHandle<()>,
}

impl LivenessWorker {
    /// Spawns the worker thread. `pool` and `stopper` are expected to
    /// outlive the worker; both are `Arc`-shared so the caller keeps using
    /// them concurrently.
    pub fn spawn(pool: Arc<StorePool>, stopper: Arc<dyn Stopper>) -> Self {
        let handle = thread::spawn(move || Self::run(&pool, &*stopper));
        Self { handle }
    }

    fn run(pool: &StorePool, stopper: &dyn Stopper) {
        loop {
            let timeout = pool.age_queue_head();
            if stopper.wait(timeout) {
                return;
            }
        }
    }

    /// Blocks until the worker thread exits. Panics if the worker panicked.
    pub fn join(self) {
        self.handle.join().expect("liveness worker thread panicked");
    }
}
