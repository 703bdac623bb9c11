//! Cancellable, run-at-most-once delayed work on the tokio runtime.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// A closure scheduled to run once after a delay.
///
/// Cancellation and firing race on a single atomic state, so the body runs
/// at most once and never after a successful [`DeferredTask::cancel`].
/// Dropping the handle does not cancel the task.
#[derive(Debug)]
pub struct DeferredTask {
    handle: JoinHandle<()>,
    state: Arc<AtomicU8>,
}

impl DeferredTask {
    /// Spawn `f` to run after `delay`. Must be called within a tokio runtime.
    pub fn schedule<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let state = Arc::new(AtomicU8::new(PENDING));
        let task_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            if task_state
                .compare_exchange(PENDING, FIRED, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                f();
            }
        });
        Self { handle, state }
    }

    /// Prevent the task from running. Returns `false` if it already fired
    /// or was cancelled before.
    pub fn cancel(&self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if cancelled {
            self.handle.abort();
            log::debug!("deferred task cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::SeqCst) == PENDING
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to settle. Returns `true` if the body ran.
    pub async fn join(self) -> bool {
        if let Err(e) = self.handle.await {
            if e.is_panic() {
                log::warn!("deferred task panicked");
            }
        }
        self.state.load(Ordering::SeqCst) == FIRED
    }
}
