// src/crawl/barrier.rs
// =============================================================================
// A counted completion barrier for a tree of tasks that keeps growing
// while it runs.
//
// - enter() is called by the dispatcher *before* a task is spawned and
//   returns a guard that the task holds until it finishes
// - dropping the guard decrements the count
// - wait() resolves once the count has reached zero
//
// Because a parent enters the barrier for each child before its own
// guard is dropped, the count cannot hit zero while work remains.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Debug, Default)]
pub struct CompletionBarrier {
    pending: AtomicUsize,
    drained: Notify,
}

#[derive(Debug)]
pub struct BarrierGuard {
    barrier: Arc<CompletionBarrier>,
}

impl CompletionBarrier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn enter(self: &Arc<Self>) -> BarrierGuard {
        self.pending.fetch_add(1, Ordering::AcqRel);
        BarrierGuard {
            barrier: Arc::clone(self),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    // Waits until every guard handed out by enter() has been dropped.
    // Only one waiter is expected: notify_one stores a permit, so a
    // drop that lands between the load and the await is not lost.
    pub async fn wait(&self) {
        while self.pending() != 0 {
            self.drained.notified().await;
        }
    }
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        if self.barrier.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.barrier.drained.notify_one();
        }
    }
}
