//! Keyed task slots for the widget's fetches.
//!
//! Each slot holds at most one task. Spawning into an occupied slot aborts the
//! previous task, so its result is never delivered. Dropping the manager aborts
//! everything still running. A task that panics delivers its fallback event
//! instead, so the widget never waits on a result that cannot arrive.

use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Search,
    Weather,
    SelectionGuard,
}

#[derive(Debug)]
pub struct TaskManager<E> {
    tasks: HashMap<TaskKey, AbortHandle>,
    events_tx: mpsc::UnboundedSender<E>,
}

impl<E> TaskManager<E>
where
    E: Send + 'static,
{
    pub fn new(events_tx: mpsc::UnboundedSender<E>) -> Self {
        Self { tasks: HashMap::new(), events_tx }
    }

    /// Run `future` in the `key` slot and send its output as an event.
    ///
    /// `on_panic` is sent in place of the output if the future panics.
    pub fn spawn<F>(&mut self, key: TaskKey, future: F, on_panic: E)
    where
        F: Future<Output = E> + Send + 'static,
    {
        self.cancel(key);

        let tx = self.events_tx.clone();
        let handle = tokio::spawn(async move {
            let event = match AssertUnwindSafe(future).catch_unwind().await {
                Ok(event) => event,
                Err(_) => {
                    warn!(?key, "task panicked");
                    on_panic
                }
            };
            // The receiver is gone only when the widget was dropped.
            let _ = tx.send(event);
        });

        self.tasks.insert(key, handle.abort_handle());
    }
}

impl<E> TaskManager<E> {
    pub fn cancel(&mut self, key: TaskKey) {
        if let Some(handle) = self.tasks.remove(&key) {
            if !handle.is_finished() {
                trace!(?key, "aborting task");
            }
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn is_running(&self, key: TaskKey) -> bool {
        self.tasks.get(&key).is_some_and(|h| !h.is_finished())
    }
}

impl<E> Drop for TaskManager<E> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
