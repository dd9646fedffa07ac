//! UI dispatch sinks.
//!
//! Parameter tree notifications can arrive on a realtime audio thread. The
//! bridge never touches listeners there; it wraps the work in a [`UiTask`]
//! and hands it to a [`UiDispatch`] sink injected at construction.
//!
//! Two sinks are provided, both FIFO:
//!
//! - [`UiQueue`] - A channel the application's UI loop drains with
//!   [`UiQueueReceiver::run_pending`] (main-thread style).
//! - [`ThreadExecutor`] - A dedicated worker thread that runs tasks as they
//!   arrive.

use std::panic::AssertUnwindSafe;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};

/// Work queued for the UI context.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Ordered, non-blocking hand-off to a UI execution context.
///
/// Implementations must run tasks in submission order, must not run a task
/// on the calling thread, and must not block the caller.
pub trait UiDispatch: Send + Sync {
    /// Queue `task` for execution on the UI context.
    fn dispatch(&self, task: UiTask);
}

fn run_task(task: UiTask) {
    if std::panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
        log::error!("UI task panicked; continuing with the next task");
    }
}

// =============================================================================
// UiQueue
// =============================================================================

/// Sending half of a UI task queue.
#[derive(Clone)]
pub struct UiQueue {
    sender: Sender<UiTask>,
}

/// Receiving half of a UI task queue, owned by the UI loop.
pub struct UiQueueReceiver {
    receiver: Receiver<UiTask>,
}

impl UiQueue {
    /// Create a connected queue / receiver pair.
    pub fn new() -> (UiQueue, UiQueueReceiver) {
        let (sender, receiver) = unbounded();
        (UiQueue { sender }, UiQueueReceiver { receiver })
    }
}

impl UiDispatch for UiQueue {
    fn dispatch(&self, task: UiTask) {
        // A closed receiver means the UI is gone; the update has nowhere to go.
        let _ = self.sender.send(task);
    }
}

impl UiQueueReceiver {
    /// Run every task queued so far. Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let mut count = 0;
        while let Ok(task) = self.receiver.try_recv() {
            run_task(task);
            count += 1;
        }
        count
    }

    /// Wait up to `timeout` for one task and run it.
    ///
    /// Returns `true` if a task ran.
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                run_task(task);
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Run tasks until `deadline`, waiting for new ones as they arrive.
    pub fn run_until(&self, deadline: Instant) -> usize {
        let mut count = 0;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return count;
            }
            if self.run_next(deadline - now) {
                count += 1;
            }
        }
    }

    /// Number of tasks waiting.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no tasks are waiting.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

// =============================================================================
// ThreadExecutor
// =============================================================================

/// Runs UI tasks on one dedicated worker thread, in order.
///
/// Dropping the executor closes the queue; the worker finishes the tasks
/// already queued and exits. Use [`ThreadExecutor::shutdown`] to wait for it.
pub struct ThreadExecutor {
    sender: Sender<UiTask>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadExecutor {
    /// Start the worker thread.
    pub fn spawn(name: &str) -> std::io::Result<Self> {
        let (sender, receiver) = unbounded::<UiTask>();
        let worker = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for task in receiver {
                    run_task(task);
                }
                log::trace!("UI executor queue closed");
            })?;

        Ok(Self {
            sender,
            worker: Some(worker),
        })
    }

    /// Close the queue and wait for queued tasks to finish.
    pub fn shutdown(mut self) {
        let worker = self.worker.take();
        drop(self);
        if let Some(worker) = worker {
            if worker.join().is_err() {
                log::error!("UI executor thread panicked");
            }
        }
    }
}

impl UiDispatch for ThreadExecutor {
    fn dispatch(&self, task: UiTask) {
        let _ = self.sender.send(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_queue_is_fifo_and_deferred() {
        let (queue, ui) = UiQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let log = Arc::clone(&log);
            queue.dispatch(Box::new(move || log.lock().push(i)));
        }
        assert!(log.lock().is_empty());
        assert_eq!(ui.len(), 5);
        assert_eq!(ui.run_pending(), 5);
        assert_eq!(*log.lock(), vec![0, 1, 2, 3, 4]);
        assert!(ui.is_empty());
    }

    #[test]
    fn test_queue_survives_panicking_task() {
        let (queue, ui) = UiQueue::new();
        let hit = Arc::new(Mutex::new(false));
        queue.dispatch(Box::new(|| panic!("listener bug")));
        {
            let hit = Arc::clone(&hit);
            queue.dispatch(Box::new(move || *hit.lock() = true));
        }
        assert_eq!(ui.run_pending(), 2);
        assert!(*hit.lock());
    }

    #[test]
    fn test_dispatch_after_receiver_dropped() {
        let (queue, ui) = UiQueue::new();
        drop(ui);
        queue.dispatch(Box::new(|| {}));
    }

    #[test]
    fn test_run_next_times_out() {
        let (_queue, ui) = UiQueue::new();
        assert!(!ui.run_next(Duration::from_millis(10)));
    }

    #[test]
    fn test_executor_runs_in_order_off_thread() {
        let executor = ThreadExecutor::spawn("test-ui").unwrap();
        let caller = std::thread::current().id();
        let log = Arc::new(Mutex::new(Vec::new()));
        for i in 0..100 {
            let log = Arc::clone(&log);
            executor.dispatch(Box::new(move || {
                assert_ne!(std::thread::current().id(), caller);
                log.lock().push(i);
            }));
        }
        executor.shutdown();
        assert_eq!(*log.lock(), (0..100).collect::<Vec<_>>());
    }
}
