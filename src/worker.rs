use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{debug, error};

use crate::queue::TaskQueue;
use crate::sink::FailureSink;
use crate::task::Outcome;
use crate::Result;

/// A single worker thread bound to the shared task queue.
///
/// The loop blocks in `pop()` between tasks, so the stop flag alone cannot
/// release an idle worker; the pool always invalidates the queue before
/// stopping workers.
pub(crate) struct Worker {
    id: usize,
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    /// Spawns a worker thread that pulls tasks from the queue until the
    /// queue is invalidated or the stop flag is set.
    pub(crate) fn spawn(
        id: usize,
        queue: Arc<TaskQueue>,
        sink: Arc<dyn FailureSink>,
    ) -> Result<Worker> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let thread = thread::Builder::new()
            .name(format!("pool-worker-{id}"))
            .spawn(move || {
                while !stop_flag.load(Ordering::Acquire) {
                    let Some(task) = queue.pop() else {
                        debug!("Worker {id}: queue invalidated, shutting down");
                        break;
                    };
                    debug!("Worker {id} executing task");
                    if let Outcome::Failed(description) = task.run() {
                        sink.task_failed(&description);
                    }
                }
            })?;

        Ok(Worker {
            id,
            stop,
            thread: Some(thread),
        })
    }

    /// Sets the stop flag and joins the worker thread.
    ///
    /// Idempotent. The caller must have invalidated the queue already, or
    /// the join can block indefinitely on an idle worker.
    pub(crate) fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Worker {} thread panicked", self.id);
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}
