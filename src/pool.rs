use std::sync::Arc;

use crossbeam::channel;
use log::debug;

use crate::error::Result;
use crate::handle::TaskHandle;
use crate::queue::TaskQueue;
use crate::sink::{FailureSink, LogSink};
use crate::task::Task;
use crate::worker::Worker;

/// A fixed-size pool of worker threads sharing one blocking task queue.
///
/// The pool owns the queue and the workers. Submitted closures run on some
/// worker in FIFO dequeue order; with more than one worker, completion order
/// across tasks is unspecified. Dropping the pool invalidates the queue,
/// releases every blocked worker, and joins them all.
pub struct TaskPool {
    queue: Arc<TaskQueue>,
    workers: Vec<Worker>,
}

impl TaskPool {
    /// Creates a pool with the given number of worker threads.
    ///
    /// A worker count of zero is legal but degenerate: submitted tasks
    /// accumulate and are never executed. Task failures are reported through
    /// the `log` facade; use [`TaskPool::with_sink`] to inject another sink.
    ///
    /// # Errors
    ///
    /// Returns an error if any worker thread fails to spawn. Workers spawned
    /// before the failure are stopped and joined.
    pub fn new(workers: usize) -> Result<TaskPool> {
        Self::with_sink(workers, Arc::new(LogSink))
    }

    /// Creates a pool with one worker per logical CPU.
    pub fn with_cpu_workers() -> Result<TaskPool> {
        Self::new(num_cpus::get())
    }

    /// Creates a pool that reports task failures to the given sink.
    pub fn with_sink(workers: usize, sink: Arc<dyn FailureSink>) -> Result<TaskPool> {
        let queue = Arc::new(TaskQueue::new());
        let mut spawned = Vec::with_capacity(workers);

        for id in 0..workers {
            match Worker::spawn(id, queue.clone(), sink.clone()) {
                Ok(worker) => spawned.push(worker),
                Err(e) => {
                    queue.invalidate();
                    for worker in &mut spawned {
                        worker.stop();
                    }
                    return Err(e);
                }
            }
        }

        debug!("Started pool with {} workers", spawned.len());
        Ok(TaskPool {
            queue,
            workers: spawned,
        })
    }

    /// Submits a closure for execution, returning immediately with a handle
    /// to its eventual result.
    ///
    /// Submission never blocks. After [`TaskPool::shutdown`] the task is
    /// still accepted but never runs; its handle resolves as discarded.
    pub fn submit<F, T>(&self, f: F) -> TaskHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = channel::bounded(1);
        self.queue.push(Task::new(f, tx));
        TaskHandle::new(rx)
    }

    /// Drops every not-yet-started task without executing it.
    ///
    /// Workers keep running and will pick up tasks submitted afterwards.
    /// Handles of the dropped tasks resolve as discarded.
    pub fn discard_pending(&self) {
        self.queue.clear();
    }

    /// The number of worker threads in the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Whether any submitted task is still waiting to be dequeued.
    /// Snapshot for diagnostics; stale by the time the caller looks at it.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Shuts the pool down, blocking until every worker has exited.
    ///
    /// The queue is invalidated first so that workers blocked in an empty
    /// dequeue are released; only then are the workers stopped and joined.
    /// Pending tasks are not executed. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        self.queue.invalidate();
        for worker in &mut self.workers {
            worker.stop();
        }
        debug!("Pool shut down");
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
