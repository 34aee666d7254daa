use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::task::Task;

/// A thread-safe blocking FIFO of pending tasks.
///
/// The pending sequence and the validity flag live under a single mutex so
/// that a consumer which finds the queue empty cannot miss a push that lands
/// between its check and its wait. Once invalidated the queue never becomes
/// valid again; blocked consumers are released and observe the closed state.
pub(crate) struct TaskQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

struct QueueState {
    tasks: VecDeque<Task>,
    valid: bool,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        TaskQueue {
            state: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                valid: true,
            }),
            available: Condvar::new(),
        }
    }

    /// Appends a task and wakes one waiting consumer. Never blocks.
    ///
    /// Pushing after invalidation still appends, but no worker will ever
    /// consume the task; its handle resolves as discarded when the queue is
    /// dropped. Accepted limitation rather than a silent failure.
    pub(crate) fn push(&self, task: Task) {
        let mut state = self.state.lock().unwrap();
        state.tasks.push_back(task);
        self.available.notify_one();
    }

    /// Removes and returns the head task, blocking while the queue is empty
    /// and still valid.
    ///
    /// Returns `None` once the queue has been invalidated, without consuming
    /// anything. The wait predicate is re-checked after every wake, so
    /// spurious wakeups with an empty queue simply go back to waiting.
    pub(crate) fn pop(&self) -> Option<Task> {
        let mut state = self.state.lock().unwrap();
        loop {
            if !state.valid {
                return None;
            }
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            state = self.available.wait(state).unwrap();
        }
    }

    /// Marks the queue closed and wakes every blocked consumer.
    ///
    /// Idempotent; calls after the first are no-ops.
    pub(crate) fn invalidate(&self) {
        let mut state = self.state.lock().unwrap();
        state.valid = false;
        self.available.notify_all();
    }

    /// Drops every pending task without executing it and wakes all waiters.
    ///
    /// The queue stays valid; workers keep running and will consume tasks
    /// pushed afterwards. Handles of the dropped tasks resolve as discarded.
    pub(crate) fn clear(&self) {
        let drained: Vec<Task> = {
            let mut state = self.state.lock().unwrap();
            let drained = state.tasks.drain(..).collect();
            self.available.notify_all();
            drained
        };
        // Dropping a task drops its result sender; do that outside the lock.
        drop(drained);
    }

    /// Point-in-time snapshot; diagnostics only.
    pub(crate) fn is_empty(&self) -> bool {
        self.state.lock().unwrap().tasks.is_empty()
    }

    /// Point-in-time snapshot; diagnostics only.
    pub(crate) fn is_valid(&self) -> bool {
        self.state.lock().unwrap().valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::{bounded, Receiver};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn noop_task() -> (Task, Receiver<crate::Result<()>>) {
        let (tx, rx) = bounded(1);
        (Task::new(|| (), tx), rx)
    }

    #[test]
    fn pop_returns_tasks_in_push_order() {
        let queue = TaskQueue::new();
        let (order_tx, order_rx) = bounded(3);
        for i in 0..3 {
            let (tx, _rx) = bounded(1);
            let order_tx = order_tx.clone();
            queue.push(Task::new(
                move || order_tx.send(i).unwrap(),
                tx,
            ));
        }
        for _ in 0..3 {
            queue.pop().unwrap().run();
        }
        let order: Vec<i32> = order_rx.try_iter().collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn invalidate_releases_all_blocked_consumers() {
        let queue = Arc::new(TaskQueue::new());
        let (done_tx, done_rx) = bounded(4);

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                let done_tx = done_tx.clone();
                thread::spawn(move || {
                    let popped = queue.pop();
                    done_tx.send(popped.is_none()).unwrap();
                })
            })
            .collect();

        // Give the consumers time to block.
        thread::sleep(Duration::from_millis(50));
        queue.invalidate();

        for _ in 0..4 {
            let observed_closed = done_rx
                .recv_timeout(Duration::from_secs(2))
                .expect("blocked consumer was not released");
            assert!(observed_closed);
        }
        for consumer in consumers {
            consumer.join().unwrap();
        }
    }

    #[test]
    fn invalidate_is_idempotent() {
        let queue = TaskQueue::new();
        queue.invalidate();
        queue.invalidate();
        assert!(!queue.is_valid());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn pop_on_invalidated_queue_consumes_nothing() {
        let queue = TaskQueue::new();
        let (task, _rx) = noop_task();
        queue.push(task);
        queue.invalidate();
        assert!(queue.pop().is_none());
        assert!(!queue.is_empty());
    }

    #[test]
    fn clear_drops_pending_without_executing() {
        let queue = TaskQueue::new();
        let mut receivers = Vec::new();
        for _ in 0..5 {
            let (task, rx) = noop_task();
            queue.push(task);
            receivers.push(rx);
        }
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.is_valid());
        for rx in receivers {
            // Sender dropped without sending: the task never ran.
            assert!(rx.recv().is_err());
        }
    }
}
