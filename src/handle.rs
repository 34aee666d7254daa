use crossbeam::channel::{Receiver, TryRecvError};

use crate::error::PoolError;
use crate::Result;

/// Handle to the eventual result of a submitted task.
///
/// Exactly one worker fulfills the handle, exactly once. If the task is
/// dropped before execution (backlog discarded, or the pool shut down with
/// the task still queued) the handle resolves to [`PoolError::Discarded`]
/// instead of blocking forever.
pub struct TaskHandle<T> {
    rx: Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(rx: Receiver<Result<T>>) -> Self {
        TaskHandle { rx }
    }

    /// Blocks the calling thread until the task has run, returning its value
    /// or the failure it raised.
    pub fn wait(self) -> Result<T> {
        self.rx.recv().unwrap_or(Err(PoolError::Discarded))
    }

    /// Non-blocking completion query; consumes the result when ready.
    ///
    /// Returns `None` while the task has not yet produced a result.
    pub fn try_wait(&self) -> Option<Result<T>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PoolError::Discarded)),
        }
    }

    /// Returns `true` if a result is ready to be collected.
    pub fn is_finished(&self) -> bool {
        !self.rx.is_empty()
    }
}
