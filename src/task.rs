use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crossbeam::channel::Sender;

use crate::error::PoolError;
use crate::Result;

/// What happened when a task ran.
pub(crate) enum Outcome {
    /// The closure returned normally; its value was delivered to the handle.
    Done,
    /// The closure panicked; the description was delivered to the handle
    /// and should also go to the failure sink.
    Failed(String),
}

/// A queued unit of work.
///
/// Created at submission time by pairing the caller's closure with the
/// sending half of its result channel, erased to a uniform zero-argument
/// form so the queue and workers stay ignorant of the return type.
pub(crate) struct Task {
    job: Box<dyn FnOnce() -> Outcome + Send + 'static>,
}

impl Task {
    /// Wraps a closure so that running it captures the return value, or the
    /// panic it raised, into the paired result channel.
    pub(crate) fn new<F, T>(f: F, tx: Sender<Result<T>>) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        Task {
            job: Box::new(move || match panic::catch_unwind(AssertUnwindSafe(f)) {
                Ok(value) => {
                    // The handle may already be dropped; that's fine.
                    let _ = tx.send(Ok(value));
                    Outcome::Done
                }
                Err(payload) => {
                    let description = panic_description(payload.as_ref());
                    let _ = tx.send(Err(PoolError::Panicked(description.clone())));
                    Outcome::Failed(description)
                }
            }),
        }
    }

    /// Executes the task on the calling thread. Panics never escape.
    pub(crate) fn run(self) -> Outcome {
        (self.job)()
    }
}

/// Extracts a human-readable message from a panic payload.
fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
