use log::error;

/// Receives human-readable descriptions of task failures.
///
/// Injected into the pool so the concurrency core stays testable in
/// isolation; workers call it after a task fails and then keep running.
pub trait FailureSink: Send + Sync {
    /// Reports that a task failed with the given description.
    fn task_failed(&self, description: &str);
}

/// Default sink that reports failures through the `log` facade.
pub struct LogSink;

impl FailureSink for LogSink {
    fn task_failed(&self, description: &str) {
        error!("Could not execute task: {description}");
    }
}
