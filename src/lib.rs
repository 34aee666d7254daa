#![deny(missing_docs)]

//! A fixed-size worker thread pool with a shared blocking task queue.
//!
//! Callers submit closures to the pool and get back a [`TaskHandle`] through
//! which the eventual value, or the failure the closure raised, is retrieved.
//! Submission never blocks; workers pull tasks off a single FIFO queue and
//! execute them, catching panics so a bad task never takes a worker down.
//! Dropping the pool releases every blocked worker and joins them all.
//!
//! # Example
//!
//! ```
//! use taskpool::TaskPool;
//!
//! let pool = TaskPool::new(2)?;
//! let handle = pool.submit(|| 21 * 2);
//! assert_eq!(handle.wait()?, 42);
//! # Ok::<(), taskpool::PoolError>(())
//! ```

mod error;
mod handle;
mod pool;
mod queue;
mod sink;
mod task;
mod worker;

pub use error::{PoolError, Result};
pub use handle::TaskHandle;
pub use pool::TaskPool;
pub use sink::{FailureSink, LogSink};
