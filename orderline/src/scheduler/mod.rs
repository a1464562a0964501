//! Round-robin scheduler over bounded queues
//!
//! Owns the queues, their visitation order, the skip flags, the cursor and
//! the global clock. Each turn visits one queue, works its front task for at
//! most one quantum, and either finishes it or puts it back at the tail.

mod core;
mod error;
mod menu;
mod queue;
mod snapshot;

pub use core::Scheduler;
pub use error::SchedulerError;
pub use menu::{Menu, MenuError};
pub use queue::{BoundedQueue, SchedulerStats, Task};
pub use snapshot::{QueueSnapshot, Snapshot};
