//! Orderline - round-robin order line simulator
//!
//! Clients create bounded queues, submit named menu items that map to fixed
//! processing costs, mark queues for a one-time skip, and drive time forward
//! by running scheduling turns. Every state change is reported as a
//! structured event.
//!
//! # Modules
//!
//! - [`scheduler`] - bounded queues and the round-robin turn engine
//! - [`events`] - event log types and rendering
//! - [`repl`] - line-oriented command session driving a scheduler
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroU64;
//! use orderline::Scheduler;
//!
//! let mut scheduler = Scheduler::default();
//! scheduler.create_queue("Q1", 2);
//! scheduler.submit("Q1", "americano");
//! let events = scheduler.run(NonZeroU64::new(2).unwrap(), None);
//! assert_eq!(events.last().unwrap().to_string(), "time=2 event=finish queue=Q1 task=Q1-001");
//! ```

pub mod cli;
pub mod config;
pub mod events;
pub mod repl;
pub mod scheduler;

// Re-export commonly used types
pub use config::Config;
pub use events::{Event, EventKind, EventLog, OutputFormat, Reason};
pub use repl::{Command, CommandError, Session, run_session};
pub use scheduler::{BoundedQueue, Menu, MenuError, Scheduler, SchedulerError, SchedulerStats, Snapshot, Task};
