//! Structured event log
//!
//! Every public scheduler operation returns the events it produced, in
//! emission order. Events render either as `key=value` text or as JSON lines.
//!
//! ```rust,ignore
//! use orderline::events::{Event, OutputFormat};
//!
//! let event = Event::create(0, "Q1");
//! assert_eq!(OutputFormat::Text.render(&event)?, "time=0 event=create queue=Q1");
//! ```

mod format;
mod types;

pub use format::OutputFormat;
pub use types::{Event, EventKind, Reason};

/// Ordered events produced by one operation
pub type EventLog = Vec<Event>;
