//! Event types for the order line
//!
//! Every state change in the scheduler produces one [`Event`]. Events carry
//! the clock value at the moment they were emitted plus whichever of
//! `queue`, `task`, `remaining` and `reason` apply to their kind:
//!
//! | kind    | queue | task | remaining | reason |
//! |---------|-------|------|-----------|--------|
//! | create  | yes   |      |           |        |
//! | enqueue | yes   | yes  | yes       |        |
//! | reject  | yes   | yes  |           | yes    |
//! | skip    | yes   |      |           |        |
//! | run     | maybe |      |           |        |
//! | work    | yes   | yes  | yes       |        |
//! | finish  | yes   | yes  |           |        |
//! | error   | maybe |      |           | yes    |

use std::fmt;

use serde::{Deserialize, Serialize};

/// The vocabulary of order line activity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A queue was created (or re-created)
    Create,
    /// A task was accepted into a queue
    Enqueue,
    /// A submission was refused for a business reason
    Reject,
    /// A skip flag was set, or consumed by a turn
    Skip,
    /// A turn visited a queue
    Run,
    /// A task received work during a turn
    Work,
    /// A task reached zero remaining and left its queue
    Finish,
    /// An operation failed
    Error,
}

impl EventKind {
    /// Name used in the rendered log
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Enqueue => "enqueue",
            EventKind::Reject => "reject",
            EventKind::Skip => "skip",
            EventKind::Run => "run",
            EventKind::Work => "work",
            EventKind::Finish => "finish",
            EventKind::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason codes attached to `reject` and `error` events
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    // === Rejections ===
    /// The item is not on the menu
    UnknownItem,
    /// The queue is at capacity
    Full,

    // === Engine errors ===
    /// The queue id was never created
    UnknownQueue,
    /// The steps argument is outside `[1, queue count]`
    InvalidSteps,

    // === Driver errors ===
    /// Wrong number or range of command arguments
    InvalidArgs,
    /// The command keyword is not recognized
    UnknownCommand,
    /// A command argument could not be interpreted
    Exception,
}

impl Reason {
    /// Code used in the rendered log
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::UnknownItem => "unknown_item",
            Reason::Full => "full",
            Reason::UnknownQueue => "unknown_queue",
            Reason::InvalidSteps => "invalid_steps",
            Reason::InvalidArgs => "invalid_args",
            Reason::UnknownCommand => "unknown_command",
            Reason::Exception => "exception",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the event log
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Clock value at emission
    pub time: u64,
    /// What happened
    pub event: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
}

impl Event {
    fn bare(time: u64, event: EventKind) -> Self {
        Self {
            time,
            event,
            queue: None,
            task: None,
            remaining: None,
            reason: None,
        }
    }

    fn on_queue(time: u64, event: EventKind, queue: &str) -> Self {
        Self {
            queue: Some(queue.to_string()),
            ..Self::bare(time, event)
        }
    }

    pub fn create(time: u64, queue: &str) -> Self {
        Self::on_queue(time, EventKind::Create, queue)
    }

    pub fn enqueue(time: u64, queue: &str, task: &str, remaining: u32) -> Self {
        Self {
            task: Some(task.to_string()),
            remaining: Some(remaining),
            ..Self::on_queue(time, EventKind::Enqueue, queue)
        }
    }

    pub fn reject(time: u64, queue: &str, task: &str, reason: Reason) -> Self {
        Self {
            task: Some(task.to_string()),
            reason: Some(reason),
            ..Self::on_queue(time, EventKind::Reject, queue)
        }
    }

    pub fn skip(time: u64, queue: &str) -> Self {
        Self::on_queue(time, EventKind::Skip, queue)
    }

    /// A turn visiting `queue`, or a no-op turn when no queues exist
    pub fn run(time: u64, queue: Option<&str>) -> Self {
        Self {
            queue: queue.map(str::to_string),
            ..Self::bare(time, EventKind::Run)
        }
    }

    /// Work credited to a task; `remaining` is the post-work value
    pub fn work(time: u64, queue: &str, task: &str, remaining: u32) -> Self {
        Self {
            task: Some(task.to_string()),
            remaining: Some(remaining),
            ..Self::on_queue(time, EventKind::Work, queue)
        }
    }

    pub fn finish(time: u64, queue: &str, task: &str) -> Self {
        Self {
            task: Some(task.to_string()),
            ..Self::on_queue(time, EventKind::Finish, queue)
        }
    }

    pub fn error(time: u64, queue: Option<&str>, reason: Reason) -> Self {
        Self {
            queue: queue.map(str::to_string),
            reason: Some(reason),
            ..Self::bare(time, EventKind::Error)
        }
    }

    /// Whether this is a `reject` event with the given reason
    pub fn is_reject(&self, reason: Reason) -> bool {
        self.event == EventKind::Reject && self.reason == Some(reason)
    }
}

/// Renders `key=value` pairs in the fixed order
/// `time, event, queue, task, remaining, reason`, skipping absent fields.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time={} event={}", self.time, self.event)?;
        if let Some(queue) = &self.queue {
            write!(f, " queue={}", queue)?;
        }
        if let Some(task) = &self.task {
            write!(f, " task={}", task)?;
        }
        if let Some(remaining) = self.remaining {
            write!(f, " remaining={}", remaining)?;
        }
        if let Some(reason) = self.reason {
            write!(f, " reason={}", reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rendering_field_order() {
        let event = Event::enqueue(4, "Q1", "Q1-001", 2);
        assert_eq!(event.to_string(), "time=4 event=enqueue queue=Q1 task=Q1-001 remaining=2");

        let event = Event::reject(0, "Q1", "Q1-002", Reason::UnknownItem);
        assert_eq!(event.to_string(), "time=0 event=reject queue=Q1 task=Q1-002 reason=unknown_item");
    }

    #[test]
    fn test_text_rendering_omits_absent_fields() {
        assert_eq!(Event::run(0, None).to_string(), "time=0 event=run");
        assert_eq!(
            Event::error(7, None, Reason::InvalidSteps).to_string(),
            "time=7 event=error reason=invalid_steps"
        );
        assert_eq!(
            Event::error(7, Some("Q9"), Reason::UnknownQueue).to_string(),
            "time=7 event=error queue=Q9 reason=unknown_queue"
        );
        assert_eq!(Event::finish(3, "Q1", "Q1-001").to_string(), "time=3 event=finish queue=Q1 task=Q1-001");
    }

    #[test]
    fn test_work_with_zero_remaining_renders_zero() {
        let event = Event::work(2, "Q1", "Q1-001", 0);
        assert_eq!(event.to_string(), "time=2 event=work queue=Q1 task=Q1-001 remaining=0");
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let json = serde_json::to_string(&Event::skip(5, "B")).unwrap();
        assert_eq!(json, r#"{"time":5,"event":"skip","queue":"B"}"#);

        let json = serde_json::to_string(&Event::reject(1, "A", "A-003", Reason::Full)).unwrap();
        assert_eq!(json, r#"{"time":1,"event":"reject","queue":"A","task":"A-003","reason":"full"}"#);
    }

    #[test]
    fn test_json_deserializes_back() {
        let event = Event::work(9, "A", "A-001", 1);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_is_reject() {
        let event = Event::reject(0, "Q", "Q-001", Reason::Full);
        assert!(event.is_reject(Reason::Full));
        assert!(!event.is_reject(Reason::UnknownItem));
        assert!(!Event::create(0, "Q").is_reject(Reason::Full));
    }
}
