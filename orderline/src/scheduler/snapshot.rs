//! Point-in-time view of scheduler state

use std::fmt;

use serde::Serialize;

use super::queue::Task;

/// State of one queue for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    pub queue_id: String,
    pub len: usize,
    pub capacity: usize,
    pub skip_pending: bool,
    /// Front to back
    pub tasks: Vec<Task>,
}

/// Whole-engine state for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub time: u64,
    /// Queue the next turn will visit
    pub next: Option<String>,
    /// Sorted by name
    pub menu: Vec<(String, u32)>,
    /// In creation order
    pub queues: Vec<QueueSnapshot>,
}

impl Snapshot {
    /// The rendered display block, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.queues.len() + 2);
        lines.push(format!(
            "display time={} next={}",
            self.time,
            self.next.as_deref().unwrap_or("none")
        ));

        let menu = self
            .menu
            .iter()
            .map(|(name, cost)| format!("{}:{}", name, cost))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(format!("display menu=[{}]", menu));

        for queue in &self.queues {
            lines.push(queue.to_string());
        }
        lines
    }
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let skip = if self.skip_pending { " [ skip]" } else { "" };
        let tasks = self
            .tasks
            .iter()
            .map(|t| format!("{}:{}", t.id, t.remaining))
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "display {} [{}/{}]{} -> [{}]",
            self.queue_id, self.len, self.capacity, skip, tasks
        )
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
