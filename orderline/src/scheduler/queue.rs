//! Queue types for the scheduler

use serde::{Deserialize, Serialize};

use super::error::SchedulerError;

/// One order waiting in a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `<queue-id>-<NNN>`, unique within the owning queue
    pub id: String,
    /// Work units still owed
    pub remaining: u32,
}

impl Task {
    /// Create a new task
    pub fn new(id: impl Into<String>, remaining: u32) -> Self {
        Self {
            id: id.into(),
            remaining,
        }
    }
}

/// Fixed-capacity FIFO of tasks backed by a ring buffer
///
/// The buffer is allocated once at creation and never grows. Enqueue and
/// dequeue are O(1). A capacity of zero is legal and rejects every task.
/// Creation fails instead of aborting when the buffer cannot be allocated.
#[derive(Debug, Clone)]
pub struct BoundedQueue {
    queue_id: String,
    capacity: usize,
    slots: Vec<Option<Task>>,
    head: usize,
    len: usize,
    next_task_num: u32,
}

impl BoundedQueue {
    /// Create an empty queue
    pub fn new(queue_id: impl Into<String>, capacity: usize) -> Result<Self, SchedulerError> {
        let size = capacity.max(1);
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|_| SchedulerError::Allocation { capacity })?;
        slots.resize_with(size, || None);
        Ok(Self {
            queue_id: queue_id.into(),
            capacity,
            slots,
            head: 0,
            len: 0,
            next_task_num: 1,
        })
    }

    pub fn queue_id(&self) -> &str {
        &self.queue_id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    /// Append at the back; returns the task back if the queue is full
    pub fn enqueue(&mut self, task: Task) -> Result<(), Task> {
        if self.is_full() {
            return Err(task);
        }
        let pos = self.slot(self.len);
        self.slots[pos] = Some(task);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the front task
    pub fn dequeue(&mut self) -> Option<Task> {
        if self.len == 0 {
            return None;
        }
        let task = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        task
    }

    /// The task that would be served next
    pub fn peek(&self) -> Option<&Task> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Tasks from front to back, without removing them
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        (0..self.len).filter_map(move |offset| self.slots[self.slot(offset)].as_ref())
    }

    /// Issue the next task id for this queue
    ///
    /// The counter only moves forward: ids are never reused, even for
    /// submissions that end up rejected.
    pub fn next_task_id(&mut self) -> String {
        let id = format!("{}-{:03}", self.queue_id, self.next_task_num);
        self.next_task_num += 1;
        id
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }
}

/// Statistics for the scheduler
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    pub total_enqueued: u64,
    pub total_rejected: u64,
    pub total_turns: u64,
    pub total_skips_consumed: u64,
    pub total_finished: u64,
    pub peak_queue_depth: usize,
}
