//! Scheduler implementation

use std::collections::HashMap;
use std::num::NonZeroU64;

use tracing::{debug, warn};

use crate::events::{Event, EventLog, Reason};

use super::error::SchedulerError;
use super::menu::Menu;
use super::queue::{BoundedQueue, SchedulerStats, Task};
use super::snapshot::{QueueSnapshot, Snapshot};

/// Round-robin scheduler over a fixed visitation order of bounded queues
///
/// Every public operation runs to completion and returns the events it
/// produced. Failures never escape as `Err`: they become `error` events.
///
/// Invariants held between operations:
/// - `cursor < order.len()` whenever `order` is non-empty
/// - every queued task has `remaining > 0`
/// - `clock` only grows, and only by work actually performed
pub struct Scheduler {
    menu: Menu,

    /// Queue id to queue; entries are never removed
    queues: HashMap<String, BoundedQueue>,

    /// Queue ids in creation order, without duplicates
    order: Vec<String>,

    /// One-shot skip flags, consumed by the next turn on that queue
    skip_pending: HashMap<String, bool>,

    /// Index into `order` of the queue the next turn visits
    cursor: usize,

    /// Global time in work units
    clock: u64,

    stats: SchedulerStats,
}

impl Scheduler {
    /// Create a scheduler serving the given menu
    pub fn new(menu: Menu) -> Self {
        debug!(items = menu.len(), "Scheduler::new: called");
        Self {
            menu,
            queues: HashMap::new(),
            order: Vec::new(),
            skip_pending: HashMap::new(),
            cursor: 0,
            clock: 0,
            stats: SchedulerStats::default(),
        }
    }

    /// Bind `queue_id` to a fresh, empty queue
    ///
    /// Re-creating an existing id discards its tasks and id counter but keeps
    /// its slot in the visitation order and any pending skip. A capacity whose
    /// buffer cannot be allocated yields an `exception` error and leaves any
    /// existing queue untouched.
    pub fn create_queue(&mut self, queue_id: &str, capacity: usize) -> EventLog {
        debug!(%queue_id, capacity, "Scheduler::create_queue: called");
        let queue = match BoundedQueue::new(queue_id, capacity) {
            Ok(queue) => queue,
            Err(e) => {
                warn!(%queue_id, error = %e, "Scheduler::create_queue: allocation failed");
                return vec![Self::error_event(self.clock, None, &e)];
            }
        };
        if self.queues.insert(queue_id.to_string(), queue).is_some() {
            debug!(%queue_id, "Scheduler::create_queue: replacing existing queue in place");
        } else {
            self.order.push(queue_id.to_string());
            self.skip_pending.insert(queue_id.to_string(), false);
        }
        vec![Event::create(self.clock, queue_id)]
    }

    /// Submit an order for `item` to `queue_id`
    ///
    /// A task id is drawn from the queue's counter as soon as the queue is
    /// found, so rejected submissions leave gaps in the numbering.
    pub fn submit(&mut self, queue_id: &str, item: &str) -> EventLog {
        debug!(%queue_id, %item, "Scheduler::submit: called");
        let clock = self.clock;
        let cost = self.menu.cost(item);

        let queue = match self.queue_mut(queue_id) {
            Ok(queue) => queue,
            Err(e) => return vec![Self::error_event(clock, Some(queue_id), &e)],
        };
        let task_id = queue.next_task_id();

        let Some(cost) = cost else {
            debug!(%queue_id, %task_id, %item, "Scheduler::submit: item not on menu");
            self.stats.total_rejected += 1;
            return vec![Event::reject(clock, queue_id, &task_id, Reason::UnknownItem)];
        };

        let task = Task::new(task_id, cost);
        let event = Event::enqueue(clock, queue_id, &task.id, task.remaining);
        if let Err(task) = queue.enqueue(task) {
            debug!(%queue_id, task_id = %task.id, "Scheduler::submit: queue full");
            self.stats.total_rejected += 1;
            return vec![Event::reject(clock, queue_id, &task.id, Reason::Full)];
        }

        let depth = queue.len();
        self.stats.total_enqueued += 1;
        self.stats.peak_queue_depth = self.stats.peak_queue_depth.max(depth);
        vec![event]
    }

    /// Flag `queue_id` so its next turn is forfeited
    pub fn mark_skip(&mut self, queue_id: &str) -> EventLog {
        debug!(%queue_id, "Scheduler::mark_skip: called");
        if let Err(e) = self.ensure_queue(queue_id) {
            return vec![Self::error_event(self.clock, Some(queue_id), &e)];
        }
        self.skip_pending.insert(queue_id.to_string(), true);
        vec![Event::skip(self.clock, queue_id)]
    }

    /// Queue the next turn will visit, or `None` when no queues exist
    pub fn next_queue_id(&self) -> Option<&str> {
        if self.order.is_empty() {
            return None;
        }
        let index = if self.cursor < self.order.len() { self.cursor } else { 0 };
        Some(self.order[index].as_str())
    }

    /// Execute turns
    ///
    /// With `steps`, runs exactly that many turns; `steps` must lie in
    /// `1..=max(1, queue count)` or a single `invalid_steps` error is returned
    /// and nothing runs. Without `steps`, runs until every queue is empty and
    /// no skip is pending. A queue that keeps being refilled between turns is
    /// never quiescent, so callers needing a bound must pass `steps`.
    pub fn run(&mut self, quantum: NonZeroU64, steps: Option<i64>) -> EventLog {
        debug!(quantum = quantum.get(), ?steps, "Scheduler::run: called");
        let mut events = Vec::new();

        match steps {
            Some(steps) => {
                let steps = match self.validate_steps(steps) {
                    Ok(steps) => steps,
                    Err(e) => {
                        debug!(error = %e, "Scheduler::run: rejecting steps");
                        events.push(Self::error_event(self.clock, None, &e));
                        return events;
                    }
                };
                for _ in 0..steps {
                    if self.order.is_empty() {
                        debug!("Scheduler::run: no queues, emitting empty run");
                        events.push(Event::run(self.clock, None));
                        continue;
                    }
                    self.turn(quantum.get(), &mut events);
                }
            }
            None => {
                while !self.is_quiescent() {
                    self.turn(quantum.get(), &mut events);
                }
            }
        }

        debug!(events = events.len(), clock = self.clock, "Scheduler::run: done");
        events
    }

    /// Every queue is empty and no skip is pending
    pub fn is_quiescent(&self) -> bool {
        self.queues.values().all(BoundedQueue::is_empty) && !self.skip_pending.values().any(|pending| *pending)
    }

    /// Current state for display
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.clock,
            next: self.next_queue_id().map(str::to_string),
            menu: self.menu.iter().map(|(name, cost)| (name.to_string(), cost)).collect(),
            queues: self
                .order
                .iter()
                .filter_map(|queue_id| self.queues.get(queue_id))
                .map(|queue| QueueSnapshot {
                    queue_id: queue.queue_id().to_string(),
                    len: queue.len(),
                    capacity: queue.capacity(),
                    skip_pending: self.is_skip_pending(queue.queue_id()),
                    tasks: queue.iter().cloned().collect(),
                })
                .collect(),
        }
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn queue(&self, queue_id: &str) -> Option<&BoundedQueue> {
        self.queues.get(queue_id)
    }

    /// Queue ids in visitation order
    pub fn queue_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn is_skip_pending(&self, queue_id: &str) -> bool {
        self.skip_pending.get(queue_id).copied().unwrap_or(false)
    }

    /// One visit to the queue under the cursor, then advance the cursor
    fn turn(&mut self, quantum: u64, events: &mut EventLog) {
        if self.cursor >= self.order.len() {
            warn!(cursor = self.cursor, len = self.order.len(), "Scheduler::turn: cursor out of range, resetting");
            self.cursor = 0;
        }
        let queue_id = self.order[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.order.len();
        self.stats.total_turns += 1;

        events.push(Event::run(self.clock, Some(&queue_id)));

        // Skip wins over work, even when tasks are waiting
        if self.is_skip_pending(&queue_id) {
            debug!(%queue_id, "Scheduler::turn: consuming skip");
            self.skip_pending.insert(queue_id.clone(), false);
            self.stats.total_skips_consumed += 1;
            events.push(Event::skip(self.clock, &queue_id));
            return;
        }

        let Some(queue) = self.queues.get_mut(&queue_id) else {
            warn!(%queue_id, "Scheduler::turn: queue in order but not in map");
            return;
        };
        let Some(mut task) = queue.dequeue() else {
            debug!(%queue_id, "Scheduler::turn: queue empty");
            return;
        };

        let worked = u32::try_from(quantum).map_or(task.remaining, |quantum| task.remaining.min(quantum));
        self.clock += u64::from(worked);
        task.remaining -= worked;
        debug!(%queue_id, task_id = %task.id, worked, remaining = task.remaining, "Scheduler::turn: worked");

        if task.remaining == 0 {
            events.push(Event::work(self.clock, &queue_id, &task.id, 0));
            events.push(Event::finish(self.clock, &queue_id, &task.id));
            self.stats.total_finished += 1;
            return;
        }

        let event = Event::work(self.clock, &queue_id, &task.id, task.remaining);
        // The dequeue above freed a slot, so this cannot hit capacity
        if let Err(task) = queue.enqueue(task) {
            warn!(%queue_id, task_id = %task.id, "Scheduler::turn: requeue failed, dropping task");
        }
        events.push(event);
    }

    fn validate_steps(&self, steps: i64) -> Result<usize, SchedulerError> {
        let max = self.order.len().max(1);
        match usize::try_from(steps) {
            Ok(n) if (1..=max).contains(&n) => Ok(n),
            _ => Err(SchedulerError::InvalidSteps { steps, max }),
        }
    }

    fn ensure_queue(&self, queue_id: &str) -> Result<(), SchedulerError> {
        if self.queues.contains_key(queue_id) {
            Ok(())
        } else {
            Err(SchedulerError::UnknownQueue(queue_id.to_string()))
        }
    }

    fn queue_mut(&mut self, queue_id: &str) -> Result<&mut BoundedQueue, SchedulerError> {
        self.queues
            .get_mut(queue_id)
            .ok_or_else(|| SchedulerError::UnknownQueue(queue_id.to_string()))
    }

    fn error_event(clock: u64, queue_id: Option<&str>, error: &SchedulerError) -> Event {
        Event::error(clock, queue_id, error.reason())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Menu::default())
    }
}
