//! Scheduler errors

use thiserror::Error;

use crate::events::Reason;

/// Faults raised inside the scheduler
///
/// These never escape a public operation: each one is turned into an
/// `error` event carrying [`SchedulerError::reason`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Queue not found: {0}")]
    UnknownQueue(String),

    #[error("Steps {steps} outside 1..={max}")]
    InvalidSteps { steps: i64, max: usize },

    #[error("Cannot allocate a queue of capacity {capacity}")]
    Allocation { capacity: usize },
}

impl SchedulerError {
    /// Reason code for the event log
    pub fn reason(&self) -> Reason {
        match self {
            SchedulerError::UnknownQueue(_) => Reason::UnknownQueue,
            SchedulerError::InvalidSteps { .. } => Reason::InvalidSteps,
            SchedulerError::Allocation { .. } => Reason::Exception,
        }
    }
}
