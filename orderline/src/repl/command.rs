//! Session commands and their argument validation

use std::num::{IntErrorKind, NonZeroU64};

use thiserror::Error;

use crate::events::Reason;

/// Faults in session input, caught before anything reaches the scheduler
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{keyword}: expected {expected}, got {got} argument(s)")]
    InvalidArgs {
        keyword: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("RUN: quantum must be at least 1, got {0}")]
    InvalidQuantum(i64),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Cannot interpret '{value}' as {what}")]
    Exception { value: String, what: &'static str },
}

impl CommandError {
    /// Reason code for the event log
    pub fn reason(&self) -> Reason {
        match self {
            CommandError::InvalidArgs { .. } | CommandError::InvalidQuantum(_) => Reason::InvalidArgs,
            CommandError::UnknownCommand(_) => Reason::UnknownCommand,
            CommandError::Exception { .. } => Reason::Exception,
        }
    }
}

/// A validated session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `CREATE id capacity`
    Create { queue_id: String, capacity: usize },
    /// `ENQ queueId item`
    Enqueue { queue_id: String, item: String },
    /// `SKIP queueId`
    Skip { queue_id: String },
    /// `RUN quantum [steps]`
    Run { quantum: NonZeroU64, steps: Option<i64> },
}

impl Command {
    /// Validate a keyword and its arguments
    ///
    /// Argument counts are checked before argument values. A negative
    /// capacity is clamped to zero. Integers too large for `i64` saturate, so
    /// an oversized capacity fails allocation and oversized steps fail the
    /// scheduler's range check. Steps are passed through unchecked; the
    /// scheduler owns their range.
    pub fn parse(keyword: &str, args: &[String]) -> Result<Self, CommandError> {
        match keyword {
            "CREATE" => {
                expect_args("CREATE", "2", args.len() == 2, args)?;
                let capacity = parse_int(&args[1], "capacity")?;
                Ok(Command::Create {
                    queue_id: args[0].clone(),
                    capacity: usize::try_from(capacity.max(0)).unwrap_or(usize::MAX),
                })
            }
            "ENQ" => {
                expect_args("ENQ", "2", args.len() == 2, args)?;
                Ok(Command::Enqueue {
                    queue_id: args[0].clone(),
                    item: args[1].clone(),
                })
            }
            "SKIP" => {
                expect_args("SKIP", "1", args.len() == 1, args)?;
                Ok(Command::Skip {
                    queue_id: args[0].clone(),
                })
            }
            "RUN" => {
                expect_args("RUN", "at least 1", !args.is_empty(), args)?;
                let quantum = parse_int(&args[0], "quantum")?;
                let steps = args.get(1).map(|s| parse_int(s, "steps")).transpose()?;
                let quantum = u64::try_from(quantum)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .ok_or(CommandError::InvalidQuantum(quantum))?;
                Ok(Command::Run { quantum, steps })
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

fn expect_args(keyword: &'static str, expected: &'static str, ok: bool, args: &[String]) -> Result<(), CommandError> {
    if ok {
        Ok(())
    } else {
        Err(CommandError::InvalidArgs {
            keyword,
            expected,
            got: args.len(),
        })
    }
}

fn parse_int(value: &str, what: &'static str) -> Result<i64, CommandError> {
    match value.parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(CommandError::Exception {
                value: value.to_string(),
                what,
            }),
        },
    }
}
