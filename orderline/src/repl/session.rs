//! Command session management

use std::io::{BufRead, Write};

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::events::{Event, OutputFormat, Reason};
use crate::scheduler::Scheduler;

use super::command::Command;
use super::parser::{ParsedLine, parse_command};

const BREAK_MESSAGE: &str = "Break time!";
const UNKNOWN_ITEM_MESSAGE: &str = "Sorry, we don't serve that.";
const FULL_MESSAGE: &str = "Sorry, we're at capacity.";

/// What the session should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineResult {
    Continue,
    Break,
}

/// A command session driving one scheduler
///
/// Feeds commands to the scheduler one at a time and writes the returned
/// events, and after each `RUN` a state snapshot, to `out`.
pub struct Session<W: Write> {
    scheduler: Scheduler,
    format: OutputFormat,
    out: W,
}

impl<W: Write> Session<W> {
    /// Create a new session
    pub fn new(scheduler: Scheduler, format: OutputFormat, out: W) -> Self {
        debug!(%format, "Session::new: called");
        Self { scheduler, format, out }
    }

    /// Consume the session, returning the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Read commands until a blank line or end of input
    pub fn run_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line.context("Failed to read command")?;
            if self.handle_line(&line)? == LineResult::Break {
                return self.finish();
            }
        }
        debug!("Session::run_reader: end of input");
        self.finish()
    }

    /// Read commands from the terminal with line editing
    pub fn run_interactive(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        let prompt = format!("{} ", ">".bright_green());

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    if self.handle_line(&line)? == LineResult::Break {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    debug!("Session::run_interactive: interrupted or end of input");
                    writeln!(self.out)?;
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        self.finish()
    }

    /// Process one input line
    pub fn handle_line(&mut self, line: &str) -> Result<LineResult> {
        match parse_command(line) {
            ParsedLine::Blank => Ok(LineResult::Break),
            ParsedLine::Comment => Ok(LineResult::Continue),
            ParsedLine::Command { keyword, args } => {
                match Command::parse(&keyword, &args) {
                    Ok(command) => self.execute(command)?,
                    Err(e) => {
                        debug!(error = %e, "Session::handle_line: rejected command");
                        let event = Event::error(self.scheduler.clock(), None, e.reason());
                        self.emit(&[event])?;
                    }
                }
                Ok(LineResult::Continue)
            }
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        debug!(?command, "Session::execute: called");
        match command {
            Command::Create { queue_id, capacity } => {
                let events = self.scheduler.create_queue(&queue_id, capacity);
                self.emit(&events)
            }
            Command::Enqueue { queue_id, item } => {
                let events = self.scheduler.submit(&queue_id, &item);
                self.emit(&events)
            }
            Command::Skip { queue_id } => {
                let events = self.scheduler.mark_skip(&queue_id);
                self.emit(&events)
            }
            Command::Run { quantum, steps } => {
                let events = self.scheduler.run(quantum, steps);
                self.emit(&events)?;
                self.emit_snapshot()
            }
        }
    }

    fn emit(&mut self, events: &[Event]) -> Result<()> {
        for event in events {
            if event.is_reject(Reason::UnknownItem) {
                writeln!(self.out, "{}", UNKNOWN_ITEM_MESSAGE)?;
            } else if event.is_reject(Reason::Full) {
                writeln!(self.out, "{}", FULL_MESSAGE)?;
            }
            let line = self.format.render(event).context("Failed to render event")?;
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn emit_snapshot(&mut self) -> Result<()> {
        for line in self.scheduler.snapshot().lines() {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let stats = self.scheduler.stats();
        info!(
            clock = self.scheduler.clock(),
            enqueued = stats.total_enqueued,
            rejected = stats.total_rejected,
            finished = stats.total_finished,
            turns = stats.total_turns,
            skips = stats.total_skips_consumed,
            peak_depth = stats.peak_queue_depth,
            "Session ended"
        );
        writeln!(self.out, "{}", BREAK_MESSAGE)?;
        self.out.flush()?;
        Ok(())
    }
}
