//! Line-oriented command session
//!
//! Reads `CREATE`, `ENQ`, `SKIP` and `RUN` commands, one per line, feeds them
//! to a [`Scheduler`] and prints the resulting event log. A blank line or end
//! of input ends the session.

mod command;
mod parser;
mod session;

pub use command::{Command, CommandError};
pub use parser::{ParsedLine, parse_command};
pub use session::{LineResult, Session};

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::Path;

use eyre::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::scheduler::Scheduler;

/// Run a session on stdout
///
/// This is the main entry point for `orderline session`. Commands come from
/// `script` when given, otherwise from stdin; a terminal on stdin gets line
/// editing.
pub fn run_session(config: &Config, script: Option<&Path>) -> Result<()> {
    let scheduler = Scheduler::new(config.menu.clone());
    let mut session = Session::new(scheduler, config.format, io::stdout().lock());

    match script {
        Some(path) => {
            debug!(path = %path.display(), "run_session: reading script");
            let file = File::open(path).context(format!("Failed to open script {}", path.display()))?;
            session.run_reader(BufReader::new(file))
        }
        None if io::stdin().is_terminal() => {
            debug!("run_session: interactive terminal");
            session.run_interactive()
        }
        None => {
            debug!("run_session: reading stdin");
            session.run_reader(io::stdin().lock())
        }
    }
}
