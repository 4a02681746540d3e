use crate::domain::bundle::Bundle;
use crate::error::{BillingError, Result};
use serde::Deserialize;
use std::io::BufRead;

/// A command as read from the input: its name and arguments.
#[derive(Debug, Deserialize, PartialEq)]
pub struct InboundCommand {
    pub command: String,
    #[serde(default)]
    pub args: Bundle,
}

/// Reads commands from a JSON lines source, one command per line.
///
/// Blank lines are skipped.
pub struct CommandReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CommandReader<R> {
    /// Creates a new `CommandReader` from any buffered source (e.g. a file or stdin).
    pub fn new(source: R) -> Self {
        Self { reader: source }
    }

    /// Returns an iterator that lazily reads and parses commands.
    pub fn commands(self) -> impl Iterator<Item = Result<InboundCommand>> {
        self.reader
            .lines()
            .filter(|line| !matches!(line, Ok(line) if line.trim().is_empty()))
            .map(|line| {
                let line = line?;
                serde_json::from_str(&line).map_err(BillingError::from)
            })
    }
}
