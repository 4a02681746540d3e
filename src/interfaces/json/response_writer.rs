use crate::domain::bundle::Bundle;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum OutboundLine<'a> {
    Result {
        command: &'a str,
        result: &'a Bundle,
    },
    Callback {
        callback: &'a str,
        args: &'a Bundle,
    },
}

/// Writes command results and callback deliveries as JSON lines.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(destination: W) -> Self {
        Self {
            writer: destination,
        }
    }

    /// Writes the immediate result of a command, `{"command": .., "result": ..}`.
    pub fn write_result(&mut self, command: &str, result: &Bundle) -> Result<()> {
        self.write_line(&OutboundLine::Result { command, result })
    }

    /// Writes a delivered response, `{"callback": .., "args": ..}`.
    pub fn write_callback(&mut self, callback: &str, args: &Bundle) -> Result<()> {
        self.write_line(&OutboundLine::Callback { callback, args })
    }

    fn write_line(&mut self, line: &OutboundLine<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, line)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
