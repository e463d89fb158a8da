//! Output sinks for result envelopes.

use serde::Serialize;
use std::io::{self, Write};

use crate::invoker::envelope::ResultEnvelope;

/// Receives the envelope produced by a command.
pub trait OutputSink {
    fn send<T: Serialize>(&mut self, envelope: &ResultEnvelope<T>) -> io::Result<()>;
}

/// Writes envelopes as pretty-printed JSON, one per send.
pub struct JsonSink<W> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonSink<io::Stdout> {
    /// Console sink.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for JsonSink<W> {
    fn send<T: Serialize>(&mut self, envelope: &ResultEnvelope<T>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, envelope)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
