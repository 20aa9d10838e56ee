use std::io::{self, Stdout, Write};

use super::{PacketSink, SinkError};
use crate::{DecodedPacket, OutputFormat};

/// Echoes packets to a terminal-like writer.
pub struct ConsoleSink<W> {
    out: W,
    format: OutputFormat,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PacketSink for ConsoleSink<W> {
    fn write_packet(&mut self, packet: &DecodedPacket) -> Result<(), SinkError> {
        let rendered = self.format.render(packet)?;
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
