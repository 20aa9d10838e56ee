use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{PacketSink, SinkError};
use crate::{DecodedPacket, OutputFormat};

/// Append-only packet log.
///
/// The header of the chosen format is written only when the file is empty at
/// open time, so reopening an existing log never repeats it. Every packet is
/// flushed as soon as it is written; the file is closed on drop.
pub struct PacketLog {
    file: File,
    path: PathBuf,
    format: OutputFormat,
}

impl PacketLog {
    pub fn open(path: &Path, format: OutputFormat) -> Result<Self, SinkError> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if file.metadata()?.len() == 0 {
            if let Some(header) = format.header() {
                writeln!(file, "{header}")?;
                file.flush()?;
                tracing::debug!(path = %path.display(), "log header written");
            }
        }
        Ok(Self {
            file,
            path: path.to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PacketSink for PacketLog {
    fn write_packet(&mut self, packet: &DecodedPacket) -> Result<(), SinkError> {
        let rendered = self.format.render(packet)?;
        self.file.write_all(rendered.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
