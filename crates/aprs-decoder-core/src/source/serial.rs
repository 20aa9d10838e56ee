use std::io::{ErrorKind, Read};
use std::time::Duration;

use serialport::SerialPort;

use super::{LineFramer, LineSource, SourceError};

const READ_TIMEOUT: Duration = Duration::from_secs(1);
const READ_CHUNK: usize = 1024;
const IDLE_BACKOFF: Duration = Duration::from_millis(10);

/// Line source reading a TNC over a serial device (8N1).
///
/// The stream never ends on its own: read timeouts are treated as an idle
/// link and the source keeps waiting.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    framer: LineFramer,
}

impl SerialLineSource {
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, SourceError> {
        let port = serialport::new(path, baud_rate)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|err| SourceError::Serial {
                port: path.to_string(),
                message: err.to_string(),
            })?;
        tracing::info!(port = path, baud_rate, "serial port opened");
        Ok(Self {
            port,
            framer: LineFramer::new(),
        })
    }
}

impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.framer.next_line() {
                return Ok(Some(line));
            }
            match self.port.read(&mut chunk) {
                Ok(0) => std::thread::sleep(IDLE_BACKOFF),
                Ok(n) => self.framer.push(&chunk[..n]),
                Err(err) if matches!(err.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}
