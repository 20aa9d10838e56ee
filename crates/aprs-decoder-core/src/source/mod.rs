mod framer;
mod reader;
mod serial;

pub use framer::LineFramer;
pub use reader::ReaderLineSource;
pub use serial::SerialLineSource;

use thiserror::Error;

/// Delivers deframed APRS text lines, one per packet.
pub trait LineSource {
    /// Returns the next non-blank line, or `None` once the input is exhausted.
    fn next_line(&mut self) -> Result<Option<String>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error ({port}): {message}")]
    Serial { port: String, message: String },
}
