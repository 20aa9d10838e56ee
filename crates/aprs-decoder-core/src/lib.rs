//! APRS decoder core library.
//!
//! This crate implements the decoding pipeline used by the CLI: line sources
//! deliver deframed TNC text, the APRS protocol decoder (layout/reader/parser)
//! turns each line into a [`DecodedPacket`], and renderers/sinks emit the
//! record to the console and to an append-only log. Parsing is text-oriented
//! and side-effect free; all I/O is isolated in `source` and `sink` modules.
//!
//! Invariants:
//! - Parsing is total: every input line yields a packet, malformed input only
//!   leaves fields empty.
//! - `raw` always holds the input line verbatim.
//! - A position is present only for `!`/`=` payloads that match the
//!   uncompressed fixed-width grammar.
//!
//! # Examples
//! ```
//! use aprs_decoder_core::{MessageType, parse_packet, render_human};
//! use time::OffsetDateTime;
//!
//! let packet = parse_packet(
//!     "K7CPR>APRS,WIDE1-1:!4653.00N/12143.26W#Hello",
//!     OffsetDateTime::UNIX_EPOCH,
//! );
//! assert_eq!(packet.message_type, MessageType::Position);
//! assert!(render_human(&packet).contains("Source: K7CPR"));
//! ```

use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

mod decode;
mod protocols;
mod render;
mod sink;
mod source;

pub use decode::{DecodeError, DecodeSummary, decode_source};
pub use protocols::aprs::parse_packet;
pub use render::{
    DELIMITED_HEADER, OutputFormat, format_timestamp, render_delimited, render_human, render_json,
};
pub use sink::{ConsoleSink, PacketLog, PacketSink, SinkError};
pub use source::{LineFramer, LineSource, ReaderLineSource, SerialLineSource, SourceError};

/// Default serial bit rate of the TNC link.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// One decoded APRS line.
///
/// All fields except `raw` are derived best-effort and may be empty.
///
/// # Examples
/// ```
/// use aprs_decoder_core::{MessageType, parse_packet};
/// use time::OffsetDateTime;
///
/// let packet = parse_packet("not an aprs line", OffsetDateTime::UNIX_EPOCH);
/// assert_eq!(packet.raw, "not an aprs line");
/// assert!(packet.source.is_empty());
/// assert_eq!(packet.message_type, MessageType::Other);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPacket {
    /// Capture time assigned by the caller.
    pub timestamp: OffsetDateTime,
    /// Source call sign (empty when the header did not match).
    pub source: String,
    /// Destination call sign (empty when the header did not match).
    pub destination: String,
    /// Digipeater path tokens, verbatim including any trailing `*`.
    pub path: Vec<String>,
    /// Payload kind derived from the payload's first character.
    pub message_type: MessageType,
    /// Decoded uncompressed position, when present and valid.
    pub position: Option<Position>,
    /// Free-text part of the payload; meaning depends on `message_type`.
    pub comment: String,
    /// The unmodified input line.
    pub raw: String,
}

/// Payload kinds distinguished by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageType {
    /// `!` or `=` position report.
    Position,
    /// `>` status report.
    Status,
    /// `:` message.
    Message,
    /// `T` telemetry.
    Telemetry,
    /// Anything else, including empty payloads.
    Other,
}

impl MessageType {
    /// Label used by every renderer.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Position => "Position",
            MessageType::Status => "Status",
            MessageType::Message => "Message",
            MessageType::Telemetry => "Telemetry",
            MessageType::Other => "Other",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed decimal-degree coordinates (north and east are positive).
///
/// # Examples
/// ```
/// use aprs_decoder_core::Position;
///
/// let position = Position {
///     latitude: 46.883333,
///     longitude: -121.721,
/// };
/// assert!(position.longitude < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in degrees, negative for the southern hemisphere.
    pub latitude: f64,
    /// Longitude in degrees, negative for the western hemisphere.
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_labels() {
        assert_eq!(MessageType::Position.to_string(), "Position");
        assert_eq!(MessageType::Status.to_string(), "Status");
        assert_eq!(MessageType::Message.to_string(), "Message");
        assert_eq!(MessageType::Telemetry.to_string(), "Telemetry");
        assert_eq!(MessageType::Other.to_string(), "Other");
    }
}
