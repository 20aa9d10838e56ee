//! Packet sinks: destinations that receive every decoded packet.
//!
//! Sinks own their output resource and render packets with an
//! [`OutputFormat`](crate::OutputFormat). They are handed packets after
//! parsing and never feed back into the parser.

mod console;
mod packet_log;

pub use console::ConsoleSink;
pub use packet_log::PacketLog;

use thiserror::Error;

use crate::DecodedPacket;

pub trait PacketSink {
    fn write_packet(&mut self, packet: &DecodedPacket) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
