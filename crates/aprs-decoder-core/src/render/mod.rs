//! Output encodings for decoded packets.
//!
//! Every renderer is a pure function of one [`DecodedPacket`]. The human and
//! JSON encodings share field-presence rules: an empty path, an absent
//! position and an empty comment are omitted rather than rendered empty. The
//! delimited encoding keeps a fixed column order instead.

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::DecodedPacket;

mod delimited;
mod human;
mod json;

pub use delimited::{DELIMITED_HEADER, render_delimited};
pub use human::render_human;
pub use json::render_json;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats a capture time as `YYYY-MM-DD HH:MM:SS`.
///
/// # Examples
/// ```
/// use aprs_decoder_core::format_timestamp;
/// use time::macros::datetime;
///
/// let ts = datetime!(2025-03-14 09:26:53 UTC);
/// assert_eq!(format_timestamp(ts), "2025-03-14 09:26:53");
/// ```
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).unwrap_or_default()
}

/// Output encoding selected for a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Multi-line `Field: value` block.
    Human,
    /// One comma-delimited row per packet.
    Delimited,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Renders a packet, including its line terminator(s).
    pub fn render(self, packet: &DecodedPacket) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Human => Ok(render_human(packet)),
            OutputFormat::Delimited => Ok(format!("{}\n", render_delimited(packet))),
            OutputFormat::Json => Ok(format!("{}\n", render_json(packet)?)),
        }
    }

    /// Header line written once at the top of a new destination, if any.
    pub fn header(self) -> Option<&'static str> {
        match self {
            OutputFormat::Delimited => Some(DELIMITED_HEADER),
            OutputFormat::Human | OutputFormat::Json => None,
        }
    }
}
