use thiserror::Error;
use time::OffsetDateTime;

use crate::protocols::aprs::parse_packet;
use crate::sink::{PacketSink, SinkError};
use crate::source::{LineSource, SourceError};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Counters for one decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Lines decoded into packets.
    pub packets: u64,
    /// Packets that carried a decoded position.
    pub positions: u64,
}

/// Decodes every line of `source` in arrival order and hands each packet to
/// all `sinks`. Each line is stamped with `clock()` when it is read.
///
/// Returns when the source is exhausted; a serial source only ends on error.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use aprs_decoder_core::{ConsoleSink, OutputFormat, PacketSink, ReaderLineSource, decode_source};
/// use time::OffsetDateTime;
///
/// let input = Cursor::new("K7CPR>APRS:!4653.00N/12143.26W#Hi\nK7CPR>APRS:>QRV\n");
/// let mut console = ConsoleSink::new(Vec::new(), OutputFormat::Delimited);
/// let mut sinks: [&mut dyn PacketSink; 1] = [&mut console];
/// let summary = decode_source(ReaderLineSource::new(input), &mut sinks, || {
///     OffsetDateTime::UNIX_EPOCH
/// })?;
/// assert_eq!(summary.packets, 2);
/// assert_eq!(summary.positions, 1);
/// # Ok::<(), aprs_decoder_core::DecodeError>(())
/// ```
pub fn decode_source<S, C>(
    mut source: S,
    sinks: &mut [&mut dyn PacketSink],
    mut clock: C,
) -> Result<DecodeSummary, DecodeError>
where
    S: LineSource,
    C: FnMut() -> OffsetDateTime,
{
    let mut summary = DecodeSummary::default();
    while let Some(line) = source.next_line()? {
        let packet = parse_packet(&line, clock());
        summary.packets += 1;
        if packet.position.is_some() {
            summary.positions += 1;
        }
        tracing::trace!(
            source = %packet.source,
            message_type = %packet.message_type,
            "packet decoded"
        );
        for sink in sinks.iter_mut() {
            sink.write_packet(&packet)?;
        }
    }
    tracing::info!(
        packets = summary.packets,
        positions = summary.positions,
        "decode finished"
    );
    Ok(summary)
}
