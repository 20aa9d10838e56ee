/// Reassembles newline-terminated lines from arbitrarily split reads.
///
/// Lines are decoded as UTF-8 with lossy replacement and trimmed; blank lines
/// are dropped. An unterminated tail stays buffered until its newline arrives
/// or [`LineFramer::finish`] drains it; a tail longer than `MAX_PENDING`
/// bytes is discarded.
///
/// # Examples
/// ```
/// use aprs_decoder_core::LineFramer;
///
/// let mut framer = LineFramer::new();
/// framer.push(b"K7CPR>APRS:>on ");
/// assert_eq!(framer.next_line(), None);
/// framer.push(b"air\r\n");
/// assert_eq!(framer.next_line().as_deref(), Some("K7CPR>APRS:>on air"));
/// ```
/// Longest unterminated tail kept while waiting for a newline.
pub const MAX_PENDING: usize = 4096;

#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
        let tail_start = self
            .buffer
            .iter()
            .rposition(|b| *b == b'\n')
            .map_or(0, |idx| idx + 1);
        let pending = self.buffer.len() - tail_start;
        if pending > MAX_PENDING {
            tracing::warn!(pending, "discarding unterminated input without newline");
            self.buffer.truncate(tail_start);
        }
    }

    pub fn next_line(&mut self) -> Option<String> {
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let bytes: Vec<u8> = self.buffer.drain(..=end).collect();
            if let Some(line) = decode_line(&bytes) {
                return Some(line);
            }
        }
        None
    }

    /// Drains the unterminated tail, if it holds a non-blank line.
    pub fn finish(&mut self) -> Option<String> {
        let bytes = std::mem::take(&mut self.buffer);
        decode_line(&bytes)
    }
}

fn decode_line(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let line = text.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
