use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{LineFramer, LineSource, SourceError};

const READ_CHUNK: usize = 8 * 1024;

/// Line source over any reader, such as a captured TNC log or stdin.
pub struct ReaderLineSource<R> {
    reader: R,
    framer: LineFramer,
    eof: bool,
}

impl ReaderLineSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> ReaderLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            framer: LineFramer::new(),
            eof: false,
        }
    }
}

impl<R: Read> LineSource for ReaderLineSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.framer.next_line() {
                return Ok(Some(line));
            }
            if self.eof {
                return Ok(self.framer.finish());
            }
            match self.reader.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(n) => self.framer.push(&chunk[..n]),
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::ReaderLineSource;
    use crate::source::LineSource;

    #[test]
    fn yields_lines_then_none() {
        let input = b"K7CPR>APRS:>one\n\nK7CPR>APRS:>two";
        let mut source = ReaderLineSource::new(Cursor::new(&input[..]));
        assert_eq!(
            source.next_line().unwrap().as_deref(),
            Some("K7CPR>APRS:>one")
        );
        assert_eq!(
            source.next_line().unwrap().as_deref(),
            Some("K7CPR>APRS:>two")
        );
        assert_eq!(source.next_line().unwrap(), None);
        assert_eq!(source.next_line().unwrap(), None);
    }
}
