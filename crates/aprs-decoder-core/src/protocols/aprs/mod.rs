//! APRS text packet decoding.
//!
//! The parser splits the `SOURCE>DEST,PATH:PAYLOAD` header with a single
//! anchored pattern, dispatches on the payload's first character, and decodes
//! uncompressed `!`/`=` positions with a fixed-width scan into signed decimal
//! degrees. Compressed positions, MIC-E and telemetry fields are left as
//! comment text.
//!
//! Decoding never fails at the packet level: a line that does not match the
//! header grammar keeps only `raw`, and a rejected position body becomes the
//! comment. Field offsets live in `layout`, fixed-width conventions in
//! `reader`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::parse_packet;
