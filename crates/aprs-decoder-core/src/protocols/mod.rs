//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: field offsets and identifiers (source of truth)
//! - `reader`: safe text access and protocol conventions
//! - `parser`: domain-level decoding (no direct indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and sinks handle device and
//! file access.

pub mod aprs;
