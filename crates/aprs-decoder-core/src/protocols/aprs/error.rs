use thiserror::Error;

/// Reasons an uncompressed position body was rejected.
///
/// These never cross the packet parser boundary: a rejected body leaves the
/// position absent and keeps the body as the comment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("position too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid digits in {field}")]
    InvalidDigits { field: &'static str },
    #[error("invalid {field} hemisphere: {value:?}")]
    InvalidHemisphere { field: &'static str, value: char },
    #[error("invalid symbol table: {value:?}")]
    InvalidSymbolTable { value: char },
    #[error("{field} minutes out of range: {minutes}")]
    MinutesOutOfRange { field: &'static str, minutes: f64 },
}
