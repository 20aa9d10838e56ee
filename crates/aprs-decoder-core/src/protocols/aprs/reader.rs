use super::error::PositionError;
use super::layout;

/// Fixed-width access to an uncompressed position body.
pub struct PositionReader<'a> {
    body: &'a str,
}

impl<'a> PositionReader<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { body }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), PositionError> {
        if self.body.len() < needed {
            return Err(PositionError::TooShort {
                needed,
                actual: self.body.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, PositionError> {
        self.body
            .as_bytes()
            .get(offset)
            .copied()
            .ok_or(PositionError::TooShort {
                needed: offset + 1,
                actual: self.body.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], PositionError> {
        self.body
            .as_bytes()
            .get(range.clone())
            .ok_or(PositionError::TooShort {
                needed: range.end,
                actual: self.body.len(),
            })
    }

    /// Reads a whole-degree field made only of ASCII digits.
    pub fn read_degrees(
        &self,
        range: std::ops::Range<usize>,
        field: &'static str,
    ) -> Result<u32, PositionError> {
        let bytes = self.read_slice(range)?;
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(PositionError::InvalidDigits { field });
        }
        Ok(bytes
            .iter()
            .fold(0u32, |acc, digit| acc * 10 + u32::from(digit - b'0')))
    }

    /// Reads a `MM.mm` minutes field; the value must lie in `[0, 60)`.
    pub fn read_minutes(
        &self,
        range: std::ops::Range<usize>,
        field: &'static str,
    ) -> Result<f64, PositionError> {
        let bytes = self.read_slice(range)?;
        let well_formed = bytes.iter().enumerate().all(|(idx, b)| {
            if idx == layout::MINUTES_POINT_OFFSET {
                *b == b'.'
            } else {
                b.is_ascii_digit()
            }
        });
        if !well_formed {
            return Err(PositionError::InvalidDigits { field });
        }
        let minutes = std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .ok_or(PositionError::InvalidDigits { field })?;
        if minutes >= layout::MINUTES_PER_DEGREE {
            return Err(PositionError::MinutesOutOfRange { field, minutes });
        }
        Ok(minutes)
    }

    /// Returns `true` when the hemisphere letter is the negative one.
    pub fn read_hemisphere(
        &self,
        offset: usize,
        field: &'static str,
        positive: u8,
        negative: u8,
    ) -> Result<bool, PositionError> {
        match self.read_u8(offset)? {
            value if value == positive => Ok(false),
            value if value == negative => Ok(true),
            value => Err(PositionError::InvalidHemisphere {
                field,
                value: char::from(value),
            }),
        }
    }

    pub fn read_symbol_table(&self) -> Result<u8, PositionError> {
        let value = self.read_u8(layout::SYMBOL_TABLE_OFFSET)?;
        if value != layout::SYMBOL_TABLE {
            return Err(PositionError::InvalidSymbolTable {
                value: char::from(value),
            });
        }
        Ok(value)
    }

    /// Text after the symbol code. Only valid once the fixed-width prefix has
    /// been checked to be ASCII.
    pub fn read_comment(&self) -> &'a str {
        let rest = self.body.get(layout::SYMBOL_CODE_OFFSET..).unwrap_or("");
        let mut chars = rest.chars();
        chars.next();
        chars.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::PositionReader;
    use crate::protocols::aprs::error::PositionError;
    use crate::protocols::aprs::layout;

    #[test]
    fn read_degrees_rejects_non_digits() {
        let reader = PositionReader::new("4x53.00N");
        let err = reader
            .read_degrees(layout::LAT_DEGREES_RANGE, "latitude")
            .unwrap_err();
        assert_eq!(err, PositionError::InvalidDigits { field: "latitude" });
    }

    #[test]
    fn read_minutes_requires_decimal_point() {
        let reader = PositionReader::new("4653,00N");
        assert!(
            reader
                .read_minutes(layout::LAT_MINUTES_RANGE, "latitude")
                .is_err()
        );
    }

    #[test]
    fn read_minutes_rejects_sixty() {
        let reader = PositionReader::new("4660.00N");
        let err = reader
            .read_minutes(layout::LAT_MINUTES_RANGE, "latitude")
            .unwrap_err();
        assert!(err.to_string().contains("minutes out of range"));
    }

    #[test]
    fn read_hemisphere_reports_sign() {
        let reader = PositionReader::new("4653.00S");
        let negative = reader
            .read_hemisphere(layout::LAT_HEMISPHERE_OFFSET, "latitude", b'N', b'S')
            .unwrap();
        assert!(negative);
    }

    #[test]
    fn read_comment_skips_symbol_code() {
        let reader = PositionReader::new("4653.00N/12143.26W#Hello");
        assert_eq!(reader.read_comment(), "Hello");
    }

    #[test]
    fn read_comment_without_symbol_code() {
        let reader = PositionReader::new("4653.00N/12143.26W");
        assert_eq!(reader.read_comment(), "");
    }

    #[test]
    fn short_body_reports_lengths() {
        let reader = PositionReader::new("4653");
        let err = reader.require_len(layout::MIN_POSITION_LEN).unwrap_err();
        assert!(err.to_string().contains("need 18 bytes, got 4"));
    }
}
