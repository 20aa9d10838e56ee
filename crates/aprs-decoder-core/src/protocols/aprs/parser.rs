use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;

use super::error::PositionError;
use super::layout;
use super::reader::PositionReader;
use crate::{DecodedPacket, MessageType, Position};

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(layout::HEADER_PATTERN).expect("valid APRS header pattern"));

/// Decodes one raw APRS line. Never fails: fields that cannot be derived
/// stay empty and `raw` always carries the input verbatim.
pub fn parse_packet(raw: &str, timestamp: OffsetDateTime) -> DecodedPacket {
    let mut packet = DecodedPacket {
        timestamp,
        source: String::new(),
        destination: String::new(),
        path: Vec::new(),
        message_type: MessageType::Other,
        position: None,
        comment: String::new(),
        raw: raw.to_string(),
    };

    let Some(caps) = HEADER_RE.captures(raw) else {
        tracing::debug!(line = raw, "line does not match APRS header grammar");
        return packet;
    };

    packet.source = caps[1].to_string();
    packet.destination = caps[2].to_string();
    packet.path = split_path(&caps[3]);

    let payload = caps[4].trim();
    let (message_type, position, comment) = dispatch_payload(payload);
    packet.message_type = message_type;
    packet.position = position;
    packet.comment = comment.to_string();
    packet
}

fn split_path(path: &str) -> Vec<String> {
    path.split(layout::PATH_DELIMITER)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn dispatch_payload(payload: &str) -> (MessageType, Option<Position>, &str) {
    let mut chars = payload.chars();
    let Some(kind) = chars.next() else {
        return (MessageType::Other, None, payload);
    };
    let rest = chars.as_str();

    match kind {
        layout::POSITION_NO_MESSAGING | layout::POSITION_WITH_MESSAGING => {
            match parse_position(rest) {
                Ok((position, comment)) => (MessageType::Position, Some(position), comment.trim()),
                Err(err) => {
                    tracing::debug!(error = %err, body = rest, "position not decoded");
                    (MessageType::Position, None, rest)
                }
            }
        }
        layout::STATUS => (MessageType::Status, None, rest.trim()),
        layout::MESSAGE => (MessageType::Message, None, rest.trim()),
        layout::TELEMETRY => (MessageType::Telemetry, None, payload),
        _ => (MessageType::Other, None, payload),
    }
}

/// Decodes `DDMM.mmH/DDDMM.mmH` followed by a symbol code and a comment.
pub fn parse_position(body: &str) -> Result<(Position, &str), PositionError> {
    let reader = PositionReader::new(body);
    reader.require_len(layout::MIN_POSITION_LEN)?;

    let lat_degrees = reader.read_degrees(layout::LAT_DEGREES_RANGE, "latitude")?;
    let lat_minutes = reader.read_minutes(layout::LAT_MINUTES_RANGE, "latitude")?;
    let south = reader.read_hemisphere(layout::LAT_HEMISPHERE_OFFSET, "latitude", b'N', b'S')?;
    reader.read_symbol_table()?;
    let lon_degrees = reader.read_degrees(layout::LON_DEGREES_RANGE, "longitude")?;
    let lon_minutes = reader.read_minutes(layout::LON_MINUTES_RANGE, "longitude")?;
    let west = reader.read_hemisphere(layout::LON_HEMISPHERE_OFFSET, "longitude", b'E', b'W')?;

    let position = Position {
        latitude: to_decimal_degrees(lat_degrees, lat_minutes, south),
        longitude: to_decimal_degrees(lon_degrees, lon_minutes, west),
    };
    Ok((position, reader.read_comment()))
}

/// Zero stays `0.0` in the negative hemispheres so it never renders as `-0`.
fn to_decimal_degrees(degrees: u32, minutes: f64, negative: bool) -> f64 {
    let value = f64::from(degrees) + minutes / layout::MINUTES_PER_DEGREE;
    if negative && value != 0.0 { -value } else { value }
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{parse_packet, parse_position};
    use crate::MessageType;
    use crate::protocols::aprs::error::PositionError;

    fn parse(raw: &str) -> crate::DecodedPacket {
        parse_packet(raw, OffsetDateTime::UNIX_EPOCH)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn parse_position_report_with_path() {
        let packet =
            parse("K7CPR>APRS,WIDE1-1,WIDE2-1:!4653.00N/12143.26W#Hello from Capitol Peak");
        assert_eq!(packet.source, "K7CPR");
        assert_eq!(packet.destination, "APRS");
        assert_eq!(packet.path, vec!["WIDE1-1", "WIDE2-1"]);
        assert_eq!(packet.message_type, MessageType::Position);
        let position = packet.position.expect("position");
        assert_close(position.latitude, 46.0 + 53.0 / 60.0);
        assert_close(position.longitude, -(121.0 + 43.26 / 60.0));
        assert_eq!(packet.comment, "Hello from Capitol Peak");
    }

    #[test]
    fn parse_position_with_messaging() {
        let packet = parse("N0CALL-9>APRS:=3351.32S/15112.48E>Mobile");
        assert_eq!(packet.message_type, MessageType::Position);
        let position = packet.position.expect("position");
        assert_close(position.latitude, -(33.0 + 51.32 / 60.0));
        assert_close(position.longitude, 151.0 + 12.48 / 60.0);
        assert_eq!(packet.comment, "Mobile");
    }

    #[test]
    fn parse_position_rejects_alternate_symbol_table() {
        let packet = parse("N0CALL>APRS:!4903.50N\\07201.75W-");
        assert_eq!(packet.message_type, MessageType::Position);
        assert!(packet.position.is_none());
        assert_eq!(packet.comment, "4903.50N\\07201.75W-");

        let err = parse_position("4903.50N\\07201.75W-").unwrap_err();
        assert_eq!(err, PositionError::InvalidSymbolTable { value: '\\' });
    }

    #[test]
    fn parse_position_garbage_keeps_body() {
        let packet = parse("K7CPR>APRS:!garbage");
        assert_eq!(packet.message_type, MessageType::Position);
        assert!(packet.position.is_none());
        assert_eq!(packet.comment, "garbage");
    }

    #[test]
    fn parse_compressed_position_is_not_decoded() {
        let packet = parse("K7CPR>APRS:!/5L!!<*e7>7P[");
        assert_eq!(packet.message_type, MessageType::Position);
        assert!(packet.position.is_none());
        assert_eq!(packet.comment, "/5L!!<*e7>7P[");
    }

    #[test]
    fn parse_status() {
        let packet = parse("K7CPR>APRS:>On the summit");
        assert_eq!(packet.message_type, MessageType::Status);
        assert_eq!(packet.comment, "On the summit");
        assert!(packet.position.is_none());
    }

    #[test]
    fn parse_message_keeps_addressee() {
        let packet = parse("K7CPR>APRS::N0CALL   :hello{01");
        assert_eq!(packet.message_type, MessageType::Message);
        assert_eq!(packet.comment, "N0CALL   :hello{01");
    }

    #[test]
    fn parse_telemetry_keeps_full_payload() {
        let packet = parse("K7CPR>APRS:T#005,199,000,255,073,123,01101001");
        assert_eq!(packet.message_type, MessageType::Telemetry);
        assert_eq!(packet.comment, "T#005,199,000,255,073,123,01101001");
    }

    #[test]
    fn parse_other_payload() {
        let packet = parse("K7CPR>APRS:_10090556c220s004g005t077");
        assert_eq!(packet.message_type, MessageType::Other);
        assert_eq!(packet.comment, "_10090556c220s004g005t077");
    }

    #[test]
    fn parse_empty_payload() {
        let packet = parse("K7CPR>APRS:");
        assert_eq!(packet.source, "K7CPR");
        assert_eq!(packet.message_type, MessageType::Other);
        assert_eq!(packet.comment, "");
    }

    #[test]
    fn parse_keeps_digipeated_marker() {
        let packet = parse("K7CPR>APRS,N7XYZ-3*,WIDE2-1:>hi");
        assert_eq!(packet.path, vec!["N7XYZ-3*", "WIDE2-1"]);
    }

    #[test]
    fn parse_without_header_leaves_fields_empty() {
        for raw in ["", "no delimiters here", "K7CPR APRS !4653.00N", "k7cpr>aprs:>hi"] {
            let packet = parse(raw);
            assert_eq!(packet.raw, raw);
            assert!(packet.source.is_empty());
            assert!(packet.destination.is_empty());
            assert!(packet.path.is_empty());
            assert_eq!(packet.message_type, MessageType::Other);
            assert!(packet.position.is_none());
            assert!(packet.comment.is_empty());
        }
    }

    #[test]
    fn parse_position_rejects_wrong_hemisphere() {
        let err = parse_position("4653.00E/12143.26W#").unwrap_err();
        assert_eq!(
            err,
            PositionError::InvalidHemisphere {
                field: "latitude",
                value: 'E'
            }
        );
    }

    #[test]
    fn parse_position_does_not_bound_degrees() {
        let (position, _) = parse_position("9130.00N/12143.26W#").unwrap();
        assert_close(position.latitude, 91.5);

        let packet = parse("K7CPR>APRS:!4653.00N/18030.00E#x");
        let position = packet.position.expect("position");
        assert_close(position.longitude, 180.5);
        assert_eq!(packet.comment, "x");

        let (position, _) = parse_position("0000.00S/99959.99W#").unwrap();
        assert_close(position.longitude, -(999.0 + 59.99 / 60.0));
    }

    #[test]
    fn parse_position_zero_in_negative_hemispheres_is_positive_zero() {
        let (position, _) = parse_position("0000.00S/00000.00W#").unwrap();
        assert!(position.latitude.is_sign_positive());
        assert!(position.longitude.is_sign_positive());
    }

    #[test]
    fn parse_position_rejects_bad_symbol_table() {
        let err = parse_position("4653.00N|12143.26W#").unwrap_err();
        assert_eq!(err, PositionError::InvalidSymbolTable { value: '|' });
    }

    #[test]
    fn parse_position_handles_non_ascii_tail() {
        let (position, comment) = parse_position("0000.00N/00000.00Eéàü").unwrap();
        assert_eq!(position.latitude, 0.0);
        assert_eq!(position.longitude, 0.0);
        assert_eq!(comment, "àü");
    }
}
