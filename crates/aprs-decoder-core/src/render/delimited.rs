use crate::DecodedPacket;

use super::format_timestamp;

/// Column header matching the field order of [`render_delimited`].
pub const DELIMITED_HEADER: &str =
    "timestamp,source,destination,path,type,latitude,longitude,comment,raw";

const COLUMN_DELIMITER: &str = ",";
const PATH_JOINER: &str = "|";
const COMMA_REPLACEMENT: &str = ";";

/// Renders one delimited row (no trailing newline).
///
/// Commas inside `comment` and `raw` are replaced with `;` so the row keeps
/// exactly nine columns; the replacement is lossy.
pub fn render_delimited(packet: &DecodedPacket) -> String {
    let (latitude, longitude) = match packet.position {
        Some(position) => (position.latitude.to_string(), position.longitude.to_string()),
        None => (String::new(), String::new()),
    };
    let columns = [
        format_timestamp(packet.timestamp),
        packet.source.clone(),
        packet.destination.clone(),
        packet.path.join(PATH_JOINER),
        packet.message_type.to_string(),
        latitude,
        longitude,
        escape(&packet.comment),
        escape(&packet.raw),
    ];
    columns.join(COLUMN_DELIMITER)
}

fn escape(field: &str) -> String {
    field.replace(COLUMN_DELIMITER, COMMA_REPLACEMENT)
}

#[cfg(test)]
mod tests {
    use super::{DELIMITED_HEADER, render_delimited};
    use crate::render::tests::{bare_packet, sample_packet};

    #[test]
    fn row_has_header_column_count() {
        let header_columns = DELIMITED_HEADER.split(',').count();
        for packet in [sample_packet(), bare_packet()] {
            let row = render_delimited(&packet);
            assert_eq!(row.split(',').count(), header_columns, "row: {row}");
        }
    }

    #[test]
    fn replaces_commas_in_comment_and_raw() {
        let row = render_delimited(&sample_packet());
        let columns: Vec<_> = row.split(',').collect();
        assert_eq!(columns[0], "2025-03-14 09:26:53");
        assert_eq!(columns[3], "WIDE1-1|WIDE2-1*");
        assert_eq!(columns[4], "Position");
        assert_eq!(columns[5].parse::<f64>().unwrap(), 46.883333);
        assert_eq!(columns[6].parse::<f64>().unwrap(), -121.721);
        assert_eq!(columns[7], "Hello; from Capitol Peak");
        assert_eq!(
            columns[8],
            "K7CPR>APRS;WIDE1-1;WIDE2-1*:!4653.00N/12143.26W#Hello; from Capitol Peak"
        );
    }

    #[test]
    fn missing_position_renders_empty_columns() {
        let row = render_delimited(&bare_packet());
        assert_eq!(row, "2025-03-14 09:26:53,,,,Other,,,,garbled");
    }
}
