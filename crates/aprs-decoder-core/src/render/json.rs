use serde::Serialize;

use crate::{DecodedPacket, MessageType};

use super::format_timestamp;

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: String,
    source: &'a str,
    destination: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    path: &'a [String],
    #[serde(rename = "type")]
    message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    longitude: Option<f64>,
    #[serde(skip_serializing_if = "str::is_empty")]
    comment: &'a str,
    raw: &'a str,
}

/// Renders one compact JSON object (no trailing newline). Absent fields are
/// omitted, never `null`.
pub fn render_json(packet: &DecodedPacket) -> Result<String, serde_json::Error> {
    let record = JsonRecord {
        timestamp: format_timestamp(packet.timestamp),
        source: &packet.source,
        destination: &packet.destination,
        path: &packet.path,
        message_type: packet.message_type,
        latitude: packet.position.map(|p| p.latitude),
        longitude: packet.position.map(|p| p.longitude),
        comment: &packet.comment,
        raw: &packet.raw,
    };
    serde_json::to_string(&record)
}
