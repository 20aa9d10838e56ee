use crate::DecodedPacket;

use super::format_timestamp;

/// Renders the multi-line human block, terminated by a blank line.
pub fn render_human(packet: &DecodedPacket) -> String {
    let mut lines = vec![
        format!("Timestamp: {}", format_timestamp(packet.timestamp)),
        format!("Source: {}", packet.source),
        format!("Destination: {}", packet.destination),
    ];
    if !packet.path.is_empty() {
        lines.push(format!("Path: {}", packet.path.join(",")));
    }
    lines.push(format!("Type: {}", packet.message_type));
    if let Some(position) = packet.position {
        lines.push(format!(
            "Position: {:.4}, {:.4}",
            position.latitude, position.longitude
        ));
    }
    if !packet.comment.is_empty() {
        lines.push(format!("Comment: {}", packet.comment));
    }
    lines.push(format!("Raw: {}", packet.raw));

    let mut out = lines.join("\n");
    out.push_str("\n\n");
    out
}
