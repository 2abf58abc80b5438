//! HDLC framing, CRC verification, and AIS message unpacking: C6 through C9.

pub mod ais;
pub mod crc;
pub mod hdlc;

pub use ais::AisMessage;

/// Message-body length in octets, keyed by message ID (the top 6 bits of
/// the first payload byte): ID 5 carries 424 payload bits, every other ID
/// carries 168 (§4.8).
fn body_len_octets(first_payload_byte: u8) -> usize {
    let msg_id = first_payload_byte >> 2;
    if msg_id == 5 {
        53
    } else {
        21
    }
}

/// Verifies and unpacks one frame produced by [`hdlc::extract_frame`] (C8
/// then C9). `bit_count` is [`hdlc::FrameResult::bit_count`], the number of
/// payload bits accumulated (not counting the header offset). Returns
/// `None` on a short frame or a CRC mismatch; both are silent,
/// non-exceptional outcomes (§7).
pub fn decode_body(frame: &[u8], bit_count: usize) -> Option<AisMessage> {
    let payload = &frame[hdlc::BODY_OFFSET..];
    let first = *payload.first()?;
    let body_len = body_len_octets(first);

    let required_bits = (body_len + 2) * 8;
    if bit_count < required_bits {
        return None;
    }

    let body = &payload[..body_len];
    let fcs = u16::from_le_bytes([payload[body_len], payload[body_len + 1]]);
    if !crc::verify(body, fcs) {
        return None;
    }

    ais::unpack(body).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexlit::hex;

    /// A literal 23-octet position-report frame (21-octet body, id 1,
    /// mmsi 123456789, every other field zero, + its little-endian FCS),
    /// embedded as a hex literal the way the teacher embeds captured
    /// Mode-S frames in its own `decode/bds/*.rs` tests.
    #[test]
    fn decodes_a_literal_position_report_frame() {
        let body = hex!("041d6f345400000000000000000000000000000000648d");
        let mut frame = vec![0u8; hdlc::BODY_OFFSET];
        frame.extend_from_slice(&body);

        let msg = decode_body(&frame, body.len() * 8).expect("valid frame must decode");
        assert_eq!(msg.id(), 1);
        assert_eq!(msg.mmsi(), 123_456_789);
    }

    #[test]
    fn rejects_frame_shorter_than_declared_body() {
        let frame = vec![0u8; hdlc::BODY_OFFSET + 5];
        assert!(decode_body(&frame, 5 * 8).is_none());
    }

    #[test]
    fn rejects_bad_crc() {
        let mut frame = vec![0u8; hdlc::MAX_FRAME_BYTES];
        // msg id 1 in the top 6 bits of the first payload byte
        frame[hdlc::BODY_OFFSET] = 1 << 2;
        let bit_count = (21 + 2) * 8;
        assert!(decode_body(&frame, bit_count).is_none());
    }

    #[test]
    fn accepts_frame_with_matching_crc() {
        let mut frame = vec![0u8; hdlc::MAX_FRAME_BYTES];
        frame[hdlc::BODY_OFFSET] = 1 << 2; // id 1, rest zero
        let body_start = hdlc::BODY_OFFSET;
        let body_end = body_start + 21;
        let fcs = crc::crc16_ccitt(&frame[body_start..body_end]);
        frame[body_end..body_end + 2].copy_from_slice(&fcs.to_le_bytes());

        let bit_count = (21 + 2) * 8;
        let msg = decode_body(&frame, bit_count);
        assert!(matches!(msg, Some(AisMessage::PositionReport { .. })));
    }
}
