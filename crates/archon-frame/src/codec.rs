use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};
use crate::packet_type::EMPTY;

/// Start-of-message marker that precedes every packet.
pub const START_OF_MESSAGE: u8 = 0x15;

/// Framing bytes around the payload: SOM (1) + type (1) + length (1) + checksum (1).
pub const OVERHEAD: usize = 4;

/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// Receive buffer size of the LED controller firmware. One full `LED_DATA`
/// batch (4 LEDs x 4 bytes) fills it exactly.
pub const FIRMWARE_MAX_PAYLOAD: usize = 16;

/// A complete, checksummed packet.
///
/// Packets are immutable values: the length and checksum are computed once
/// at construction and always agree with the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    packet_type: u8,
    length: u8,
    payload: Bytes,
    checksum: u8,
}

impl Packet {
    /// Build a packet, computing its length and checksum.
    ///
    /// Fails with [`FrameError::PayloadTooLarge`] if the payload is longer than
    /// [`MAX_PAYLOAD`] bytes.
    pub fn new(packet_type: u8, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        let length = u8::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        })?;
        let checksum = checksum(packet_type, &payload);

        Ok(Self {
            packet_type,
            length,
            payload,
            checksum,
        })
    }

    /// The zero-length `EMPTY` heartbeat packet.
    pub fn empty() -> Self {
        Self {
            packet_type: EMPTY,
            length: 0,
            payload: Bytes::new(),
            checksum: checksum(EMPTY, &[]),
        }
    }

    /// Command category of this packet.
    pub fn packet_type(&self) -> u8 {
        self.packet_type
    }

    /// Payload size in bytes, as carried in the length field.
    pub fn length(&self) -> u8 {
        self.length
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// The total wire size of this packet (framing + payload).
    pub fn wire_size(&self) -> usize {
        OVERHEAD + self.payload.len()
    }
}

/// Build a packet from a type byte and a payload.
///
/// Equivalent to [`Packet::new`].
pub fn build_packet(packet_type: u8, payload: impl Into<Bytes>) -> Result<Packet> {
    let packet = Packet::new(packet_type, payload)?;
    tracing::debug!(
        packet_type = packet.packet_type,
        length = packet.length,
        checksum = packet.checksum,
        "built packet"
    );
    Ok(packet)
}

/// XOR of the length byte, the type byte and every payload byte.
///
/// The payload must be at most [`MAX_PAYLOAD`] bytes long; longer payloads
/// have no representable length byte.
pub fn checksum(packet_type: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(payload.len() as u8 ^ packet_type, |acc, byte| acc ^ byte)
}

/// Encode a packet into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────┬──────────┬──────────┬──────────────────┬──────────┐
/// │ SOM (1B) │ Type     │ Length   │ Payload          │ Checksum │
/// │ 0x15     │ (1B)     │ (1B)     │ (Length bytes)   │ (1B)     │
/// └──────────┴──────────┴──────────┴──────────────────┴──────────┘
/// ```
pub fn encode_packet(packet: &Packet, dst: &mut BytesMut) {
    dst.reserve(packet.wire_size());
    dst.put_u8(START_OF_MESSAGE);
    dst.put_u8(packet.packet_type);
    dst.put_u8(packet.length);
    dst.put_slice(&packet.payload[..packet.length as usize]);
    dst.put_u8(packet.checksum);
}

/// Serialize a packet into a standalone byte buffer.
pub fn serialize(packet: &Packet) -> Bytes {
    let mut buf = BytesMut::with_capacity(packet.wire_size());
    encode_packet(packet, &mut buf);
    buf.freeze()
}

/// Decode a packet from a buffer.
///
/// Bytes before the next start-of-message marker are discarded. Returns
/// `Ok(None)` if the buffer doesn't contain a complete packet yet. On success,
/// consumes the packet bytes from the buffer. On error only the offending
/// start-of-message byte is consumed, so the next call resynchronizes on the
/// following marker even if it lies inside the rejected window.
pub fn decode_packet(src: &mut BytesMut, max_payload: usize) -> Result<Option<Packet>> {
    let skip = src
        .iter()
        .position(|&byte| byte == START_OF_MESSAGE)
        .unwrap_or(src.len());
    if skip > 0 {
        tracing::trace!(skipped = skip, "discarding bytes before start of message");
        src.advance(skip);
    }

    if src.len() < 3 {
        return Ok(None); // Need more data
    }

    let packet_type = src[1];
    let length = src[2];
    if length as usize > max_payload {
        src.advance(1);
        return Err(FrameError::PayloadTooLarge {
            size: length as usize,
            max: max_payload,
        });
    }

    let total = OVERHEAD + length as usize;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    let expected = checksum(packet_type, &src[3..total - 1]);
    let received = src[total - 1];
    if expected != received {
        src.advance(1);
        return Err(FrameError::ChecksumMismatch {
            expected,
            actual: received,
        });
    }

    src.advance(3);
    let payload = src.split_to(length as usize).freeze();
    src.advance(1);

    Ok(Some(Packet {
        packet_type,
        length,
        payload,
        checksum: received,
    }))
}

/// Render a packet field by field in hex, for diagnostics.
pub fn format_for_display(packet: &Packet) -> String {
    packet.to_string()
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SOM:\t0x{START_OF_MESSAGE:02x}")?;
        writeln!(f, "TYPE:\t0x{:02x}", self.packet_type)?;
        writeln!(f, "LENGTH:\t0x{:02x}", self.length)?;
        f.write_str("DATA:\t")?;
        for (i, byte) in self.payload.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "0x{byte:02x}")?;
        }
        writeln!(f)?;
        write!(f, "CHKSM:\t0x{:02x}", self.checksum)
    }
}

/// Configuration for packet readers and writers.
#[derive(Debug, Clone)]
pub struct PacketConfig {
    /// Maximum payload size in bytes. Default: 255.
    pub max_payload_size: usize,
}

impl Default for PacketConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_type::{LED_DATA, TEST};

    #[test]
    fn test_length_matches_payload() {
        for size in [0usize, 1, 16, 200, MAX_PAYLOAD] {
            let payload = vec![0x5A; size];
            let packet = build_packet(TEST, payload).unwrap();
            assert_eq!(packet.length() as usize, size);
            assert_eq!(packet.payload().len(), size);
        }
    }

    #[test]
    fn test_payload_too_large() {
        let result = build_packet(TEST, vec![0u8; MAX_PAYLOAD + 1]);
        assert!(matches!(
            result,
            Err(FrameError::PayloadTooLarge { size: 256, max: 255 })
        ));
    }

    #[test]
    fn test_checksum_self_consistent() {
        let packet = build_packet(LED_DATA, vec![0, 255, 0, 0, 1, 0, 255, 0]).unwrap();
        let folded = packet
            .payload()
            .iter()
            .fold(packet.length() ^ packet.packet_type(), |acc, b| acc ^ b);
        assert_eq!(folded ^ packet.checksum(), 0);
    }

    #[test]
    fn test_known_checksum() {
        // 0x03 ^ 0x01 ^ 0x10 ^ 0x20 ^ 0x30
        let packet = build_packet(TEST, vec![0x10, 0x20, 0x30]).unwrap();
        assert_eq!(packet.checksum(), 0x02);
    }

    #[test]
    fn test_serialize_layout() {
        let packet = build_packet(TEST, vec![0xAA, 0xBB]).unwrap();
        let wire = serialize(&packet);

        assert_eq!(wire.len(), OVERHEAD + 2);
        assert_eq!(
            wire.as_ref(),
            &[START_OF_MESSAGE, TEST, 0x02, 0xAA, 0xBB, packet.checksum()]
        );
    }

    #[test]
    fn test_empty_packet() {
        let packet = Packet::empty();
        assert_eq!(packet, build_packet(EMPTY, Bytes::new()).unwrap());
        assert_eq!(packet.checksum(), checksum(EMPTY, &[]));
        assert_eq!(serialize(&packet).as_ref(), &[START_OF_MESSAGE, 0, 0, 0]);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let packet = build_packet(LED_DATA, vec![0, 0xFF, 0x00, 0xFF]).unwrap();
        let mut buf = BytesMut::new();
        encode_packet(&packet, &mut buf);

        let decoded = decode_packet(&mut buf, MAX_PAYLOAD).unwrap().unwrap();

        assert_eq!(decoded.packet_type(), LED_DATA);
        assert_eq!(decoded.payload().as_ref(), packet.payload().as_ref());
        assert_eq!(decoded, packet);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_incomplete_header() {
        let mut buf = BytesMut::from(&[START_OF_MESSAGE, TEST][..]);
        let result = decode_packet(&mut buf, MAX_PAYLOAD).unwrap();
        assert!(result.is_none());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_decode_incomplete_payload() {
        let packet = build_packet(TEST, b"hello".to_vec()).unwrap();
        let mut buf = BytesMut::new();
        encode_packet(&packet, &mut buf);
        buf.truncate(5);

        let result = decode_packet(&mut buf, MAX_PAYLOAD).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_decode_skips_leading_garbage() {
        let packet = build_packet(TEST, vec![7]).unwrap();
        let mut buf = BytesMut::from(&[0x00, 0xFF, 0x42][..]);
        encode_packet(&packet, &mut buf);

        let decoded = decode_packet(&mut buf, MAX_PAYLOAD).unwrap().unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_decode_checksum_mismatch() {
        let mut buf = BytesMut::from(&[START_OF_MESSAGE, TEST, 0x01, 0x07, 0x00][..]);
        let result = decode_packet(&mut buf, MAX_PAYLOAD);
        assert!(matches!(
            result,
            Err(FrameError::ChecksumMismatch {
                expected: 0x07,
                actual: 0x00
            })
        ));
        assert_eq!(buf.as_ref(), &[TEST, 0x01, 0x07, 0x00]);
        assert!(decode_packet(&mut buf, MAX_PAYLOAD).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stray_start_byte_before_packet() {
        let packet = build_packet(TEST, vec![7]).unwrap();
        let mut buf = BytesMut::from(&[START_OF_MESSAGE][..]);
        encode_packet(&packet, &mut buf);

        // The stray marker frames [0x15, 0x15, 0x01, 0x01, 0x07] and fails.
        let result = decode_packet(&mut buf, MAX_PAYLOAD);
        assert!(matches!(result, Err(FrameError::ChecksumMismatch { .. })));

        let decoded = decode_packet(&mut buf, MAX_PAYLOAD).unwrap().unwrap();
        assert_eq!(decoded, packet);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_payload_too_large() {
        let mut buf = BytesMut::from(&[START_OF_MESSAGE, LED_DATA, 0x20][..]);
        let result = decode_packet(&mut buf, FIRMWARE_MAX_PAYLOAD);
        assert!(matches!(
            result,
            Err(FrameError::PayloadTooLarge { size: 32, max: 16 })
        ));
    }

    #[test]
    fn test_multiple_packets() {
        let mut buf = BytesMut::new();
        encode_packet(&build_packet(TEST, b"first".to_vec()).unwrap(), &mut buf);
        encode_packet(&Packet::empty(), &mut buf);

        let p1 = decode_packet(&mut buf, MAX_PAYLOAD).unwrap().unwrap();
        assert_eq!(p1.payload().as_ref(), b"first");

        let p2 = decode_packet(&mut buf, MAX_PAYLOAD).unwrap().unwrap();
        assert_eq!(p2.packet_type(), EMPTY);
        assert!(p2.payload().is_empty());

        assert!(buf.is_empty());
    }

    #[test]
    fn test_display_format() {
        let packet = build_packet(TEST, vec![0x0A, 0xFF]).unwrap();
        let text = format_for_display(&packet);

        assert_eq!(
            text,
            "SOM:\t0x15\nTYPE:\t0x01\nLENGTH:\t0x02\nDATA:\t0x0a:0xff\nCHKSM:\t0xf6"
        );
    }

    #[test]
    fn test_packet_wire_size() {
        let packet = build_packet(TEST, Bytes::from_static(b"test")).unwrap();
        assert_eq!(packet.wire_size(), OVERHEAD + 4);
        assert_eq!(serialize(&packet).len(), packet.wire_size());
    }
}
