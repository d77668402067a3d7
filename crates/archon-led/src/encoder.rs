use archon_frame::{Packet, LED_DATA};
use bytes::{BufMut, BytesMut};

use crate::color::{ColorTable, Rgb, ESCAPE};
use crate::error::{ColorError, Result};

/// Maximum LED records carried by one `LED_DATA` packet.
pub const LEDS_PER_PACKET: usize = 4;

/// Wire size of one LED record: index, r, g, b.
pub const LED_RECORD_SIZE: usize = 4;

const HEX_DIGITS: usize = 6;

/// Target color for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedRecord {
    pub index: u8,
    pub color: Rgb,
}

impl LedRecord {
    pub fn to_bytes(self) -> [u8; LED_RECORD_SIZE] {
        let [r, g, b] = self.color.to_bytes();
        [self.index, r, g, b]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for a color code or an escape.
    NoLed,
    /// Collecting the hex digits of an escape that started at `escape_at`.
    HexParse { escape_at: usize },
}

/// Color-string state machine. A completed LED is reported by [`Parser::step`]
/// returning its color, after which the parser is back in `NoLed`.
struct Parser<'a> {
    table: &'a ColorTable,
    state: ParseState,
    hex: String,
}

impl<'a> Parser<'a> {
    fn new(table: &'a ColorTable) -> Self {
        Self {
            table,
            state: ParseState::NoLed,
            hex: String::with_capacity(HEX_DIGITS),
        }
    }

    fn step(&mut self, position: usize, ch: char) -> Result<Option<Rgb>> {
        match self.state {
            ParseState::NoLed if ch == ESCAPE => {
                self.hex.clear();
                self.state = ParseState::HexParse {
                    escape_at: position,
                };
                Ok(None)
            }
            ParseState::NoLed => self
                .table
                .get(ch)
                .map(Some)
                .ok_or(ColorError::UnknownColorCode { code: ch, position }),
            ParseState::HexParse { escape_at } => {
                self.hex.push(ch);
                if self.hex.chars().count() < HEX_DIGITS {
                    return Ok(None);
                }

                let color =
                    Rgb::from_hex(&self.hex).ok_or_else(|| ColorError::InvalidHexSequence {
                        sequence: self.hex.clone(),
                        position: escape_at,
                    })?;
                self.state = ParseState::NoLed;
                Ok(Some(color))
            }
        }
    }

    fn finish(self) -> Result<()> {
        match self.state {
            ParseState::NoLed => Ok(()),
            ParseState::HexParse { .. } => {
                Err(ColorError::TruncatedEscapeSequence { partial: self.hex })
            }
        }
    }
}

fn led_index(start: u8, offset: usize) -> Result<u8> {
    u8::try_from(start as usize + offset).map_err(|_| ColorError::LedIndexOverflow {
        start,
        count: offset + 1,
    })
}

/// Parse a color string into LED records numbered sequentially from `start`.
///
/// The whole string is parsed before anything is returned; the first error
/// aborts the parse.
pub fn parse_records(colors: &str, start: u8, table: &ColorTable) -> Result<Vec<LedRecord>> {
    let mut parser = Parser::new(table);
    let mut records = Vec::new();

    for (position, ch) in colors.chars().enumerate() {
        if let Some(color) = parser.step(position, ch)? {
            let index = led_index(start, records.len())?;
            tracing::trace!(index, %color, "LED complete");
            records.push(LedRecord { index, color });
        }
    }

    parser.finish()?;
    Ok(records)
}

/// Encode a color string into `LED_DATA` packets.
///
/// LEDs are numbered sequentially from `start`; bounds against a physical
/// strip are the caller's concern. Fails without producing any packets if the
/// string is malformed.
pub fn encode_colors(colors: &str, start: u8, table: &ColorTable) -> Result<PacketStream> {
    let records = parse_records(colors, start, table)?;
    let stream = PacketStream::new(records);
    tracing::debug!(
        leds = stream.records.len(),
        packets = stream.len(),
        start,
        "encoded color string"
    );
    Ok(stream)
}

/// Single-pass sequence of `LED_DATA` packets, built one batch at a time.
///
/// Produced by [`encode_colors`]. Once consumed it cannot be restarted;
/// encode the string again instead.
#[derive(Debug)]
pub struct PacketStream {
    records: std::vec::IntoIter<LedRecord>,
}

impl PacketStream {
    fn new(records: Vec<LedRecord>) -> Self {
        Self {
            records: records.into_iter(),
        }
    }
}

impl Iterator for PacketStream {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        let mut payload = BytesMut::with_capacity(LEDS_PER_PACKET * LED_RECORD_SIZE);
        for record in self.records.by_ref().take(LEDS_PER_PACKET) {
            payload.put_slice(&record.to_bytes());
        }
        if payload.is_empty() {
            return None;
        }

        let packet = Packet::new(LED_DATA, payload.freeze())
            .expect("an LED batch is at most 16 bytes and always fits the length field");
        Some(packet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len().div_ceil(LEDS_PER_PACKET);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PacketStream {}
