//! Checksummed packet framing for the archon RGB LED serial protocol.
//!
//! Every packet on the wire is laid out as:
//! - A 1-byte start-of-message marker (`0x15`)
//! - A 1-byte packet type
//! - A 1-byte payload length
//! - The payload itself
//! - A 1-byte XOR checksum over length, type and payload
//!
//! The codec knows nothing about what a payload means; see `archon-led` for
//! the LED data and LED control payloads.

pub mod codec;
pub mod error;
pub mod packet_type;
pub mod reader;
pub mod writer;

pub use codec::{
    build_packet, checksum, decode_packet, encode_packet, format_for_display, serialize, Packet,
    PacketConfig, FIRMWARE_MAX_PAYLOAD, MAX_PAYLOAD, OVERHEAD, START_OF_MESSAGE,
};
pub use error::{FrameError, Result};
pub use packet_type::{
    is_advisory, type_name, BUSY, EMPTY, LED_CTRL, LED_DATA, READY, TEST,
};
pub use reader::PacketReader;
pub use writer::PacketWriter;
