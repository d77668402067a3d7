//! Color-string encoding and LED control payloads for the archon RGB LED protocol.
//!
//! A color string mixes single-character codes looked up in a [`ColorTable`]
//! with `#RRGGBB` literals:
//!
//! ```text
//! RGB#FF00FF--W
//! ```
//!
//! [`encode_colors`] turns such a string into `LED_DATA` packets carrying up to
//! four `(index, r, g, b)` records each. [`LedCommand`] builds the payloads of
//! `LED_CTRL` packets.

pub mod color;
pub mod control;
pub mod encoder;
pub mod error;

pub use color::{ColorTable, Rgb, DEFAULT_COLORS, ESCAPE};
pub use control::LedCommand;
pub use encoder::{
    encode_colors, parse_records, LedRecord, PacketStream, LEDS_PER_PACKET, LED_RECORD_SIZE,
};
pub use error::{ColorError, Result};
