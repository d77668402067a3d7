//! Serial port transport for the archon RGB LED protocol.
//!
//! The protocol layers above only need `std::io::Write` (and `Read` for
//! decoding replies); [`SerialLink`] provides both over a named serial device.

pub mod config;
pub mod error;
pub mod serial;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use error::{Result, TransportError};
pub use serial::SerialLink;
