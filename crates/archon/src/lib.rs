//! Drive addressable RGB LED arrays over a serial link.
//!
//! # Crate Structure
//!
//! - [`frame`]: Checksummed packet framing (`[0x15][type][length][payload][checksum]`)
//! - [`led`]: Color-string encoder, color tables and LED control commands
//! - [`transport`]: Serial port transport
//!
//! ```no_run
//! use archon::frame::PacketWriter;
//! use archon::led::{encode_colors, ColorTable};
//! use archon::transport::{SerialConfig, SerialLink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let link = SerialLink::open(&SerialConfig::new("/dev/ttyUSB0"))?;
//! let mut writer = PacketWriter::new(link);
//! for packet in encode_colors("ROYGBIV", 0, &ColorTable::new())? {
//!     writer.write_packet(&packet)?;
//! }
//! # Ok(())
//! # }
//! ```

/// Re-export frame types.
pub mod frame {
    pub use archon_frame::*;
}

/// Re-export color encoding and LED control types.
pub mod led {
    pub use archon_led::*;
}

/// Re-export transport types.
pub mod transport {
    pub use archon_transport::*;
}
