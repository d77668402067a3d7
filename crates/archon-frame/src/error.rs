/// Errors that can occur while building, encoding or decoding packets.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The payload does not fit in the one-byte length field (or the
    /// configured maximum).
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A received packet's checksum byte does not match its contents.
    #[error("checksum mismatch (expected 0x{expected:02x}, received 0x{actual:02x})")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// An I/O error occurred while reading or writing packets.
    #[error("packet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete packet was transferred.
    #[error("connection closed (incomplete packet)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
