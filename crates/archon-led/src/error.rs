use archon_frame::FrameError;

/// Errors that can occur while encoding color strings or editing a color table.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// A character is neither a registered color code nor the escape character.
    #[error("unknown color code {code:?} at position {position}")]
    UnknownColorCode { code: char, position: usize },

    /// The six characters after an escape are not a hex RGB value.
    #[error("invalid hex color {sequence:?} in escape at position {position}")]
    InvalidHexSequence { sequence: String, position: usize },

    /// The input ended before an escape collected six hex digits.
    #[error("color string ends inside escape sequence ({partial:?}, expected 6 hex digits)")]
    TruncatedEscapeSequence { partial: String },

    /// The code is the escape character or not printable, or is already
    /// defined and overwriting was not allowed.
    #[error("color code {0:?} is reserved")]
    ReservedColorCode(char),

    /// The LED index would not fit in the one-byte index field.
    #[error("LED index overflow (LED {count} after start index {start} exceeds 255)")]
    LedIndexOverflow { start: u8, count: usize },

    /// Packet construction failed.
    #[error(transparent)]
    Frame(#[from] FrameError),
}

pub type Result<T> = std::result::Result<T, ColorError>;
