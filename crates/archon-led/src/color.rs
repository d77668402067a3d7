use std::collections::HashMap;
use std::fmt;

use crate::error::{ColorError, Result};

/// Introduces a literal `RRGGBB` color in a color string. Never a valid code.
pub const ESCAPE: char = '#';

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse exactly six hex digits (`RRGGBB`, either case, no prefix).
    pub fn from_hex(digits: &str) -> Option<Self> {
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ESCAPE}{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Color codes every new [`ColorTable`] starts with.
pub const DEFAULT_COLORS: [(char, Rgb); 9] = [
    ('R', Rgb::new(0xFF, 0x00, 0x00)),
    ('O', Rgb::new(0xFF, 0x7F, 0x00)),
    ('Y', Rgb::new(0xFF, 0xFF, 0x00)),
    ('G', Rgb::new(0x00, 0xFF, 0x00)),
    ('B', Rgb::new(0x00, 0x00, 0xFF)),
    ('I', Rgb::new(0x4B, 0x00, 0x82)),
    ('V', Rgb::new(0x94, 0x00, 0xD3)),
    ('W', Rgb::new(0xFF, 0xFF, 0xFF)),
    ('-', Rgb::new(0x00, 0x00, 0x00)),
];

/// Single-character color codes used by the color-string encoder.
///
/// Each table is an independent value owned by the caller. Codes that are
/// already present, including the defaults, are only replaced when the caller
/// asks for it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    codes: HashMap<char, Rgb>,
}

impl ColorTable {
    /// Create a table holding [`DEFAULT_COLORS`].
    pub fn new() -> Self {
        Self {
            codes: DEFAULT_COLORS.into_iter().collect(),
        }
    }

    /// Create a table with no codes at all.
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Register a color code.
    ///
    /// Codes must be printable. Fails with [`ColorError::ReservedColorCode`] if
    /// `code` is the escape character, whitespace or a control character
    /// (regardless of `allow_overwrite`), or if it is already defined and
    /// `allow_overwrite` is false.
    pub fn register(&mut self, code: char, color: Rgb, allow_overwrite: bool) -> Result<()> {
        if !is_printable(code)
            || code == ESCAPE
            || (self.codes.contains_key(&code) && !allow_overwrite)
        {
            return Err(ColorError::ReservedColorCode(code));
        }

        if let Some(previous) = self.codes.insert(code, color) {
            tracing::debug!(%code, %previous, %color, "color code overwritten");
        } else {
            tracing::debug!(%code, %color, "color code registered");
        }
        Ok(())
    }

    /// Look up the color for a code.
    pub fn get(&self, code: char) -> Option<Rgb> {
        self.codes.get(&code).copied()
    }

    /// Check if a code is defined.
    pub fn contains(&self, code: char) -> bool {
        self.codes.contains_key(&code)
    }

    /// All defined codes, sorted.
    pub fn codes(&self) -> Vec<char> {
        let mut codes: Vec<char> = self.codes.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn is_printable(code: char) -> bool {
    !code.is_control() && !code.is_whitespace()
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}
