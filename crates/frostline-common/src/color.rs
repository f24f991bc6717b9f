//! Hex color values.
//!
//! Colors enter the system as user-facing `#rrggbb` strings (settings form,
//! persisted preferences, config files). They are validated once here and
//! carried as a packed 24-bit value afterwards, so the generators never see
//! a malformed color.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// Returns whether `value` is a well-formed `#` + 6 hex digit color.
///
/// Both upper and lower case digits are accepted.
#[must_use]
pub fn is_valid_hex_color(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

/// A validated `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(u32);

impl HexColor {
    /// Creates a color from a packed `0xRRGGBB` value. Bits above 24 are dropped.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value & 0x00FF_FFFF)
    }

    /// Parses a `#rrggbb` string.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        if !is_valid_hex_color(value) {
            return Err(ColorError::InvalidColor(value.to_string()));
        }
        u32::from_str_radix(&value[1..], 16)
            .map(Self)
            .map_err(|_| ColorError::InvalidColor(value.to_string()))
    }

    /// Splits the color into its red, green and blue channels.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb {
        Rgb {
            r: ((self.0 >> 16) & 0xFF) as u8,
            g: ((self.0 >> 8) & 0xFF) as u8,
            b: (self.0 & 0xFF) as u8,
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Decoded 8-bit color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Creates a channel triple.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the channels as a CSS `rgba(...)` color with the given alpha.
    #[must_use]
    pub fn to_rgba_css(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}
