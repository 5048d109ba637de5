//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{DrawError, Result};

/// An RGBA colour value.
///
/// Ordering compares channels in `r, g, b, a` order, which is the same as
/// comparing the packed `rrggbbaa` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// White. Also the colour of the base texture.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Near-transparent white used to fill blank backgrounds.
    pub const FILLER: Self = Self::new(255, 255, 255, 1);

    /// Stand-in for white pixels when they must be recoloured explicitly.
    pub const PLACEHOLDER: Self = Self::rgb(254, 254, 254);

    /// Parse a hex colour string.
    ///
    /// Accepts `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(s));
        }

        match hex.len() {
            6 => Ok(Self::rgb(
                parse_hex_byte(&hex[0..2], s)?,
                parse_hex_byte(&hex[2..4], s)?,
                parse_hex_byte(&hex[4..6], s)?,
            )),
            8 => Ok(Self::new(
                parse_hex_byte(&hex[0..2], s)?,
                parse_hex_byte(&hex[2..4], s)?,
                parse_hex_byte(&hex[4..6], s)?,
                parse_hex_byte(&hex[6..8], s)?,
            )),
            _ => Err(invalid(s)),
        }
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// True when the RGB channels are all 255, whatever the alpha.
    pub fn is_white(self) -> bool {
        self.r == 255 && self.g == 255 && self.b == 255
    }

    /// Same RGB channels with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Lower-case hex of the RGB channels only.
    pub fn rgb_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<image::Rgba<u8>> for Colour {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self::new(r, g, b, a)
    }
}

impl FromStr for Colour {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

/// Directive form: `rrggbb` when opaque, `rrggbbaa` otherwise.
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn invalid(s: &str) -> DrawError {
    DrawError::InvalidColour {
        value: s.to_string(),
    }
}

/// Parse a two-character hex byte.
fn parse_hex_byte(byte: &str, original: &str) -> Result<u8> {
    u8::from_str_radix(byte, 16).map_err(|_| invalid(original))
}
