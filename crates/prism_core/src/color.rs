//! Color types and utilities

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("expected 3, 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Parse a CSS-style hex string: `#rgb`, `#rrggbb` or `#rrggbbaa`.
    ///
    /// The leading `#` is optional and digits are case-insensitive.
    pub fn parse_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(bad));
        }

        // All digits are ASCII hex at this point, so byte slicing is safe.
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    let v = u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
                    v << 4 | v
                };
                Ok(Self::from_rgba8(nibble(0), nibble(1), nibble(2), 255))
            }
            6 => Ok(Self::from_rgba8(byte(0), byte(2), byte(4), 255)),
            8 => Ok(Self::from_rgba8(byte(0), byte(2), byte(4), byte(6))),
            n => Err(ColorParseError::InvalidLength(n)),
        }
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Linear interpolation between two colors, `t` clamped to 0..=1
    pub fn lerp(from: &Color, to: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: from.r + (to.r - from.r) * t,
            g: from.g + (to.g - from.g) * t,
            b: from.b + (to.b - from.b) * t,
            a: from.a + (to.a - from.a) * t,
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    /// Relative luminance per WCAG 2.x, used to pick readable foregrounds
    pub fn luminance(&self) -> f32 {
        fn linear(c: f32) -> f32 {
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Whether the color reads as dark, i.e. light text belongs on top of it
    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.4
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_accepts_short_long_and_alpha_forms() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::WHITE);
        assert_eq!(
            Color::parse_hex("0891B2").unwrap().to_rgba8(),
            [0x08, 0x91, 0xb2, 0xff]
        );
        assert_eq!(
            Color::parse_hex("#11223380").unwrap().to_rgba8(),
            [0x11, 0x22, 0x33, 0x80]
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Color::parse_hex(""), Err(ColorParseError::Empty));
        assert_eq!(Color::parse_hex("#"), Err(ColorParseError::Empty));
        assert_eq!(
            Color::parse_hex("#12345"),
            Err(ColorParseError::InvalidLength(5))
        );
        assert_eq!(
            Color::parse_hex("#12g456"),
            Err(ColorParseError::InvalidDigit('g'))
        );
        assert_eq!(
            Color::parse_hex("+12345"),
            Err(ColorParseError::InvalidDigit('+'))
        );
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Color::from_hex(0x0891B2).to_string(), "#0891b2");
        assert_eq!(
            Color::from_hex(0x0891B2).with_alpha(0.5).to_string(),
            "#0891b280"
        );
    }

    #[test]
    fn from_hex_handles_alpha_form() {
        let c = Color::from_hex(0x11223344);
        assert_eq!(c.to_rgba8(), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(Color::lerp(&Color::BLACK, &Color::WHITE, 2.0), Color::WHITE);
        assert_eq!(Color::lerp(&Color::BLACK, &Color::WHITE, -1.0), Color::BLACK);
    }

    #[test]
    fn dark_detection() {
        assert!(Color::BLACK.is_dark());
        assert!(!Color::WHITE.is_dark());
        assert!(Color::from_hex(0x0F172A).is_dark());
        assert!(!Color::from_hex(0x22D3EE).is_dark());
    }
}
