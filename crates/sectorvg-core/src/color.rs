//! This module re-exports the types from the [`rgb`](https://crates.io/crates/rgb) crate
//! and adds parsing of CSS hex colors.

// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/core/src/color.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use std::str::FromStr;

pub use rgb::*;

/// The color black with full opacity
pub const BLACK: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};
/// The color white with full opacity
pub const WHITE: RGBA8 = RGBA8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};
/// A color with no opacity
pub const TRANSPARENT: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color {0:?} does not start with '#'")]
    MissingHash(String),
    #[error("color {0:?} must have 3, 4, 6 or 8 hex digits")]
    InvalidLength(String),
    #[error("color {0:?} contains a non-hex digit")]
    InvalidDigit(String),
}

/// Parses a CSS hex color such as `#004CB3`, `#ddd` or `#004cb380`.
pub fn parse_hex(s: &str) -> Result<RGBA8, ColorParseError> {
    let trimmed = s.trim();
    let Some(digits) = trimmed.strip_prefix('#') else {
        return Err(ColorParseError::MissingHash(s.to_string()));
    };

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit(s.to_string()));
    }

    let nibble = |i: usize| -> u8 {
        // Already validated as ASCII hex above.
        (digits.as_bytes()[i] as char).to_digit(16).unwrap_or(0) as u8
    };
    let byte = |i: usize| -> u8 { nibble(i) * 16 + nibble(i + 1) };

    match digits.len() {
        3 | 4 => Ok(RGBA8 {
            r: nibble(0) * 17,
            g: nibble(1) * 17,
            b: nibble(2) * 17,
            a: if digits.len() == 4 { nibble(3) * 17 } else { 255 },
        }),
        6 | 8 => Ok(RGBA8 {
            r: byte(0),
            g: byte(2),
            b: byte(4),
            a: if digits.len() == 8 { byte(6) } else { 255 },
        }),
        _ => Err(ColorParseError::InvalidLength(s.to_string())),
    }
}

/// Formats a color as a lowercase CSS hex string, omitting the alpha
/// channel when the color is opaque.
pub fn to_hex(color: RGBA8) -> String {
    if color.a == 255 {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.r, color.g, color.b, color.a
        )
    }
}

/// A color packed as 4 floats representing RGBA channels.
///
/// Note that the color is assumed to be in SRGB format.
#[repr(C)]
#[derive(Default, Debug, Clone, Copy, PartialEq, bytemuck::Zeroable, bytemuck::Pod)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedSrgb(pub [f32; 4]);

impl PackedSrgb {
    /// The color black with full opacity
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    /// The color white with full opacity
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    /// A color with no opacity
    pub const TRANSPARENT: Self = Self([0.0, 0.0, 0.0, 0.0]);

    /// Creates a [`PackedSrgb`] from its SRGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }
    pub fn g(&self) -> f32 {
        self.0[1]
    }
    pub fn b(&self) -> f32 {
        self.0[2]
    }
    pub fn a(&self) -> f32 {
        self.0[3]
    }

    pub fn a_mut(&mut self) -> &mut f32 {
        &mut self.0[3]
    }

    /// Returns this color with its alpha channel multiplied by `alpha`.
    pub fn mul_alpha(mut self, alpha: f32) -> Self {
        *self.a_mut() *= alpha.clamp(0.0, 1.0);
        self
    }

    /// Linearly interpolates between two colors, channel by channel.
    pub fn lerp(self, other: Self, u: f32) -> Self {
        let u = u.clamp(0.0, 1.0);
        let one_minus_u = 1.0 - u;

        Self([
            self.0[0] * one_minus_u + other.0[0] * u,
            self.0[1] * one_minus_u + other.0[1] * u,
            self.0[2] * one_minus_u + other.0[2] * u,
            self.0[3] * one_minus_u + other.0[3] * u,
        ])
    }
}

impl From<RGB8> for PackedSrgb {
    fn from(color: RGB8) -> Self {
        Self([
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            1.0,
        ])
    }
}

impl From<RGBA8> for PackedSrgb {
    fn from(color: RGBA8) -> Self {
        Self([
            f32::from(color.r) / 255.0,
            f32::from(color.g) / 255.0,
            f32::from(color.b) / 255.0,
            f32::from(color.a) / 255.0,
        ])
    }
}

impl From<[f32; 4]> for PackedSrgb {
    fn from(color: [f32; 4]) -> Self {
        Self(color)
    }
}

impl FromStr for PackedSrgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            parse_hex("#004CB3").unwrap(),
            RGBA8 {
                r: 0x00,
                g: 0x4c,
                b: 0xb3,
                a: 255
            }
        );
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(
            parse_hex("#ddd").unwrap(),
            RGBA8 {
                r: 0xdd,
                g: 0xdd,
                b: 0xdd,
                a: 255
            }
        );
        assert_eq!(parse_hex("#fff8").unwrap().a, 0x88);
    }

    #[test]
    fn parses_hex_with_alpha() {
        assert_eq!(parse_hex("#00000080").unwrap().a, 0x80);
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!(
            parse_hex("004CB3"),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            parse_hex("#12345"),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            parse_hex("#00zz00"),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn hex_formatting_matches_parsing() {
        assert_eq!(to_hex(parse_hex("#004CB3").unwrap()), "#004cb3");
        assert_eq!(to_hex(TRANSPARENT), "#00000000");
    }

    #[test]
    fn packed_white_matches_rgba_white() {
        assert_eq!(PackedSrgb::from(WHITE), PackedSrgb::WHITE);
    }

    #[test]
    fn lerp_is_clamped() {
        let c = PackedSrgb::BLACK.lerp(PackedSrgb::WHITE, 2.0);
        assert_eq!(c, PackedSrgb::WHITE);
    }
}
