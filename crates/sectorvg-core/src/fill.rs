// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/graphics/src/geometry/fill.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use crate::color::{PackedSrgb, RGB8, RGBA8};

#[cfg(feature = "gradient")]
use crate::gradient::RadialGradient;

/// The fill rule defines how to determine what is inside and what is outside of
/// a shape.
///
/// See the [SVG specification][1].
///
/// [1]: https://www.w3.org/TR/SVG/painting.html#FillRuleProperty
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// The coloring style used to fill or stroke a path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillStyle {
    /// A solid color.
    Solid(PackedSrgb),

    #[cfg(feature = "gradient")]
    /// A [`RadialGradient`].
    Gradient(RadialGradient),
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::Solid(PackedSrgb::BLACK)
    }
}

impl From<PackedSrgb> for FillStyle {
    fn from(color: PackedSrgb) -> Self {
        Self::Solid(color)
    }
}

#[cfg(feature = "gradient")]
impl From<RadialGradient> for FillStyle {
    fn from(gradient: RadialGradient) -> Self {
        Self::Gradient(gradient)
    }
}

impl From<RGB8> for FillStyle {
    fn from(color: RGB8) -> Self {
        Self::Solid(color.into())
    }
}

impl From<RGBA8> for FillStyle {
    fn from(color: RGBA8) -> Self {
        Self::Solid(color.into())
    }
}
