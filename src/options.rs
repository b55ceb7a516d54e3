use smallvec::SmallVec;

use crate::color::RGBA8;
use crate::stroke::DEFAULT_DASH_PATTERN;

/// The dash pattern of a sector's border.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "DashLineRepr", into = "DashLineRepr")
)]
pub enum DashLine {
    /// A solid border.
    #[default]
    Off,
    /// The default pattern of an 8 point dash and a 4 point gap.
    Dashed,
    /// Alternating dash and gap lengths, used as given.
    Pattern(SmallVec<[f32; 4]>),
}

impl DashLine {
    /// The dash lengths to apply, or `None` for a solid border.
    pub fn segments(&self) -> Option<&[f32]> {
        match self {
            DashLine::Off => None,
            DashLine::Dashed => Some(&DEFAULT_DASH_PATTERN[..]),
            DashLine::Pattern(segments) => Some(segments.as_slice()),
        }
    }
}

impl From<bool> for DashLine {
    fn from(dashed: bool) -> Self {
        if dashed {
            DashLine::Dashed
        } else {
            DashLine::Off
        }
    }
}

impl From<&[f32]> for DashLine {
    fn from(segments: &[f32]) -> Self {
        DashLine::Pattern(segments.iter().copied().collect())
    }
}

impl<const N: usize> From<[f32; N]> for DashLine {
    fn from(segments: [f32; N]) -> Self {
        DashLine::Pattern(segments.iter().copied().collect())
    }
}

/// Accepts either `true`/`false` or a list of lengths.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum DashLineRepr {
    Flag(bool),
    Pattern(Vec<f32>),
}

#[cfg(feature = "serde")]
impl From<DashLineRepr> for DashLine {
    fn from(repr: DashLineRepr) -> Self {
        match repr {
            DashLineRepr::Flag(flag) => flag.into(),
            DashLineRepr::Pattern(segments) => segments.as_slice().into(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<DashLine> for DashLineRepr {
    fn from(dash: DashLine) -> Self {
        match dash {
            DashLine::Off => DashLineRepr::Flag(false),
            DashLine::Dashed => DashLineRepr::Flag(true),
            DashLine::Pattern(segments) => DashLineRepr::Pattern(segments.to_vec()),
        }
    }
}

/// The configuration of a sector layer.
///
/// With the `serde` feature, options (de)serialize with camelCase keys and
/// colors as CSS hex strings, so `{"fillColor": "#ff0000", "viewAngleRange": 90}`
/// is a valid partial configuration. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SectorOptions {
    /// Whether the radius is in pixels (`true`) or in meters.
    ///
    /// Defaults to `true`.
    pub pixel_radius: bool,

    /// Defaults to `true`.
    pub fill: bool,

    /// Defaults to `#004CB3`.
    #[cfg_attr(feature = "serde", serde(with = "hex_color"))]
    pub fill_color: RGBA8,

    /// Defaults to `0.2`.
    pub fill_opacity: f32,

    /// Fill with a radial gradient from `fill_color` at the center to white
    /// at the rim.
    ///
    /// Defaults to `true`.
    pub fill_gradient: bool,

    /// Whether to hand the sector to the renderer's fill pattern hook, if
    /// one is installed.
    ///
    /// Defaults to `false`.
    pub fill_pattern: bool,

    /// The border width. A width of `0` draws no border.
    ///
    /// Defaults to `0.0`.
    pub border: f32,

    /// Defaults to `#dddddd`.
    #[cfg_attr(feature = "serde", serde(with = "hex_color"))]
    pub border_color: RGBA8,

    /// Defaults to [`DashLine::Off`].
    pub border_dash_line: DashLine,

    /// The bearing of the cone's bisector in degrees, counter-clockwise from
    /// the positive x-axis. Not normalized.
    ///
    /// Defaults to `0.0`.
    pub direction_angle: f64,

    /// The total angular width of the cone in degrees. Values of 360 and
    /// above draw a full disc.
    ///
    /// Defaults to `140.0`.
    pub view_angle_range: f64,
}

impl Default for SectorOptions {
    fn default() -> Self {
        Self {
            pixel_radius: true,
            fill: true,
            fill_color: RGBA8::new(0x00, 0x4c, 0xb3, 0xff),
            fill_opacity: 0.2,
            fill_gradient: true,
            fill_pattern: false,
            border: 0.0,
            border_color: RGBA8::new(0xdd, 0xdd, 0xdd, 0xff),
            border_dash_line: DashLine::Off,
            direction_angle: 0.0,
            view_angle_range: 140.0,
        }
    }
}

impl SectorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixel_radius(mut self, pixel_radius: bool) -> Self {
        self.pixel_radius = pixel_radius;
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    pub fn fill_color(mut self, color: RGBA8) -> Self {
        self.fill_color = color;
        self
    }

    pub fn fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity;
        self
    }

    pub fn fill_gradient(mut self, gradient: bool) -> Self {
        self.fill_gradient = gradient;
        self
    }

    pub fn fill_pattern(mut self, pattern: bool) -> Self {
        self.fill_pattern = pattern;
        self
    }

    pub fn border(mut self, width: f32) -> Self {
        self.border = width;
        self
    }

    pub fn border_color(mut self, color: RGBA8) -> Self {
        self.border_color = color;
        self
    }

    pub fn border_dash_line(mut self, dash: impl Into<DashLine>) -> Self {
        self.border_dash_line = dash.into();
        self
    }

    pub fn direction_angle(mut self, degrees: f64) -> Self {
        self.direction_angle = degrees;
        self
    }

    pub fn view_angle_range(mut self, degrees: f64) -> Self {
        self.view_angle_range = degrees;
        self
    }

    /// Overrides every field that is set in `patch`.
    pub fn merge(&mut self, patch: &SectorStylePatch) {
        let SectorStylePatch {
            fill,
            fill_color,
            fill_opacity,
            fill_gradient,
            fill_pattern,
            border,
            border_color,
            border_dash_line,
            direction_angle,
            view_angle_range,
        } = patch;

        if let Some(v) = fill {
            self.fill = *v;
        }
        if let Some(v) = fill_color {
            self.fill_color = *v;
        }
        if let Some(v) = fill_opacity {
            self.fill_opacity = *v;
        }
        if let Some(v) = fill_gradient {
            self.fill_gradient = *v;
        }
        if let Some(v) = fill_pattern {
            self.fill_pattern = *v;
        }
        if let Some(v) = border {
            self.border = *v;
        }
        if let Some(v) = border_color {
            self.border_color = *v;
        }
        if let Some(v) = border_dash_line {
            self.border_dash_line = v.clone();
        }
        if let Some(v) = direction_angle {
            self.direction_angle = *v;
        }
        if let Some(v) = view_angle_range {
            self.view_angle_range = *v;
        }
    }
}

/// A partial set of style options. Fields left as `None` keep their current
/// value when merged.
///
/// `pixel_radius` is not part of the style, it is fixed at construction.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct SectorStylePatch {
    pub fill: Option<bool>,
    #[cfg_attr(feature = "serde", serde(with = "hex_color::option"))]
    pub fill_color: Option<RGBA8>,
    pub fill_opacity: Option<f32>,
    pub fill_gradient: Option<bool>,
    pub fill_pattern: Option<bool>,
    pub border: Option<f32>,
    #[cfg_attr(feature = "serde", serde(with = "hex_color::option"))]
    pub border_color: Option<RGBA8>,
    pub border_dash_line: Option<DashLine>,
    pub direction_angle: Option<f64>,
    pub view_angle_range: Option<f64>,
}

impl SectorStylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direction_angle(mut self, degrees: f64) -> Self {
        self.direction_angle = Some(degrees);
        self
    }

    pub fn view_angle_range(mut self, degrees: f64) -> Self {
        self.view_angle_range = Some(degrees);
        self
    }

    pub fn fill_color(mut self, color: RGBA8) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn border(mut self, width: f32) -> Self {
        self.border = Some(width);
        self
    }

    pub fn border_dash_line(mut self, dash: impl Into<DashLine>) -> Self {
        self.border_dash_line = Some(dash.into());
        self
    }
}

#[cfg(feature = "serde")]
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::color::{self, RGBA8};

    pub fn serialize<S: Serializer>(c: &RGBA8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color::to_hex(*c))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RGBA8, D::Error> {
        let s = String::deserialize(deserializer)?;
        color::parse_hex(&s).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            c: &Option<RGBA8>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match c {
                Some(c) => serializer.serialize_some(&color::to_hex(*c)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<RGBA8>, D::Error> {
            let s = Option::<String>::deserialize(deserializer)?;
            s.map(|s| color::parse_hex(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
