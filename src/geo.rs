//! The geographic side of a layer: coordinates and the host's projection.

use crate::math::{Point, Vector};

/// A geographic coordinate in degrees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// Converts geographic coordinates into layer pixel space.
///
/// This is provided by the host map, which owns the projection, zoom level
/// and pixel origin.
pub trait Projector {
    /// Projects a coordinate to a point in layer pixels.
    fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> Point;

    /// The horizontal and vertical pixel radii of a circle of `meters` around
    /// `center`.
    ///
    /// The two differ when the projection stretches one axis more than the
    /// other at `center`.
    fn meters_to_pixels(&self, center: LatLng, meters: f64) -> Vector;
}
