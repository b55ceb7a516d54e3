// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/graphics/src/gradient.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use std::cmp::Ordering;

use crate::color::PackedSrgb;
use crate::math::Point;

pub const MAX_STOPS: usize = 8;

/// A point along the gradient where the specified [`color`] is unmixed.
///
/// [`color`]: Self::color
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorStop {
    /// Offset along the gradient in the range `[0.0, 1.0]`.
    pub offset: f32,

    /// The color of the gradient at the specified [`offset`].
    ///
    /// [`offset`]: Self::offset
    pub color: PackedSrgb,
}

/// A radial gradient between two concentric circles.
///
/// Points inside `inner_radius` take the color of the first stop and points
/// outside `outer_radius` take the color of the last stop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// [`ColorStop`]s along the gradient, sorted by offset.
    pub stops: [Option<ColorStop>; MAX_STOPS],
}

impl RadialGradient {
    pub const fn new(center: Point, inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: [None; MAX_STOPS],
        }
    }

    /// Adds a new [`ColorStop`], defined by an offset and a color, to the gradient.
    ///
    /// Any `offset` that is not within `0.0..=1.0` will be silently ignored.
    ///
    /// Any stop added after the 8th will be silently ignored.
    pub fn add_stop(mut self, offset: f32, color: impl Into<PackedSrgb>) -> Self {
        if self.stops[MAX_STOPS - 1].is_some() {
            return self;
        }

        if offset.is_finite() && (0.0..=1.0).contains(&offset) {
            // Stops with an equal offset keep insertion order.
            let index = self
                .stops
                .iter()
                .position(|stop| match stop {
                    None => true,
                    Some(stop) => stop.offset.total_cmp(&offset) == Ordering::Greater,
                })
                .unwrap_or(MAX_STOPS);

            if index < MAX_STOPS {
                self.stops[index..].rotate_right(1);
                self.stops[index] = Some(ColorStop {
                    offset,
                    color: color.into(),
                });
            }
        } else {
            log::warn!("Gradient color stop must be within 0.0..=1.0 range.");
        };

        self
    }

    pub fn stops(&self) -> impl Iterator<Item = &ColorStop> {
        self.stops.iter().flatten()
    }

    /// Adjust the opacity of the gradient by a multiplier applied to each color stop.
    pub fn mul_alpha(mut self, alpha_multiplier: f32) -> Self {
        for stop in self.stops.iter_mut().flatten() {
            stop.color = stop.color.mul_alpha(alpha_multiplier);
        }
        self
    }

    /// The position of `point` along the gradient, clamped to `[0.0, 1.0]`.
    pub fn offset_at(&self, point: Point) -> f32 {
        let d = point - self.center;
        let distance = d.x.hypot(d.y);
        let span = self.outer_radius - self.inner_radius;

        if span <= 0.0 {
            return if distance < self.inner_radius { 0.0 } else { 1.0 };
        }

        ((distance - self.inner_radius) / span).clamp(0.0, 1.0)
    }

    /// Samples the color of the gradient at `point`.
    ///
    /// A gradient with no stops is transparent black.
    pub fn color_at(&self, point: Point) -> PackedSrgb {
        let t = self.offset_at(point);

        let mut previous: Option<&ColorStop> = None;
        for stop in self.stops() {
            if t < stop.offset {
                return match previous {
                    None => stop.color,
                    Some(prev) => {
                        let u = (t - prev.offset) / (stop.offset - prev.offset);
                        prev.color.lerp(stop.color, u)
                    }
                };
            }
            previous = Some(stop);
        }

        previous
            .map(|stop| stop.color)
            .unwrap_or(PackedSrgb::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue_to_white() -> RadialGradient {
        RadialGradient::new(Point::new(0.0, 0.0), 10.0, 110.0)
            .add_stop(0.0, PackedSrgb::new(0.0, 0.0, 1.0, 1.0))
            .add_stop(1.0, PackedSrgb::WHITE)
    }

    #[test]
    fn stops_are_sorted_by_offset() {
        let g = RadialGradient::new(Point::zero(), 0.0, 1.0)
            .add_stop(1.0, PackedSrgb::WHITE)
            .add_stop(0.0, PackedSrgb::BLACK)
            .add_stop(0.5, PackedSrgb::TRANSPARENT);

        let offsets: Vec<f32> = g.stops().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn out_of_range_stop_is_ignored() {
        let g = RadialGradient::new(Point::zero(), 0.0, 1.0).add_stop(1.5, PackedSrgb::WHITE);
        assert_eq!(g.stops().count(), 0);
    }

    #[test]
    fn ninth_stop_is_ignored() {
        let mut g = RadialGradient::new(Point::zero(), 0.0, 1.0);
        for i in 0..9 {
            g = g.add_stop(i as f32 / 10.0, PackedSrgb::WHITE);
        }
        assert_eq!(g.stops().count(), MAX_STOPS);
    }

    #[test]
    fn ninth_stop_with_a_smaller_offset_is_ignored() {
        let mut g = RadialGradient::new(Point::zero(), 0.0, 1.0);
        for i in (0..9).rev() {
            g = g.add_stop(i as f32 / 8.0, PackedSrgb::WHITE);
        }

        let offsets: Vec<f32> = g.stops().map(|s| s.offset).collect();
        assert_eq!(offsets.len(), MAX_STOPS);
        assert_eq!(offsets.first(), Some(&0.125));
        assert_eq!(offsets.last(), Some(&1.0));
    }

    #[test]
    fn samples_inside_inner_radius_use_first_stop() {
        let g = blue_to_white();
        assert_eq!(g.color_at(Point::new(5.0, 0.0)), PackedSrgb::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn samples_beyond_outer_radius_use_last_stop() {
        let g = blue_to_white();
        assert_eq!(g.color_at(Point::new(0.0, 500.0)), PackedSrgb::WHITE);
    }

    #[test]
    fn samples_halfway_are_mixed() {
        let g = blue_to_white();
        let c = g.color_at(Point::new(60.0, 0.0));
        assert!((c.r() - 0.5).abs() < 1e-5);
        assert!((c.b() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn alpha_multiplier_applies_to_every_stop() {
        let g = blue_to_white().mul_alpha(0.2);
        assert!(g.stops().all(|s| (s.color.a() - 0.2).abs() < 1e-6));
    }
}
