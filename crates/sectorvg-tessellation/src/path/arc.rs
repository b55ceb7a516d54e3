// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/graphics/src/geometry/path/arc.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use lyon::geom;
use lyon::math;

use sectorvg_core::math::{arc_sweep, Angle, Point};

/// A circular arc, described the way the HTML canvas `arc()` call does.
#[derive(Debug, Clone, Copy)]
pub struct ArcPath {
    /// The center of the arc.
    pub center: Point,
    /// The radius of the arc.
    pub radius: f32,
    /// The start of the segment's angle, clockwise rotation from positive x-axis.
    pub start_angle: Angle,
    /// The end of the segment's angle, clockwise rotation from positive x-axis.
    pub end_angle: Angle,
    /// Whether the arc is traced from `start_angle` to `end_angle` against
    /// the clock.
    pub anticlockwise: bool,
}

impl ArcPath {
    /// The signed angle covered by the arc.
    pub fn sweep_angle(&self) -> Angle {
        arc_sweep(self.start_angle, self.end_angle, self.anticlockwise)
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.start_angle + self.sweep_angle())
    }

    fn point_at(&self, angle: Angle) -> Point {
        Point::new(
            self.center.x + self.radius * angle.radians.cos(),
            self.center.y + self.radius * angle.radians.sin(),
        )
    }

    /// Approximates the arc with quadratic bezier segments, calling `f` with
    /// the control point and end point of each.
    pub fn for_each_quadratic_bezier(&self, mut f: impl FnMut(Point, Point)) {
        let arc = geom::Arc {
            center: math::Point::new(self.center.x, self.center.y),
            radii: math::Vector::new(self.radius, self.radius),
            x_rotation: math::Angle::radians(0.0),
            start_angle: math::Angle::radians(self.start_angle.radians),
            sweep_angle: math::Angle::radians(self.sweep_angle().radians),
        };

        arc.for_each_quadratic_bezier(&mut |curve| {
            f(
                Point::new(curve.ctrl.x, curve.ctrl.y),
                Point::new(curve.to.x, curve.to.y),
            );
        });
    }
}
