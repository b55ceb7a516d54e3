use std::f32::consts::TAU;

pub use euclid;

/// A point in units of logical points.
///
/// Alias for ```euclid::default::Point2D<f32>```.
pub type Point = euclid::default::Point2D<f32>;

/// A vector in units of logical points.
///
/// Alias for ```euclid::default::Vector2D<f32>```.
pub type Vector = euclid::default::Vector2D<f32>;

/// A size in units of logical points.
///
/// Alias for ```euclid::default::Size2D<f32>```.
pub type Size = euclid::default::Size2D<f32>;

/// A rectangle in units of logical points.
///
/// Alias for ```euclid::default::Rect<f32>```
pub type Rect = euclid::default::Rect<f32>;

/// Alias for ```euclid::default::Box2D<f32>```
pub type Box2D = euclid::default::Box2D<f32>;

/// Alias for ```euclid::default::Transform2D<f32>```
pub type Transform = euclid::default::Transform2D<f32>;

/// An angle in radians (f32).
///
/// Alias for ```euclid::Angle<f32>```
pub type Angle = euclid::Angle<f32>;

/// Converts an angle in degrees to an [`Angle`].
pub fn degrees(degrees: f64) -> Angle {
    Angle::radians(degrees.to_radians() as f32)
}

/// The signed sweep of an arc traced from `start_angle` to `end_angle`,
/// following the rules of the HTML canvas `arc()` call.
///
/// A positive sweep runs clockwise on a y-down surface. When `anticlockwise`
/// is `true` the result is in `[-TAU, 0]`, otherwise it is in `[0, TAU]`.
/// A difference of a full turn or more yields a full circle.
pub fn arc_sweep(start_angle: Angle, end_angle: Angle, anticlockwise: bool) -> Angle {
    let (from, to) = if anticlockwise {
        (end_angle.radians, start_angle.radians)
    } else {
        (start_angle.radians, end_angle.radians)
    };

    let sweep = if to - from >= TAU {
        TAU
    } else {
        (to - from).rem_euclid(TAU)
    };

    if anticlockwise {
        Angle::radians(-sweep)
    } else {
        Angle::radians(sweep)
    }
}

/// The uniform scale factor that best approximates `transform`, used to scale
/// line widths and dash lengths the way a canvas does.
pub fn transform_scale_factor(transform: &Transform) -> f32 {
    transform.determinant().abs().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn anticlockwise_sweep_is_negative() {
        let sweep = arc_sweep(Angle::radians(0.5), Angle::radians(-1.0), true);
        assert!((sweep.radians + 1.5).abs() < 1e-6);
    }

    #[test]
    fn anticlockwise_sweep_wraps_when_end_is_ahead() {
        // Going anticlockwise from 0 to PI/2 covers three quarters of a turn.
        let sweep = arc_sweep(Angle::radians(0.0), Angle::radians(PI / 2.0), true);
        assert!((sweep.radians + 1.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn full_turn_or_more_is_full_circle() {
        let sweep = arc_sweep(Angle::radians(0.0), Angle::radians(-3.0 * PI), true);
        assert_eq!(sweep.radians, -TAU);

        let sweep = arc_sweep(Angle::radians(0.0), Angle::radians(TAU), false);
        assert_eq!(sweep.radians, TAU);
    }

    #[test]
    fn equal_angles_have_no_sweep() {
        let sweep = arc_sweep(Angle::radians(1.0), Angle::radians(1.0), true);
        assert_eq!(sweep.radians, 0.0);
    }

    #[test]
    fn scale_factor_of_anisotropic_scale() {
        let t = Transform::scale(1.0, 0.25);
        assert!((transform_scale_factor(&t) - 0.5).abs() < 1e-6);
    }
}
