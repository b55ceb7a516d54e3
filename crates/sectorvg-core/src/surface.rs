//! The 2D drawing surface that layers paint onto.
//!
//! The API mirrors the immediate-mode calls of an HTML canvas context, since
//! that is the contract map renderers are written against. Path points are
//! transformed by the current transform at the time they are added, while
//! line widths and dash lengths use the transform at the time of the stroke.

use crate::fill::FillStyle;
use crate::math::{Angle, Point, Vector};

#[cfg(feature = "gradient")]
use crate::gradient::RadialGradient;

pub trait DrawingSurface {
    /// Pushes the current drawing state (transform, styles, alpha, line
    /// width and dash pattern) onto the state stack.
    fn save(&mut self);

    /// Pops the most recently saved drawing state. Does nothing if the
    /// stack is empty.
    fn restore(&mut self);

    /// Applies a translation to the current transform.
    fn translate(&mut self, offset: Vector);

    /// Applies a non-uniform scaling to the current transform.
    fn scale(&mut self, x: f32, y: f32);

    /// Starts a new, empty path.
    fn begin_path(&mut self);

    /// Starts a new sub-path at `point`.
    fn move_to(&mut self, point: Point);

    /// Connects the current point to `point` with a straight line.
    fn line_to(&mut self, point: Point);

    /// Adds a circular arc around `center`.
    ///
    /// If the path has a current point, it is first connected to the start of
    /// the arc with a straight line.
    fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    );

    /// Closes the current sub-path with a straight line to its start.
    fn close_path(&mut self);

    fn set_fill_style(&mut self, style: FillStyle);

    fn set_stroke_style(&mut self, style: FillStyle);

    /// Sets the alpha applied to everything filled or stroked afterwards.
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_line_width(&mut self, width: f32);

    /// Sets the dash pattern for strokes. An empty slice strokes solid lines.
    fn set_line_dash(&mut self, segments: &[f32]);

    /// Fills the current path with the current fill style.
    fn fill(&mut self);

    /// Strokes the current path with the current stroke style.
    fn stroke(&mut self);

    /// Creates a radial gradient between two concentric circles.
    #[cfg(feature = "gradient")]
    fn create_radial_gradient(
        &mut self,
        center: Point,
        inner_radius: f32,
        outer_radius: f32,
    ) -> RadialGradient {
        RadialGradient::new(center, inner_radius, outer_radius)
    }
}
