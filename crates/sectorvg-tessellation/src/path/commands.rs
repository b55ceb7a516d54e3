use sectorvg_core::math::{Point, Transform};

use super::{ArcPath, Path, PathBuilder};

const INIT_COMMANDS_SIZE: usize = 32;

/// A single path command in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo { ctrl: Point, to: Point },
    Close,
}

/// The path currently under construction on a drawing surface.
///
/// Points are transformed into surface coordinates as they are added, so
/// transforms applied afterwards do not affect them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<PathCommand>,
    current: Option<Point>,
    subpath_start: Option<Point>,
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(INIT_COMMANDS_SIZE),
            current: None,
            subpath_start: None,
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.current = None;
        self.subpath_start = None;
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// The current point in surface coordinates, if any.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    pub fn move_to(&mut self, point: Point, transform: &Transform) {
        let point = transform.transform_point(point);
        self.commands.push(PathCommand::MoveTo(point));
        self.current = Some(point);
        self.subpath_start = Some(point);
    }

    pub fn line_to(&mut self, point: Point, transform: &Transform) {
        if self.current.is_none() {
            self.move_to(point, transform);
            return;
        }

        let point = transform.transform_point(point);
        self.commands.push(PathCommand::LineTo(point));
        self.current = Some(point);
    }

    /// Adds `arc`, connecting it to the current point with a straight line
    /// if there is one.
    ///
    /// The arc is approximated by quadratic curves before being transformed,
    /// so a non-uniform scale turns it into an elliptical arc.
    pub fn arc(&mut self, arc: &ArcPath, transform: &Transform) {
        let start = arc.start_point();
        if self.current.is_some() {
            self.line_to(start, transform);
        } else {
            self.move_to(start, transform);
        }

        arc.for_each_quadratic_bezier(|ctrl, to| {
            let ctrl = transform.transform_point(ctrl);
            let to = transform.transform_point(to);
            self.commands.push(PathCommand::QuadraticTo { ctrl, to });
            self.current = Some(to);
        });
    }

    pub fn close(&mut self) {
        if self.current.is_none() {
            return;
        }

        self.commands.push(PathCommand::Close);
        self.current = self.subpath_start;
    }

    /// Builds an immutable [`Path`] out of the recorded commands.
    pub fn to_path(&self) -> Path {
        let mut builder = PathBuilder::new();
        for command in self.commands.iter() {
            builder = match *command {
                PathCommand::MoveTo(p) => builder.move_to(p),
                PathCommand::LineTo(p) => builder.line_to(p),
                PathCommand::QuadraticTo { ctrl, to } => builder.quadratic_curve_to(ctrl, to),
                PathCommand::Close => builder.close(),
            };
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sectorvg_core::math::Angle;

    #[test]
    fn points_use_transform_at_insertion() {
        let mut buffer = CommandBuffer::new();
        let translate = Transform::translation(10.0, 20.0);

        buffer.move_to(Point::new(1.0, 1.0), &translate);
        buffer.line_to(Point::new(2.0, 2.0), &Transform::identity());

        assert_eq!(
            buffer.commands(),
            &[
                PathCommand::MoveTo(Point::new(11.0, 21.0)),
                PathCommand::LineTo(Point::new(2.0, 2.0)),
            ]
        );
    }

    #[test]
    fn arc_after_move_is_joined_by_a_line() {
        let mut buffer = CommandBuffer::new();
        let identity = Transform::identity();

        buffer.move_to(Point::zero(), &identity);
        buffer.arc(
            &ArcPath {
                center: Point::zero(),
                radius: 10.0,
                start_angle: Angle::radians(0.0),
                end_angle: Angle::radians(-1.0),
                anticlockwise: true,
            },
            &identity,
        );
        buffer.close();

        assert_eq!(
            buffer.commands()[1],
            PathCommand::LineTo(Point::new(10.0, 0.0))
        );
        assert_eq!(buffer.commands().last(), Some(&PathCommand::Close));
        assert_eq!(buffer.current_point(), Some(Point::zero()));
    }

    #[test]
    fn scaled_arc_becomes_elliptical() {
        let mut buffer = CommandBuffer::new();
        let scale = Transform::scale(1.0, 0.5);

        buffer.arc(
            &ArcPath {
                center: Point::zero(),
                radius: 100.0,
                start_angle: Angle::radians(0.0),
                end_angle: Angle::radians(std::f32::consts::FRAC_PI_2),
                anticlockwise: false,
            },
            &scale,
        );

        let end = buffer.current_point().unwrap();
        assert!(end.x.abs() < 1e-3);
        assert!((end.y - 50.0).abs() < 1e-3);
    }
}
