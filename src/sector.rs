//! Painting a [`SectorLayer`] onto a [`DrawingSurface`].

use crate::color::PackedSrgb;
use crate::fill::FillStyle;
use crate::geo::Projector;
use crate::layer::{LayerKind, SectorLayer, VectorLayer};
use crate::math::{degrees, Angle, Point, Vector};
use crate::renderer::CanvasRenderer;
use crate::surface::DrawingSurface;

/// The pixel-space shape of a sector for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorGeometry {
    /// The projected center in layer pixels.
    pub center: Point,
    /// The horizontal radius, rounded to whole pixels.
    pub radius: f32,
    /// The vertical radius divided by the horizontal one.
    pub scale_y: f32,
    pub start_angle: Angle,
    pub end_angle: Angle,
}

impl SectorGeometry {
    /// Returns `None` if the radius rounds to zero pixels.
    ///
    /// Angles are in degrees, counter-clockwise from east. The arc runs from
    /// `-(direction - range / 2)` to `-(direction + range / 2)` so that it
    /// opens counter-clockwise on a y-down surface.
    pub fn compute(
        center: Point,
        radius: f64,
        radius_y: Option<f64>,
        direction_angle: f64,
        view_angle_range: f64,
    ) -> Option<Self> {
        let r = radius.round();
        if r.is_nan() || r <= 0.0 {
            return None;
        }

        let scale_y = match radius_y {
            Some(ry) if ry.is_finite() => ry.round().max(1.0) / r,
            _ => 1.0,
        };

        let half_range = view_angle_range / 2.0;

        Some(Self {
            center,
            radius: r as f32,
            scale_y: scale_y as f32,
            start_angle: degrees(-(direction_angle - half_range)),
            end_angle: degrees(-(direction_angle + half_range)),
        })
    }
}

/// Installs [`update_sector`] as the draw function for sectors.
pub fn register_sector_renderer(renderer: &mut CanvasRenderer) {
    renderer.register(LayerKind::Sector, update_sector);
}

/// Draws a sector layer. Layers of any other type are ignored.
///
/// Returns `false` if no frame is active or the sector is outside the frame
/// bounds. A sector whose radius rounds to zero pixels counts as drawn.
pub fn update_sector(
    renderer: &mut CanvasRenderer,
    layer: &dyn VectorLayer,
    surface: &mut dyn DrawingSurface,
    projector: &dyn Projector,
) -> bool {
    let Some(sector) = layer.as_any().downcast_ref::<SectorLayer>() else {
        log::debug!("{:?} is registered as a sector but is not one", layer.id());
        return false;
    };

    if !renderer.is_drawing() || renderer.is_culled(layer, projector) {
        return false;
    }

    let (radius, radius_y) = sector.pixel_radii(projector);
    let options = sector.options();
    let center = projector.lat_lng_to_layer_point(sector.lat_lng());

    let Some(geometry) = SectorGeometry::compute(
        center,
        radius,
        radius_y,
        options.direction_angle,
        options.view_angle_range,
    ) else {
        return true;
    };

    let s = geometry.scale_y;
    let r = geometry.radius;

    surface.save();
    if s != 1.0 {
        surface.scale(1.0, s);
    }

    surface.begin_path();
    surface.translate(Vector::new(center.x, center.y / s));
    surface.move_to(Point::zero());
    surface.arc(
        Point::zero(),
        r,
        geometry.start_angle,
        geometry.end_angle,
        true,
    );
    surface.close_path();

    if options.fill {
        let color = PackedSrgb::from(options.fill_color);
        let style = fill_style(surface, r, color, options.fill_gradient);
        surface.set_fill_style(style);
        surface.set_global_alpha(options.fill_opacity);
        surface.fill();
    }

    if options.fill_pattern {
        renderer.apply_fill_pattern(surface, layer);
    }

    if options.border > 0.0 {
        surface.set_line_width(options.border);
        surface.set_stroke_style(options.border_color.into());
        if let Some(segments) = options.border_dash_line.segments() {
            surface.set_line_dash(segments);
        }
        surface.stroke();
    }

    surface.restore();

    renderer.register_drawn(layer.id());
    true
}

#[cfg(feature = "gradient")]
fn fill_style(
    surface: &mut dyn DrawingSurface,
    radius: f32,
    color: PackedSrgb,
    gradient: bool,
) -> FillStyle {
    if !gradient {
        return color.into();
    }

    surface
        .create_radial_gradient(Point::zero(), (radius / 20.0).floor(), radius)
        .add_stop(0.0, color)
        .add_stop(1.0, crate::color::WHITE)
        .into()
}

#[cfg(not(feature = "gradient"))]
fn fill_style(
    _surface: &mut dyn DrawingSurface,
    _radius: f32,
    color: PackedSrgb,
    _gradient: bool,
) -> FillStyle {
    color.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn arc_angles_are_negated_degrees() {
        let g = SectorGeometry::compute(Point::zero(), 100.0, None, 90.0, 140.0).unwrap();
        assert!(close(g.start_angle.radians, -20.0 * PI / 180.0));
        assert!(close(g.end_angle.radians, -160.0 * PI / 180.0));
        assert_eq!(g.scale_y, 1.0);
    }

    #[test]
    fn radius_is_rounded() {
        let g = SectorGeometry::compute(Point::zero(), 99.6, None, 0.0, 90.0).unwrap();
        assert_eq!(g.radius, 100.0);
        assert!(SectorGeometry::compute(Point::zero(), 0.4, None, 0.0, 90.0).is_none());
        assert!(SectorGeometry::compute(Point::zero(), 0.0, None, 0.0, 90.0).is_none());
    }

    #[test]
    fn y_radius_sets_vertical_scale() {
        let g = SectorGeometry::compute(Point::zero(), 100.0, Some(50.0), 0.0, 90.0).unwrap();
        assert_eq!(g.scale_y, 0.5);

        let g = SectorGeometry::compute(Point::zero(), 100.0, Some(0.1), 0.0, 90.0).unwrap();
        assert_eq!(g.scale_y, 0.01);
    }
}
