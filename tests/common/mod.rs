#![allow(dead_code)]

use sectorvg::fill::FillStyle;
use sectorvg::geo::{LatLng, Projector};
use sectorvg::math::{Angle, Point, Vector};
use sectorvg::surface::DrawingSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Save,
    Restore,
    Translate(Vector),
    Scale(f32, f32),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    },
    ClosePath,
    SetFillStyle(FillStyle),
    SetStrokeStyle(FillStyle),
    SetGlobalAlpha(f32),
    SetLineWidth(f32),
    SetLineDash(Vec<f32>),
    Fill,
    Stroke,
}

/// Records every call made to it, in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| f(c)).count()
    }

    pub fn find<T>(&self, f: impl Fn(&Call) -> Option<T>) -> Option<T> {
        self.calls.iter().find_map(f)
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }

    fn translate(&mut self, offset: Vector) {
        self.calls.push(Call::Translate(offset));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.calls.push(Call::Scale(x, y));
    }

    fn begin_path(&mut self) {
        self.calls.push(Call::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.calls.push(Call::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.calls.push(Call::LineTo(point));
    }

    fn arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: Angle,
        end_angle: Angle,
        anticlockwise: bool,
    ) {
        self.calls.push(Call::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.calls.push(Call::SetFillStyle(style));
    }

    fn set_stroke_style(&mut self, style: FillStyle) {
        self.calls.push(Call::SetStrokeStyle(style));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(Call::SetGlobalAlpha(alpha));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::SetLineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        self.calls.push(Call::SetLineDash(segments.to_vec()));
    }

    fn fill(&mut self) {
        self.calls.push(Call::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(Call::Stroke);
    }
}

/// Maps `lng` to x and `lat` to y one to one, with a projection that squashes
/// geographic circles to half their height.
pub struct FlatProjector;

impl Projector for FlatProjector {
    fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> Point {
        Point::new(lat_lng.lng as f32, lat_lng.lat as f32)
    }

    fn meters_to_pixels(&self, _center: LatLng, meters: f64) -> Vector {
        Vector::new(meters as f32, meters as f32 / 2.0)
    }
}
