use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::animator::{Oscillator, SectorAnimator};
use crate::error::SectorError;
use crate::geo::{LatLng, Projector};
use crate::math::{Box2D, Rect, Vector};
use crate::options::{SectorOptions, SectorStylePatch};
use crate::timer::Timers;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a layer, stable for the layer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    pub fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// The kind of a layer, used by the renderer to pick a draw function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Sector,
    /// A layer kind defined outside of this crate.
    Custom(u32),
}

/// The capabilities a canvas renderer expects from a vector layer.
pub trait VectorLayer: Any {
    fn id(&self) -> LayerId;

    fn kind(&self) -> LayerKind;

    /// Whether the layer lies entirely outside `view` and can be skipped.
    fn is_empty(&self, view: &Rect, projector: &dyn Projector) -> bool;

    /// Whether the layer changed since it was last drawn.
    fn needs_redraw(&self) -> bool;

    /// Clears the redraw request.
    fn mark_drawn(&self);

    fn as_any(&self) -> &dyn Any;
}

/// The live style of a sector, shared between the layer and its animator.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorStyle {
    options: SectorOptions,
    needs_redraw: bool,
}

impl SectorStyle {
    pub fn new(options: SectorOptions) -> Self {
        Self {
            options,
            needs_redraw: true,
        }
    }

    pub fn options(&self) -> &SectorOptions {
        &self.options
    }

    /// Merges `patch` into the options and requests a redraw.
    pub fn apply(&mut self, patch: &SectorStylePatch) {
        self.options.merge(patch);
        self.needs_redraw = true;
    }

    pub fn set_direction_angle(&mut self, degrees: f64) {
        self.options.direction_angle = degrees;
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn mark_drawn(&mut self) {
        self.needs_redraw = false;
    }
}

/// A pie slice drawn around a geographic center, optionally animated.
///
/// A running animation must be stopped with [`SectorLayer::stop_pendulum`]
/// or [`SectorLayer::remove`] before the layer is dropped, otherwise its task
/// stays scheduled (as a no-op) on the [`Timers`].
#[derive(Debug)]
pub struct SectorLayer {
    id: LayerId,
    center: LatLng,
    radius: f64,
    style: Rc<RefCell<SectorStyle>>,
    animator: SectorAnimator,
}

impl SectorLayer {
    /// Creates a sector at `center`. `radius` is in pixels or meters
    /// depending on [`SectorOptions::pixel_radius`].
    pub fn new(center: LatLng, radius: f64, options: SectorOptions) -> Result<Self, SectorError> {
        if !center.is_finite() {
            return Err(SectorError::InvalidCenter {
                lat: center.lat,
                lng: center.lng,
            });
        }
        validate_radius(radius)?;
        validate_view_angle_range(options.view_angle_range)?;

        Ok(Self {
            id: LayerId::next(),
            center,
            radius,
            style: Rc::new(RefCell::new(SectorStyle::new(options))),
            animator: SectorAnimator::new(),
        })
    }

    pub fn lat_lng(&self) -> LatLng {
        self.center
    }

    pub fn set_lat_lng(&mut self, center: LatLng) -> Result<(), SectorError> {
        if !center.is_finite() {
            return Err(SectorError::InvalidCenter {
                lat: center.lat,
                lng: center.lng,
            });
        }
        self.center = center;
        self.style.borrow_mut().request_redraw();
        Ok(())
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), SectorError> {
        validate_radius(radius)?;
        self.radius = radius;
        self.style.borrow_mut().request_redraw();
        Ok(())
    }

    /// A snapshot of the current options.
    pub fn options(&self) -> SectorOptions {
        self.style.borrow().options().clone()
    }

    pub fn direction_angle(&self) -> f64 {
        self.style.borrow().options().direction_angle
    }

    /// Merges `patch` into the style and requests a redraw.
    ///
    /// A patch with an invalid view angle range is rejected as a whole.
    pub fn set_style(&self, patch: &SectorStylePatch) -> Result<(), SectorError> {
        if let Some(range) = patch.view_angle_range {
            validate_view_angle_range(range)?;
        }
        self.style.borrow_mut().apply(patch);
        Ok(())
    }

    /// The horizontal radius in pixels, and the vertical radius when the
    /// radius is geographic and the projection gives one.
    pub fn pixel_radii(&self, projector: &dyn Projector) -> (f64, Option<f64>) {
        if self.style.borrow().options().pixel_radius {
            (self.radius, None)
        } else {
            let radii = projector.meters_to_pixels(self.center, self.radius);
            (f64::from(radii.x), Some(f64::from(radii.y)))
        }
    }

    /// The pixel bounding box of the full circle around the center.
    pub fn pixel_bounds(&self, projector: &dyn Projector) -> Box2D {
        let center = projector.lat_lng_to_layer_point(self.center);
        let (r, r_y) = self.pixel_radii(projector);
        let half = Vector::new(r as f32, r_y.unwrap_or(r) as f32);
        Box2D::new(center - half, center + half)
    }

    /// Swings the direction angle between `min_angle` and `max_angle` by
    /// `step` degrees every `interval` (200 ms if `None`).
    ///
    /// Any animation already running on this sector is cancelled first.
    pub fn pendulum(
        &mut self,
        timers: &mut Timers,
        step: f64,
        min_angle: f64,
        max_angle: f64,
        interval: Option<Duration>,
    ) {
        let oscillator = Oscillator::pendulum(self.direction_angle(), step, min_angle, max_angle);
        self.animator
            .start(timers, oscillator, interval, Rc::downgrade(&self.style));
    }

    /// Cancels the running pendulum or spin. Does nothing if none is running.
    pub fn stop_pendulum(&mut self, timers: &mut Timers) {
        self.animator.stop(timers);
    }

    /// Rotates the direction angle by `step` degrees every `interval`
    /// (200 ms if `None`) without ever turning back.
    pub fn spin(&mut self, timers: &mut Timers, step: f64, interval: Option<Duration>) {
        let oscillator = Oscillator::spin(self.direction_angle(), step);
        self.animator
            .start(timers, oscillator, interval, Rc::downgrade(&self.style));
    }

    pub fn stop_spin(&mut self, timers: &mut Timers) {
        self.stop_pendulum(timers);
    }

    pub fn is_animating(&self, timers: &Timers) -> bool {
        self.animator.is_running(timers)
    }

    /// Stops any animation and disposes of the layer.
    pub fn remove(mut self, timers: &mut Timers) {
        self.stop_pendulum(timers);
    }
}

impl Drop for SectorLayer {
    fn drop(&mut self) {
        if let Some(id) = self.animator.timer() {
            log::warn!(
                "sector {:?} dropped while {:?} is still scheduled",
                self.id,
                id
            );
        }
    }
}

impl VectorLayer for SectorLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Sector
    }

    fn is_empty(&self, view: &Rect, projector: &dyn Projector) -> bool {
        !view.to_box2d().intersects(&self.pixel_bounds(projector))
    }

    fn needs_redraw(&self) -> bool {
        self.style.borrow().needs_redraw()
    }

    fn mark_drawn(&self) {
        self.style.borrow_mut().mark_drawn();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Creates an animated sector. Alias of [`SectorLayer::new`].
pub fn animated_sector(
    center: impl Into<LatLng>,
    radius: f64,
    options: SectorOptions,
) -> Result<SectorLayer, SectorError> {
    SectorLayer::new(center.into(), radius, options)
}

/// Creates a sector. Alias of [`SectorLayer::new`].
pub fn sector(
    center: impl Into<LatLng>,
    radius: f64,
    options: SectorOptions,
) -> Result<SectorLayer, SectorError> {
    SectorLayer::new(center.into(), radius, options)
}

fn validate_view_angle_range(range: f64) -> Result<(), SectorError> {
    if range.is_finite() && range > 0.0 {
        Ok(())
    } else {
        Err(SectorError::InvalidViewAngleRange(range))
    }
}

fn validate_radius(radius: f64) -> Result<(), SectorError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(SectorError::InvalidRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point, Size};

    struct Identity;

    impl Projector for Identity {
        fn lat_lng_to_layer_point(&self, lat_lng: LatLng) -> Point {
            Point::new(lat_lng.lng as f32, lat_lng.lat as f32)
        }

        fn meters_to_pixels(&self, _center: LatLng, meters: f64) -> Vector {
            Vector::new(meters as f32, meters as f32 / 2.0)
        }
    }

    fn layer(radius: f64) -> SectorLayer {
        SectorLayer::new(LatLng::new(100.0, 100.0), radius, SectorOptions::default()).unwrap()
    }

    #[test]
    fn rejects_invalid_construction() {
        let center = LatLng::new(0.0, 0.0);
        assert_eq!(
            SectorLayer::new(center, -1.0, SectorOptions::default()).unwrap_err(),
            SectorError::InvalidRadius(-1.0)
        );
        assert!(matches!(
            SectorLayer::new(center, f64::NAN, SectorOptions::default()),
            Err(SectorError::InvalidRadius(_))
        ));
        assert_eq!(
            SectorLayer::new(center, 10.0, SectorOptions::default().view_angle_range(0.0))
                .unwrap_err(),
            SectorError::InvalidViewAngleRange(0.0)
        );
        assert!(matches!(
            SectorLayer::new(LatLng::new(f64::NAN, 0.0), 10.0, SectorOptions::default()),
            Err(SectorError::InvalidCenter { .. })
        ));
    }

    #[test]
    fn view_angle_range_above_full_turn_is_accepted() {
        let center = LatLng::new(0.0, 0.0);
        assert!(
            SectorLayer::new(center, 10.0, SectorOptions::default().view_angle_range(400.0))
                .is_ok()
        );
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(layer(1.0).id(), layer(1.0).id());
    }

    #[test]
    fn set_style_requests_redraw() {
        let l = layer(10.0);
        l.mark_drawn();
        assert!(!l.needs_redraw());

        l.set_style(&SectorStylePatch::new().direction_angle(90.0))
            .unwrap();
        assert!(l.needs_redraw());
        assert_eq!(l.direction_angle(), 90.0);
    }

    #[test]
    fn set_style_rejects_invalid_view_angle_range() {
        let l = layer(10.0);
        l.mark_drawn();

        for range in [0.0, -30.0, f64::NAN] {
            let patch = SectorStylePatch::new()
                .direction_angle(45.0)
                .view_angle_range(range);
            assert!(matches!(
                l.set_style(&patch),
                Err(SectorError::InvalidViewAngleRange(_))
            ));
        }

        assert_eq!(l.options().view_angle_range, 140.0);
        assert_eq!(l.direction_angle(), 0.0);
        assert!(!l.needs_redraw());
    }

    #[test]
    fn options_snapshot_survives_animation_ticks() {
        let mut timers = Timers::new();
        let mut l = layer(10.0);
        l.spin(&mut timers, 5.0, None);

        let before = l.options();
        timers.advance(std::time::Duration::from_millis(400));

        assert_eq!(before.direction_angle, 0.0);
        assert_eq!(l.direction_angle(), 10.0);
        l.remove(&mut timers);
    }

    #[test]
    fn geographic_radius_uses_projection() {
        let l = SectorLayer::new(
            LatLng::new(0.0, 0.0),
            100.0,
            SectorOptions::default().pixel_radius(false),
        )
        .unwrap();
        assert_eq!(l.pixel_radii(&Identity), (100.0, Some(50.0)));
        assert_eq!(layer(100.0).pixel_radii(&Identity), (100.0, None));
    }

    #[test]
    fn layer_outside_view_is_empty() {
        let l = layer(10.0);
        let view = Rect::new(Point::new(0.0, 0.0), Size::new(200.0, 200.0));
        assert!(!l.is_empty(&view, &Identity));

        let far = Rect::new(Point::new(500.0, 500.0), Size::new(10.0, 10.0));
        assert!(l.is_empty(&far, &Identity));
    }

    #[test]
    fn pendulum_replaces_previous_animation() {
        let mut timers = Timers::new();
        let mut l = layer(10.0);

        l.pendulum(&mut timers, 10.0, 0.0, 30.0, None);
        l.spin(&mut timers, 5.0, None);
        assert_eq!(timers.len(), 1);

        l.remove(&mut timers);
        assert!(timers.is_empty());
    }
}
