use std::cell::RefCell;
use std::rc::Weak;
use std::time::Duration;

use crate::layer::SectorStyle;
use crate::timer::{TimerId, Timers};

/// The interval used when none (or zero) is given.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// Moves an angle back and forth between two bounds by a fixed step.
///
/// On every tick the trend flips to `-1` once the angle reaches `max_angle`
/// and to `+1` once it reaches `min_angle`, then the angle moves by one step
/// in the direction of the trend. Both bounds are inclusive.
///
/// If `min_angle > max_angle` the angle drifts instead of oscillating, and a
/// zero step leaves it in place. Neither is an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    angle: f64,
    step: f64,
    min_angle: f64,
    max_angle: f64,
    trend: f64,
}

impl Oscillator {
    /// The sign of `step` is ignored, the trend decides the direction.
    pub fn pendulum(start_angle: f64, step: f64, min_angle: f64, max_angle: f64) -> Self {
        if min_angle > max_angle {
            log::warn!(
                "pendulum bounds are reversed ({} > {}), the angle will drift",
                min_angle,
                max_angle
            );
        }
        if step == 0.0 {
            log::warn!("pendulum step is zero, the angle will not move");
        }

        Self {
            angle: start_angle,
            step: step.abs(),
            min_angle,
            max_angle,
            trend: 1.0,
        }
    }

    /// Rotates forever from `start_angle` without an upper bound.
    pub fn spin(start_angle: f64, step: f64) -> Self {
        Self::pendulum(start_angle, step, start_angle, f64::MAX)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// `1.0` while the angle is increasing, `-1.0` while it is decreasing.
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Advances the angle by one step and returns it.
    pub fn tick(&mut self) -> f64 {
        if self.angle >= self.max_angle {
            self.trend = -1.0;
        }
        if self.angle <= self.min_angle {
            self.trend = 1.0;
        }

        let next = self.angle + self.trend * self.step;
        if next.is_finite() {
            self.angle = next;
        }

        self.angle
    }
}

/// Owns the single repeating task that drives a sector's direction angle.
#[derive(Debug, Default)]
pub struct SectorAnimator {
    timer: Option<TimerId>,
}

impl SectorAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any running oscillation with `oscillator`, ticking every
    /// `interval` (or [`DEFAULT_INTERVAL`]).
    ///
    /// Each tick writes the new angle into `style`. Ticks that happen after
    /// the style has been dropped do nothing.
    pub fn start(
        &mut self,
        timers: &mut Timers,
        mut oscillator: Oscillator,
        interval: Option<Duration>,
        style: Weak<RefCell<SectorStyle>>,
    ) {
        self.stop(timers);

        let interval = interval
            .filter(|i| !i.is_zero())
            .unwrap_or(DEFAULT_INTERVAL);

        let id = timers.set_interval(interval, move || {
            let Some(style) = style.upgrade() else {
                return;
            };

            let angle = oscillator.tick();
            log::trace!("sector direction angle -> {}", angle);
            style.borrow_mut().set_direction_angle(angle);
        });

        self.timer = Some(id);
    }

    /// Cancels the running oscillation, if any.
    pub fn stop(&mut self, timers: &mut Timers) {
        if let Some(id) = self.timer.take() {
            timers.clear_interval(id);
        }
    }

    /// Whether an oscillation is scheduled on `timers`.
    pub fn is_running(&self, timers: &Timers) -> bool {
        self.timer.is_some_and(|id| timers.is_active(id))
    }

    pub(crate) fn timer(&self) -> Option<TimerId> {
        self.timer
    }
}
