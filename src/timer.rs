//! A deterministic, single-threaded queue of repeating tasks.
//!
//! The host event loop owns a [`Timers`] and calls [`Timers::advance`] with
//! the wall-clock time that has passed. Due tasks run to completion one at
//! a time, ordered by deadline and then by the order they were scheduled.

use std::fmt;
use std::time::Duration;

use thunderdome::Arena;

/// The shortest interval a task can repeat at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Identifies a scheduled repeating task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(thunderdome::Index);

struct IntervalTask {
    interval: Duration,
    next_due: Duration,
    seq: u64,
    callback: Box<dyn FnMut()>,
}

pub struct Timers {
    tasks: Arena<IntervalTask>,
    now: Duration,
    next_seq: u64,
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("active", &self.tasks.len())
            .field("now", &self.now)
            .finish()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    pub fn new() -> Self {
        Self {
            tasks: Arena::new(),
            now: Duration::ZERO,
            next_seq: 0,
        }
    }

    /// The time elapsed since this queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Schedules `callback` to run every `interval`, first at
    /// `now + interval`.
    ///
    /// Intervals shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn set_interval(&mut self, interval: Duration, callback: impl FnMut() + 'static) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = TimerId(self.tasks.insert(IntervalTask {
            interval,
            next_due: self.now + interval,
            seq,
            callback: Box::new(callback),
        }));

        log::debug!("scheduled {:?} every {:?}", id, interval);

        id
    }

    /// Cancels a task. Returns `false` if it was not scheduled.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let removed = self.tasks.remove(id.0).is_some();
        if removed {
            log::debug!("cancelled {:?}", id);
        }
        removed
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.tasks.contains(id.0)
    }

    /// Moves the clock forward by `elapsed`, running every task that becomes
    /// due on the way. A task that falls several intervals behind runs once
    /// per missed interval.
    ///
    /// Returns the number of task runs.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let target = self.now + elapsed;
        let mut fired = 0;

        while let Some(index) = self.next_due(target) {
            let Some(task) = self.tasks.get_mut(index) else {
                break;
            };

            self.now = task.next_due;
            task.next_due += task.interval;
            (task.callback)();
            fired += 1;
        }

        self.now = target;
        fired
    }

    fn next_due(&self, target: Duration) -> Option<thunderdome::Index> {
        self.tasks
            .iter()
            .filter(|(_, task)| task.next_due <= target)
            .min_by_key(|(_, task)| (task.next_due, task.seq))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter(timers: &mut Timers, interval_ms: u64) -> (TimerId, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = timers.set_interval(Duration::from_millis(interval_ms), move || {
            c.set(c.get() + 1)
        });
        (id, count)
    }

    #[test]
    fn fires_once_per_interval() {
        let mut timers = Timers::new();
        let (_, count) = counter(&mut timers, 200);

        assert_eq!(timers.advance(Duration::from_millis(199)), 0);
        assert_eq!(timers.advance(Duration::from_millis(1)), 1);
        assert_eq!(timers.advance(Duration::from_millis(1000)), 5);
        assert_eq!(count.get(), 6);
        assert_eq!(timers.now(), Duration::from_millis(1200));
    }

    #[test]
    fn cleared_task_stops_firing() {
        let mut timers = Timers::new();
        let (id, count) = counter(&mut timers, 100);

        timers.advance(Duration::from_millis(250));
        assert!(timers.clear_interval(id));
        assert!(!timers.is_active(id));
        timers.advance(Duration::from_millis(1000));

        assert_eq!(count.get(), 2);
        assert!(!timers.clear_interval(id));
    }

    #[test]
    fn tasks_run_in_deadline_order() {
        let mut timers = Timers::new();
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));

        for (name, ms) in [("slow", 30u64), ("fast", 20)] {
            let log = Rc::clone(&log);
            timers.set_interval(Duration::from_millis(ms), move || log.borrow_mut().push(name));
        }

        timers.advance(Duration::from_millis(60));
        assert_eq!(
            *log.borrow(),
            vec!["fast", "slow", "fast", "slow", "fast"]
        );
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut timers = Timers::new();
        let (_, count) = counter(&mut timers, 0);
        timers.advance(Duration::from_millis(5));
        assert_eq!(count.get(), 5);
    }
}
