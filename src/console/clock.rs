//! Time sources, the synthetic telemetry rate, and the periodic scheduler
//!
//! Time is injected through [`TimeSource`] so tests drive ticks with a
//! [`ManualClock`] instead of sleeping.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

/// Real wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: DateTime<Utc>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

/// Fluctuating downlink rate shown on the orbit view, Mb/s
#[derive(Debug, Clone)]
pub struct TelemetryRate {
    rng: StdRng,
    min: u32,
    max: u32,
    current: u32,
}

impl TelemetryRate {
    pub const DEFAULT_MIN: u32 = 110;
    pub const DEFAULT_MAX: u32 = 150;

    /// `seed` makes the sequence reproducible; `None` seeds from entropy.
    /// The range is inclusive and reordered if given backwards.
    pub fn new(min: u32, max: u32, seed: Option<u64>) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            min,
            max,
            current: 120_u32.clamp(min, max),
        }
    }

    pub fn sample(&mut self) -> u32 {
        self.current = self.rng.gen_range(self.min..=self.max);
        self.current
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}

impl Default for TelemetryRate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX, None)
    }
}

/// Most periods a task may fire for in one `due` call before it is
/// re-anchored to `now` (e.g. after the terminal was suspended)
pub const MAX_CATCH_UP: u32 = 5;

#[derive(Debug, Clone)]
struct PeriodicTask<T> {
    period: Duration,
    next_due: DateTime<Utc>,
    task: T,
}

/// Fixed-interval scheduler driven by an external clock reading.
///
/// Each call to [`Scheduler::due`] returns every firing whose due time has
/// passed, ordered by due time. A task never fires twice for the same period
/// and two firings of one task are never returned out of order.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    tasks: Vec<PeriodicTask<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// First firing is one `period` after `start`
    pub fn schedule_every(&mut self, start: DateTime<Utc>, period: Duration, task: T) {
        let period = period.max(Duration::milliseconds(1));
        self.tasks.push(PeriodicTask {
            period,
            next_due: start + period,
            task,
        });
    }

    pub fn due(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut fired: Vec<(DateTime<Utc>, usize, T)> = Vec::new();
        for (index, entry) in self.tasks.iter_mut().enumerate() {
            let mut count = 0;
            while entry.next_due <= now && count < MAX_CATCH_UP {
                fired.push((entry.next_due, index, entry.task.clone()));
                entry.next_due += entry.period;
                count += 1;
            }
            if entry.next_due <= now {
                entry.next_due = now + entry.period;
            }
        }
        fired.sort_by_key(|(at, index, _)| (*at, *index));
        fired.into_iter().map(|(_, _, task)| task).collect()
    }

    /// Earliest pending firing, used to bound input polling
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.tasks.iter().map(|t| t.next_due).min()
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Task {
        Tick,
        Blink,
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new(start());
        clock.advance(Duration::seconds(3));
        assert_eq!(clock.now(), start() + Duration::seconds(3));
    }

    #[test]
    fn nothing_due_before_first_period() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(start(), Duration::seconds(1), Task::Tick);
        assert!(scheduler.due(start() + Duration::milliseconds(999)).is_empty());
        assert_eq!(scheduler.due(start() + Duration::seconds(1)), vec![Task::Tick]);
        // Same instant again does not fire twice
        assert!(scheduler.due(start() + Duration::seconds(1)).is_empty());
    }

    #[test]
    fn firings_are_ordered_by_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(start(), Duration::seconds(1), Task::Tick);
        scheduler.schedule_every(start(), Duration::milliseconds(400), Task::Blink);
        let fired = scheduler.due(start() + Duration::seconds(1));
        // Blink at 400ms and 800ms, tick at 1000ms
        assert_eq!(fired, vec![Task::Blink, Task::Blink, Task::Tick]);
    }

    #[test]
    fn catch_up_is_bounded_then_reanchored() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(start(), Duration::seconds(1), Task::Tick);
        let late = start() + Duration::seconds(60);
        assert_eq!(scheduler.due(late).len(), MAX_CATCH_UP as usize);
        assert_eq!(scheduler.next_due(), Some(late + Duration::seconds(1)));
        assert!(scheduler.due(late).is_empty());
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(start(), Duration::zero(), Task::Tick);
        assert_eq!(scheduler.next_due(), Some(start() + Duration::milliseconds(1)));
    }

    #[test]
    fn seeded_telemetry_is_reproducible_and_in_range() {
        let mut a = TelemetryRate::new(110, 150, Some(7));
        let mut b = TelemetryRate::new(110, 150, Some(7));
        for _ in 0..100 {
            let value = a.sample();
            assert_eq!(value, b.sample());
            assert!((110..=150).contains(&value));
        }
    }

    #[test]
    fn backwards_telemetry_range_is_reordered() {
        let mut rate = TelemetryRate::new(150, 110, Some(1));
        assert_eq!(rate.current(), 120);
        for _ in 0..50 {
            assert!((110..=150).contains(&rate.sample()));
        }
    }
}
