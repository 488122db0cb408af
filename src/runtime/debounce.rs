//! Button debouncing.
//!
//! Mechanical switches bounce; a raw level is only accepted once it has
//! been stable longer than the debounce window. A change in the raw
//! reading restarts the timer, so a contact that flips faster than the
//! window never produces an accepted edge.

use std::time::{Duration, Instant};

use crate::hal::Level;

pub struct Debouncer {
    window: Duration,
    last_raw: Level,
    accepted: Level,
    changed_at: Instant,
}

impl Debouncer {
    pub fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            last_raw: Level::High,
            accepted: Level::High,
            changed_at: now,
        }
    }

    /// Feed one raw reading; returns true on an accepted press edge
    /// (buttons are active-low, so that is the High -> Low transition).
    pub fn update(&mut self, raw: Level, now: Instant) -> bool {
        if raw != self.last_raw {
            self.changed_at = now;
            self.last_raw = raw;
        }

        if now.duration_since(self.changed_at) > self.window && raw != self.accepted {
            self.accepted = raw;
            return self.accepted == Level::Low;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(50);

    fn at(t0: Instant, ms: u64) -> Instant {
        t0 + Duration::from_millis(ms)
    }

    #[test]
    fn level_held_past_the_window_is_accepted_exactly_once() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, t0);

        assert!(!d.update(Level::Low, at(t0, 1)));
        assert!(!d.update(Level::Low, at(t0, 30)));
        assert!(d.update(Level::Low, at(t0, 60)));
        // Still held: no further edges.
        assert!(!d.update(Level::Low, at(t0, 100)));
        assert!(!d.update(Level::Low, at(t0, 500)));
    }

    #[test]
    fn bouncing_faster_than_the_window_is_never_accepted() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, t0);

        let mut level = Level::Low;
        for ms in (0..1000).step_by(20) {
            assert!(!d.update(level, at(t0, ms)));
            level = match level {
                Level::Low => Level::High,
                Level::High => Level::Low,
            };
        }
    }

    #[test]
    fn release_edge_is_not_a_press() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, t0);

        assert!(!d.update(Level::Low, at(t0, 1)));
        assert!(d.update(Level::Low, at(t0, 60)));

        assert!(!d.update(Level::High, at(t0, 70)));
        // Stable release: accepted, but not reported as a press.
        assert!(!d.update(Level::High, at(t0, 130)));

        // A second full press produces exactly one more edge.
        assert!(!d.update(Level::Low, at(t0, 140)));
        assert!(d.update(Level::Low, at(t0, 200)));
    }

    #[test]
    fn bounce_then_settle_produces_one_edge() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW, t0);

        // Chatter on contact...
        assert!(!d.update(Level::Low, at(t0, 0)));
        assert!(!d.update(Level::High, at(t0, 5)));
        assert!(!d.update(Level::Low, at(t0, 10)));
        assert!(!d.update(Level::High, at(t0, 15)));
        assert!(!d.update(Level::Low, at(t0, 20)));
        // ...then the level settles.
        assert!(!d.update(Level::Low, at(t0, 60)));
        assert!(d.update(Level::Low, at(t0, 75)));
        assert!(!d.update(Level::Low, at(t0, 90)));
    }
}
