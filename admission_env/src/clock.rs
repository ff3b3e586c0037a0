//! Logical clock and the one-shot deadline latch.

use crate::types::Tick;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// The single authoritative time source of a run.
///
/// A free-running counter with no pause and no rewind. Clones share the same
/// counter, so every actor reads the value the timekeeper advances.
#[derive(Clone, Debug, Default)]
pub struct LogicalClock {
    ticks: Arc<AtomicU64>,
}

impl LogicalClock {
    /// Creates a clock at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current tick.
    pub fn now(&self) -> Tick {
        Tick(self.ticks.load(Ordering::SeqCst))
    }

    /// Advances the clock and returns the new reading.
    pub fn advance(&self, by: u64) -> Tick {
        let previous = self.ticks.fetch_add(by, Ordering::SeqCst);
        Tick(previous.saturating_add(by))
    }
}

/// Fires exactly once, on the first reading at or past the deadline.
///
/// Comparing with `>=` instead of equality keeps the latch correct when the
/// clock jumps over the deadline; the swap keeps it from firing again.
#[derive(Debug)]
pub struct DeadlineLatch {
    at: Tick,
    fired: AtomicBool,
}

impl DeadlineLatch {
    pub fn new(at: Tick) -> Self {
        Self {
            at,
            fired: AtomicBool::new(false),
        }
    }

    /// The deadline tick.
    pub fn at(&self) -> Tick {
        self.at
    }

    /// True while `now` is strictly before the deadline.
    pub fn is_open(&self, now: Tick) -> bool {
        now < self.at
    }

    /// Returns true for exactly one call whose `now` reached the deadline.
    pub fn try_fire(&self, now: Tick) -> bool {
        now >= self.at && !self.fired.swap(true, Ordering::AcqRel)
    }

    /// Whether the latch has fired.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clock_advances() {
        let clock = LogicalClock::new();
        assert_eq!(clock.now(), Tick::ZERO);

        assert_eq!(clock.advance(1), Tick(1));
        assert_eq!(clock.advance(4), Tick(5));
        assert_eq!(clock.now(), Tick(5));
    }

    #[test]
    fn test_clock_clone_shares_counter() {
        let clock = LogicalClock::new();
        let reader = clock.clone();

        clock.advance(3);
        assert_eq!(reader.now(), Tick(3));
    }

    #[test]
    fn test_latch_fires_once_at_deadline() {
        let latch = DeadlineLatch::new(Tick(3));

        assert!(latch.is_open(Tick(2)));
        assert!(!latch.try_fire(Tick(2)));
        assert!(!latch.has_fired());

        assert!(latch.try_fire(Tick(3)));
        assert!(!latch.is_open(Tick(3)));
        assert!(!latch.try_fire(Tick(3)));
        assert!(!latch.try_fire(Tick(4)));
        assert!(latch.has_fired());
    }

    #[test]
    fn test_latch_fires_once_across_threads() {
        let latch = Arc::new(DeadlineLatch::new(Tick(10)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.try_fire(Tick(10)))
            })
            .collect();

        let fired = handles
            .into_iter()
            .map(|h| h.join().expect("thread joins"))
            .filter(|fired| *fired)
            .count();
        assert_eq!(fired, 1);
    }

    proptest! {
        #[test]
        fn prop_latch_fires_exactly_once_for_any_step_size(
            deadline in 1u64..500,
            steps in prop::collection::vec(1u64..50, 1..200),
        ) {
            let clock = LogicalClock::new();
            let latch = DeadlineLatch::new(Tick(deadline));
            let mut fires = 0;

            for step in &steps {
                let now = clock.advance(*step);
                if latch.try_fire(now) {
                    fires += 1;
                    prop_assert!(now >= Tick(deadline));
                }
            }

            let total: u64 = steps.iter().sum();
            let expected = if total >= deadline { 1 } else { 0 };
            prop_assert_eq!(fires, expected);
        }
    }
}
