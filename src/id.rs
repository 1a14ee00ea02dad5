//! Employee identifier generation.
//!
//! Identifiers are seeded from the wall clock (milliseconds since the Unix
//! epoch) but forced to increase strictly: `next = max(now, last + 1)`. The
//! generator is primed with the largest identifier already in the collection
//! so a fresh page load never reissues a stored id, even if the clock moved
//! backwards.

use std::cell::Cell;

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock via chrono (works on `wasm32` through `Date.now()`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(now: u64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: u64) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Issues strictly increasing, positive identifiers.
#[derive(Debug, Clone)]
pub struct IdGenerator<C: Clock = SystemClock> {
    clock: C,
    last: u64,
}

impl IdGenerator<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> IdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, last: 0 }
    }

    /// Never issue anything at or below `id`.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }

    /// Prime from every identifier present in a collection.
    pub fn observe_all(&mut self, ids: impl IntoIterator<Item = Option<u64>>) {
        for id in ids.into_iter().flatten() {
            self.observe(id);
        }
    }

    /// `None` once `u64::MAX` has been issued or observed.
    pub fn next_id(&mut self) -> Option<u64> {
        let next = self.clock.now_millis().max(self.last.checked_add(1)?);
        self.last = next;
        Some(next)
    }

    /// Largest identifier issued or observed so far.
    pub fn last(&self) -> u64 {
        self.last
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_clock_when_ahead() {
        let mut ids = IdGenerator::new(ManualClock::new(1_000));
        assert_eq!(ids.next_id(), Some(1_000));
        ids.clock().set(5_000);
        assert_eq!(ids.next_id(), Some(5_000));
    }

    #[test]
    fn test_same_millisecond_still_unique() {
        let mut ids = IdGenerator::new(ManualClock::new(42));
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!((a, b, c), (Some(42), Some(43), Some(44)));
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut ids = IdGenerator::new(ManualClock::new(100));
        ids.next_id();
        ids.clock().set(10);
        assert_eq!(ids.next_id(), Some(101));
    }

    #[test]
    fn test_observed_ids_are_never_reissued() {
        let mut ids = IdGenerator::new(ManualClock::new(0));
        ids.observe_all([Some(7), None, Some(900), Some(3)]);
        assert_eq!(ids.next_id(), Some(901));
    }

    #[test]
    fn test_zero_clock_still_positive() {
        let mut ids = IdGenerator::new(ManualClock::new(0));
        assert_eq!(ids.next_id(), Some(1));
    }

    #[test]
    fn test_exhausted_after_max() {
        let mut ids = IdGenerator::new(ManualClock::new(0));
        ids.observe(u64::MAX);
        assert_eq!(ids.next_id(), None);

        let mut ids = IdGenerator::new(ManualClock::new(u64::MAX - 1));
        assert_eq!(ids.next_id(), Some(u64::MAX - 1));
        assert_eq!(ids.next_id(), Some(u64::MAX));
        assert_eq!(ids.next_id(), None);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
