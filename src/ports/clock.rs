//! Clock port.
//!
//! The evaluator takes every instant as an explicit parameter; this port
//! is where those instants come from. Handlers hold a `dyn Clock` so
//! tests can pin time and exercise trial boundaries without waiting or
//! mocking globals.

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current moment.
    fn now(&self) -> Timestamp;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = Timestamp::from_unix_secs(1_700_000_000);
        assert_eq!(FixedClock(instant).now(), instant);
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(first <= second);
    }

    #[test]
    fn clock_is_object_safe() {
        fn _accepts_dyn(_clock: &dyn Clock) {}
    }
}
