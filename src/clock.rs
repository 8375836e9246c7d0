//! Time source used for pacing and scheduling.

use embassy_time::{Duration, Instant};

/// Monotonic clock with a blocking delay.
///
/// Animation code never sleeps on its own: every pause goes through this
/// trait, so a test or a simulator can substitute virtual time.
pub trait Clock {
    /// Current timestamp
    fn now(&self) -> Instant;

    /// Block the calling context for `duration`
    fn delay(&self, duration: Duration);
}

/// Clock backed by the `embassy-time` driver of the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn delay(&self, duration: Duration) {
        if duration.as_ticks() != 0 {
            embassy_time::block_for(duration);
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn delay(&self, duration: Duration) {
        (**self).delay(duration);
    }
}
