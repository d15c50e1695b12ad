//! Pacing policies applied between failed mining attempts.
//!
//! Pacing throttles the search so its progress can be watched in logs. It
//! has nothing to do with hashing power, and production nodes run with
//! [`NoPacing`].

use std::fmt;
use std::time::Duration;

/// Called by the miner after each attempt whose digest missed the target.
pub trait Pacing: Send + Sync + fmt::Debug {
    /// Block before the next attempt. `attempt` counts from 1.
    fn pause(&self, attempt: u64);
}

/// Search at full speed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    #[inline]
    fn pause(&self, _attempt: u64) {}
}

/// Sleep for a fixed duration after every failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Pacing for FixedDelay {
    fn pause(&self, _attempt: u64) {
        std::thread::sleep(self.0);
    }
}

/// Pick a policy for a configured delay: zero means no pacing.
pub fn for_delay(delay: Duration) -> Box<dyn Pacing> {
    if delay.is_zero() {
        Box::new(NoPacing)
    } else {
        Box::new(FixedDelay(delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn fixed_delay_sleeps() {
        let pacing = FixedDelay(Duration::from_millis(20));
        let start = Instant::now();
        pacing.pause(1);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn for_delay_picks_policy() {
        assert_eq!(format!("{:?}", for_delay(Duration::ZERO)), "NoPacing");
        assert_eq!(
            format!("{:?}", for_delay(Duration::from_millis(5))),
            "FixedDelay(5ms)"
        );
    }
}
