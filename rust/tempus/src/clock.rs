//! Wall-clock capability.
//!
//! Nothing in the crate reads the system time directly; `now` operations take
//! a [`Clock`], with [`SystemClock`] as the production implementation.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::NANOS_PER_SECOND;

/// A Unix instant: seconds since 1970-01-01T00:00:00Z plus a nanosecond
/// fraction in `0..1_000_000_000`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub const UNIX_EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    /// Normalizes `nanos` into the fraction, carrying whole seconds.
    pub const fn new(seconds: i64, nanos: i64) -> Timestamp {
        Timestamp {
            seconds: seconds + nanos.div_euclid(NANOS_PER_SECOND),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        }
    }
}

/// Source of the current UTC instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Reads `std::time::SystemTime` on every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => Timestamp {
                seconds: elapsed.as_secs() as i64,
                nanos: elapsed.subsec_nanos(),
            },
            // The system clock is set before 1970.
            Err(e) => {
                let before = e.duration();
                Timestamp::new(-(before.as_secs() as i64), -(before.subsec_nanos() as i64))
            }
        };
        log::trace!("system clock read {}.{:09}", now.seconds, now.nanos);
        now
    }
}

/// A clock frozen at one instant, for tests and replay.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    pub fn new(seconds: i64, nanos: u32) -> FixedClock {
        FixedClock(Timestamp { seconds, nanos })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
