//! Monotonic time samples for suite, test, and run timing.
//!
//! A clock read that yields no sample is fatal: every summary line reports
//! elapsed time, so a run without a working clock is terminated on the spot.

use std::cell::Cell;
use std::fmt;
use std::process;
use std::time::{Duration, Instant};

use crate::errors::TrestleError;

/// A point on a clock's timeline, measured from the clock's own origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Stamp(Duration);

impl Stamp {
    pub const fn from_duration(offset: Duration) -> Self {
        Stamp(offset)
    }

    /// Time elapsed between `earlier` and this stamp. Never negative.
    pub fn since(self, earlier: Stamp) -> Elapsed {
        Elapsed(self.0.saturating_sub(earlier.0))
    }
}

/// Elapsed time as printed in summaries: `(<ticks> ticks, <secs> sec)`.
///
/// One tick is one microsecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed(pub Duration);

impl Elapsed {
    pub fn ticks(&self) -> u128 {
        self.0.as_micros()
    }

    pub fn seconds(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} ticks, {:.3} sec)", self.ticks(), self.seconds())
    }
}

/// Source of monotonic time samples.
pub trait Clock {
    /// Returns `None` when the underlying time source is unavailable.
    fn now(&self) -> Option<Stamp>;
}

/// Wall-independent clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Option<Stamp> {
        Some(Stamp(Instant::now().checked_duration_since(self.origin)?))
    }
}

/// A clock that never moves. Every elapsed figure reads zero, which makes
/// captured output reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> Option<Stamp> {
        Some(Stamp::default())
    }
}

/// A clock that advances by a fixed step on every read.
#[derive(Debug, Default)]
pub struct SteppingClock {
    step: Duration,
    current: Cell<Duration>,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            current: Cell::new(Duration::ZERO),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Option<Stamp> {
        let now = self.current.get();
        self.current.set(now + self.step);
        Some(Stamp(now))
    }
}

/// Reads `clock`, terminating the process if it cannot produce a sample.
pub fn sample(clock: &dyn Clock) -> Stamp {
    match clock.now() {
        Some(stamp) => stamp,
        None => fatal(TrestleError::Clock),
    }
}

/// Renders `error` on standard error and exits with a failure status.
pub fn fatal(error: TrestleError) -> ! {
    tracing::error!(%error, "aborting run");
    eprintln!("{:?}", miette::Report::new(error));
    process::exit(1)
}
