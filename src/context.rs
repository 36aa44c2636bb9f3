//! Run-wide mutable state threaded through the executor, suite runner, and
//! reporter.
//!
//! A [`RunContext`] is created once from a [`RunConfig`] before the first
//! suite and read once after the last. Only the engine mutates it; callers see
//! it through read-only accessors.

use std::fmt;

use crate::clock::Stamp;
use crate::config::RunConfig;
use crate::outcome::{Failure, Outcome};

bitflags::bitflags! {
    /// Run modes selected before the run starts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// One line per test instead of one glyph.
        const VERBOSE = 0x01;
        /// Stop running tests once any test has failed.
        const FIRST_FAILURE_STOP = 0x02;
        /// Enumerate suites and tests without executing anything.
        const LIST_ONLY = 0x04;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::empty()
    }
}

/// Pass/fail/skip tallies. `tests_run == passed + failed + skipped` holds after
/// every [`Counters::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub tests_run: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Counters {
    pub fn new(passed: usize, failed: usize, skipped: usize) -> Self {
        Self {
            tests_run: passed + failed + skipped,
            passed,
            failed,
            skipped,
        }
    }

    /// Counts one classified outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Pass { .. } => self.passed += 1,
            Outcome::Fail(_) => self.failed += 1,
            Outcome::Skip { .. } => self.skipped += 1,
        }
        self.tests_run += 1;
    }

    /// Adds another tally into this one.
    pub fn absorb(&mut self, other: &Counters) {
        self.tests_run += other.tests_run;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }

    pub fn is_consistent(&self) -> bool {
        self.tests_run == self.passed + self.failed + self.skipped
    }
}

/// Counters and clock samples for the suite currently running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteCounters {
    pub counters: Counters,
    pub pre_suite_time: Option<Stamp>,
    pub post_suite_time: Option<Stamp>,
    pub pre_test_time: Option<Stamp>,
    pub post_test_time: Option<Stamp>,
}

/// A setup or teardown callback bound to the running suite.
pub struct Hook(Box<dyn FnMut()>);

impl Hook {
    pub fn new(hook: impl FnMut() + 'static) -> Self {
        Hook(Box::new(hook))
    }

    /// Binds `data` to the hook; every invocation receives it mutably.
    pub fn with_data<D: 'static>(mut data: D, mut hook: impl FnMut(&mut D) + 'static) -> Self {
        Hook(Box::new(move || hook(&mut data)))
    }

    pub fn invoke(&mut self) {
        (self.0)()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hook(..)")
    }
}

#[derive(Debug)]
pub struct RunContext {
    pub(crate) flags: Flags,
    pub(crate) totals: Counters,
    pub(crate) suite: SuiteCounters,
    pub(crate) last_failure: Option<Failure>,
    pub(crate) setup: Option<Hook>,
    pub(crate) teardown: Option<Hook>,
    pub(crate) column: usize,
    pub(crate) width: usize,
    pub(crate) suite_filter: Option<String>,
    pub(crate) test_filter: Option<String>,
    pub(crate) begin_time: Option<Stamp>,
    pub(crate) end_time: Option<Stamp>,
}

impl RunContext {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            flags: config.flags,
            totals: Counters::default(),
            suite: SuiteCounters::default(),
            last_failure: None,
            setup: None,
            teardown: None,
            column: 0,
            width: config.width.max(1),
            suite_filter: config.suite_filter.clone(),
            test_filter: config.test_filter.clone(),
            begin_time: None,
            end_time: None,
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn is_verbose(&self) -> bool {
        self.flags.contains(Flags::VERBOSE)
    }

    pub fn is_list_only(&self) -> bool {
        self.flags.contains(Flags::LIST_ONLY)
    }

    pub fn stops_on_first_failure(&self) -> bool {
        self.flags.contains(Flags::FIRST_FAILURE_STOP)
    }

    /// Sum over every suite folded so far.
    pub fn totals(&self) -> &Counters {
        &self.totals
    }

    pub fn suite(&self) -> &SuiteCounters {
        &self.suite
    }

    /// The failure recorded by the most recently executed test, if it failed.
    pub fn last_failure(&self) -> Option<&Failure> {
        self.last_failure.as_ref()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn suite_filter(&self) -> Option<&str> {
        self.suite_filter.as_deref()
    }

    pub fn test_filter(&self) -> Option<&str> {
        self.test_filter.as_deref()
    }

    pub fn has_setup(&self) -> bool {
        self.setup.is_some()
    }

    pub fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }

    pub fn begin_time(&self) -> Option<Stamp> {
        self.begin_time
    }

    pub fn end_time(&self) -> Option<Stamp> {
        self.end_time
    }

    /// Classifies one outcome into the current suite's counters.
    pub(crate) fn record(&mut self, outcome: &Outcome) {
        self.suite.counters.record(outcome);
        self.last_failure = match outcome {
            Outcome::Fail(failure) => Some(failure.clone()),
            _ => None,
        };
    }

    pub(crate) fn clear_hooks(&mut self) {
        self.setup = None;
        self.teardown = None;
    }

    /// Folds the finished suite into the run totals and starts a fresh record.
    pub(crate) fn fold_suite(&mut self) -> SuiteCounters {
        let finished = std::mem::take(&mut self.suite);
        self.totals.absorb(&finished.counters);
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn counters_stay_consistent() {
        let mut counters = Counters::default();
        counters.record(&Outcome::pass());
        counters.record(&Outcome::fail("x", "f", 1));
        counters.record(&Outcome::skip());
        assert!(counters.is_consistent());
        assert_eq!(counters, Counters::new(1, 1, 1));
    }

    #[test]
    fn fold_adds_instead_of_overwriting() {
        let mut ctx = RunContext::new(&RunConfig::default());
        ctx.record(&Outcome::pass());
        ctx.fold_suite();
        ctx.record(&Outcome::fail("x", "f", 1));
        ctx.record(&Outcome::skip());
        ctx.fold_suite();
        assert_eq!(*ctx.totals(), Counters::new(1, 1, 1));
        assert_eq!(ctx.suite().counters, Counters::default());
    }

    #[test]
    fn last_failure_is_overwritten_by_next_test() {
        let mut ctx = RunContext::new(&RunConfig::default());
        ctx.record(&Outcome::fail("first", "f", 1));
        assert_eq!(ctx.last_failure().map(|f| f.message.as_str()), Some("first"));
        ctx.record(&Outcome::pass());
        assert!(ctx.last_failure().is_none());
    }

    #[test]
    fn hook_with_data_sees_its_payload() {
        let seen = Rc::new(Cell::new(0));
        let probe = seen.clone();
        let mut hook = Hook::with_data(10u32, move |n: &mut u32| {
            *n += 1;
            probe.set(*n);
        });
        hook.invoke();
        hook.invoke();
        assert_eq!(seen.get(), 12);
    }

    #[test]
    fn zero_width_is_clamped() {
        let ctx = RunContext::new(&RunConfig::default().with_width(0));
        assert_eq!(ctx.width(), 1);
    }
}
