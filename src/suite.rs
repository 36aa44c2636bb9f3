//! Suite lifecycle: filter, reset, run tests, summarize, clear hooks, fold.

use tracing::debug;

use crate::clock::{self, Clock};
use crate::context::{Hook, RunContext};
use crate::executor;
use crate::matcher::matches;
use crate::outcome::Outcome;
use crate::reporter::Reporter;

/// Scope handle given to a suite body.
///
/// Tests can only be run and hooks only installed through this handle, so
/// neither can happen outside a running suite.
pub struct Suite<'a> {
    name: &'a str,
    ctx: &'a mut RunContext,
    reporter: &'a mut Reporter,
    clock: &'a dyn Clock,
}

impl<'a> Suite<'a> {
    pub fn name(&self) -> &str {
        self.name
    }

    /// Read-only view of the run, e.g. to inspect the suite's counters so far.
    pub fn context(&self) -> &RunContext {
        &*self.ctx
    }

    /// Runs one test. Tests run in the order this is called.
    pub fn run_test<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce() -> Outcome,
    {
        executor::run_test(self.ctx, self.reporter, self.clock, name, body);
    }

    /// Installs a callback that runs before each test of this suite.
    pub fn set_setup(&mut self, hook: impl FnMut() + 'static) {
        debug!(suite = self.name, "setup hook installed");
        self.ctx.setup = Some(Hook::new(hook));
    }

    /// Like [`Suite::set_setup`], with `data` handed to every invocation.
    pub fn set_setup_with<D: 'static>(&mut self, data: D, hook: impl FnMut(&mut D) + 'static) {
        debug!(suite = self.name, "setup hook installed");
        self.ctx.setup = Some(Hook::with_data(data, hook));
    }

    /// Installs a callback that runs after each test of this suite.
    pub fn set_teardown(&mut self, hook: impl FnMut() + 'static) {
        debug!(suite = self.name, "teardown hook installed");
        self.ctx.teardown = Some(Hook::new(hook));
    }

    pub fn set_teardown_with<D: 'static>(&mut self, data: D, hook: impl FnMut(&mut D) + 'static) {
        debug!(suite = self.name, "teardown hook installed");
        self.ctx.teardown = Some(Hook::with_data(data, hook));
    }
}

/// Runs the suite `name`.
///
/// Returns without output when the suite filter rejects `name`, or when
/// first-failure-stop is on and an earlier suite already failed. Otherwise
/// the suite always completes: counters reset, header printed, body run,
/// summary printed if anything ran, hooks cleared, counters folded.
pub fn run_suite<F>(
    ctx: &mut RunContext,
    reporter: &mut Reporter,
    clock: &dyn Clock,
    name: &str,
    body: F,
) where
    F: FnOnce(&mut Suite<'_>),
{
    if !matches(name, ctx.suite_filter()) {
        debug!(suite = name, "filtered out");
        return;
    }
    if ctx.stops_on_first_failure() && ctx.totals.failed > 0 {
        debug!(suite = name, "skipped after earlier failure");
        return;
    }

    ctx.suite = Default::default();
    ctx.column = 0;
    let pre = clock::sample(clock);
    ctx.suite.pre_suite_time = Some(pre);
    reporter.suite_header(name);
    debug!(suite = name, "started");

    body(&mut Suite {
        name,
        ctx: &mut *ctx,
        reporter: &mut *reporter,
        clock,
    });

    let post = clock::sample(clock);
    ctx.suite.post_suite_time = Some(post);
    let counters = ctx.suite.counters;
    if counters.tests_run > 0 {
        reporter.suite_summary(&counters, post.since(pre));
    }

    ctx.clear_hooks();
    ctx.fold_suite();
    debug!(
        suite = name,
        run = counters.tests_run,
        failed = counters.failed,
        "finished"
    );
}
