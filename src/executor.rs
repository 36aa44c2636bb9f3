//! Runs a single test: eligibility, hooks, body, classification, reporting.

use tracing::trace;

use crate::clock::{self, Clock};
use crate::context::RunContext;
use crate::matcher::matches;
use crate::outcome::Outcome;
use crate::reporter::Reporter;

/// Whether a test named `name` may execute right now.
///
/// A test is eligible when the run is not listing, the current suite has no
/// failure under first-failure-stop, and the name passes the test filter.
pub fn is_eligible(ctx: &RunContext, name: &str) -> bool {
    !ctx.is_list_only()
        && (!ctx.stops_on_first_failure() || ctx.suite.counters.failed == 0)
        && matches(name, ctx.test_filter())
}

/// Executes `body` as the test `name` inside the current suite.
///
/// Ineligible tests are either listed (ListOnly) or dropped silently without
/// touching counters or hooks. Eligible tests run between the suite's setup
/// and teardown hooks; teardown runs whenever setup and the body ran,
/// whatever the body returned.
pub fn run_test<F>(
    ctx: &mut RunContext,
    reporter: &mut Reporter,
    clock: &dyn Clock,
    name: &str,
    body: F,
) where
    F: FnOnce() -> Outcome,
{
    if !is_eligible(ctx, name) {
        if ctx.is_list_only() {
            reporter.listed(name);
        } else {
            trace!(test = name, "not eligible");
        }
        return;
    }

    let pre = clock::sample(clock);
    ctx.suite.pre_test_time = Some(pre);
    if let Some(setup) = ctx.setup.as_mut() {
        setup.invoke();
    }

    let outcome = body();

    let post = clock::sample(clock);
    ctx.suite.post_test_time = Some(post);
    if let Some(teardown) = ctx.teardown.as_mut() {
        teardown.invoke();
    }

    trace!(test = name, outcome = outcome.label(), "classified");
    ctx.record(&outcome);
    reporter.test_finished(ctx, name, &outcome, post.since(pre));
}
