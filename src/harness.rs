//! The runner object embedders drive, and the ordered suite registry.
//!
//! ```
//! use trestle::cli::output::OutputBuffer;
//! use trestle::{ensure_eq, pass, Harness, Outcome, RunConfig};
//!
//! let output = OutputBuffer::new();
//! let mut harness = Harness::new(&RunConfig::default(), output.clone());
//! harness.run_suite("math", |suite| {
//!     suite.run_test("adds", || {
//!         ensure_eq!(4, 2 + 2);
//!         pass!()
//!     });
//! });
//! let summary = harness.finish().unwrap();
//! assert!(summary.success());
//! assert!(output.contents().contains("* Suite math:"));
//! ```

use std::process::ExitCode;

use termcolor::StandardStream;

use crate::clock::{self, Clock, Elapsed, MonotonicClock};
use crate::config::RunConfig;
use crate::context::{Counters, RunContext};
use crate::errors::TrestleError;
use crate::reporter::Reporter;
use crate::suite::{self, Suite};

/// A registered suite body.
pub type SuiteBody = Box<dyn Fn(&mut Suite<'_>)>;

/// Suites in declaration order. Run order is declaration order.
#[derive(Default)]
pub struct Registry {
    suites: Vec<(String, SuiteBody)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a suite.
    pub fn suite(mut self, name: impl Into<String>, body: impl Fn(&mut Suite<'_>) + 'static) -> Self {
        self.suites.push((name.into(), Box::new(body)));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.suites.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

/// Final counters of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub totals: Counters,
    pub elapsed: Elapsed,
    pub listed_only: bool,
}

impl RunSummary {
    /// A run succeeds iff no test failed. Skips never count against it.
    pub fn success(&self) -> bool {
        self.totals.failed == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

pub struct Harness {
    ctx: RunContext,
    reporter: Reporter,
    clock: Box<dyn Clock>,
}

impl Harness {
    /// Creates a runner writing to `out`, timed by a [`MonotonicClock`].
    pub fn new(config: &RunConfig, out: impl termcolor::WriteColor + 'static) -> Self {
        let mut harness = Self {
            ctx: RunContext::new(config),
            reporter: Reporter::new(out),
            clock: Box::new(MonotonicClock::new()),
        };
        harness.ctx.begin_time = Some(clock::sample(harness.clock.as_ref()));
        harness
    }

    /// Creates a runner writing to standard output, coloured per `config.color`.
    pub fn stdout(config: &RunConfig) -> Self {
        Self::new(config, StandardStream::stdout(config.color.choice()))
    }

    /// Replaces the clock. The run's begin time is re-sampled from it.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.ctx.begin_time = Some(clock::sample(self.clock.as_ref()));
        self
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    pub fn run_suite<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce(&mut Suite<'_>),
    {
        suite::run_suite(
            &mut self.ctx,
            &mut self.reporter,
            self.clock.as_ref(),
            name,
            body,
        );
    }

    /// Runs every registered suite in declaration order.
    pub fn run_registry(&mut self, registry: &Registry) {
        for (name, body) in &registry.suites {
            self.run_suite(name, |suite| body(suite));
        }
    }

    /// Prints the run summary (unless listing) and returns the final counters.
    ///
    /// Fails only if the reporting stream rejected a write at some point
    /// during the run.
    pub fn finish(mut self) -> Result<RunSummary, TrestleError> {
        let end = clock::sample(self.clock.as_ref());
        self.ctx.end_time = Some(end);
        let elapsed = end.since(self.ctx.begin_time.unwrap_or(end));
        let listed_only = self.ctx.is_list_only();
        if !listed_only {
            self.reporter.run_summary(&self.ctx.totals, elapsed);
        }
        self.reporter.flush();
        if let Some(err) = self.reporter.take_error() {
            return Err(TrestleError::Output(err));
        }
        Ok(RunSummary {
            totals: self.ctx.totals,
            elapsed,
            listed_only,
        })
    }
}
