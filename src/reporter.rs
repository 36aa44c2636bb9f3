//! Renders test events to the reporting stream.
//!
//! Two modes share one stream: compact output appends a single glyph per test
//! and wraps at the configured width, verbose output writes one line per
//! test. Suite headers, suite summaries, and the run summary look the same in
//! both modes.
//!
//! Write failures never interrupt a run. The first one is latched and handed
//! back by [`Reporter::take_error`]; later writes are dropped.

use std::io;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::clock::Elapsed;
use crate::context::{Counters, RunContext};
use crate::outcome::{Failure, Mismatch, Outcome};

/// Advances the compact-output column by one.
///
/// Returns the new column and whether the line is full and must wrap; a
/// wrapped line restarts at column zero.
pub fn next_column(current: usize, width: usize) -> (usize, bool) {
    let next = current + 1;
    if next >= width {
        (0, true)
    } else {
        (next, false)
    }
}

pub struct Reporter {
    out: Box<dyn WriteColor>,
    error: Option<io::Error>,
}

impl Reporter {
    pub fn new(out: impl WriteColor + 'static) -> Self {
        Self {
            out: Box::new(out),
            error: None,
        }
    }

    /// The first write error seen so far, if any. Clears the latch.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn suite_header(&mut self, name: &str) {
        self.emit(|out| writeln!(out, "\n* Suite {}:", name));
    }

    /// A listing entry, printed in ListOnly mode instead of running the test.
    pub fn listed(&mut self, name: &str) {
        self.emit(|out| writeln!(out, "  {}", name));
    }

    /// Reports one executed test and advances the column.
    ///
    /// The column moves in both modes; only compact output prints the wrap.
    pub fn test_finished(
        &mut self,
        ctx: &mut RunContext,
        name: &str,
        outcome: &Outcome,
        elapsed: Elapsed,
    ) {
        let (column, wrapped) = next_column(ctx.column, ctx.width);
        ctx.column = column;

        if ctx.is_verbose() {
            self.emit(|out| write_verbose_line(out, name, outcome, elapsed));
            return;
        }

        self.emit(|out| {
            paint(out, outcome_color(outcome), &outcome.glyph().to_string())?;
            if wrapped {
                writeln!(out)?;
            }
            Ok(())
        });

        if let Outcome::Fail(failure) = outcome {
            let mid_line = ctx.column != 0;
            ctx.column = 0;
            self.emit(|out| {
                if mid_line {
                    writeln!(out)?;
                }
                write_failure_line(out, name, failure)?;
                writeln!(out)?;
                write_mismatch(out, failure)
            });
        }
    }

    pub fn suite_summary(&mut self, counters: &Counters, elapsed: Elapsed) {
        self.emit(|out| {
            writeln!(
                out,
                "\n{} tests - {} pass, {} fail, {} skipped {}",
                counters.tests_run, counters.passed, counters.failed, counters.skipped, elapsed
            )
        });
    }

    pub fn run_summary(&mut self, totals: &Counters, elapsed: Elapsed) {
        self.emit(|out| {
            writeln!(out, "\nTotal: {} tests {}", totals.tests_run, elapsed)?;
            writeln!(
                out,
                "Pass: {}, fail: {}, skip: {}.",
                totals.passed, totals.failed, totals.skipped
            )
        });
    }

    pub fn usage(&mut self, text: &str) {
        self.emit(|out| {
            write!(out, "{}", text)?;
            if !text.ends_with('\n') {
                writeln!(out)?;
            }
            Ok(())
        });
    }

    pub fn flush(&mut self) {
        self.emit(|out| out.flush());
    }

    fn emit(&mut self, write: impl FnOnce(&mut dyn WriteColor) -> io::Result<()>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = write(self.out.as_mut()) {
            tracing::warn!(error = %e, "reporting stream rejected a write");
            self.error = Some(e);
        }
    }
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn outcome_color(outcome: &Outcome) -> Color {
    match outcome {
        Outcome::Pass { .. } => Color::Green,
        Outcome::Fail(_) => Color::Red,
        Outcome::Skip { .. } => Color::Yellow,
    }
}

fn paint(out: &mut dyn WriteColor, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", text)?;
    out.reset()
}

fn write_verbose_line(
    out: &mut dyn WriteColor,
    name: &str,
    outcome: &Outcome,
    elapsed: Elapsed,
) -> io::Result<()> {
    if let Outcome::Fail(failure) = outcome {
        write_failure_line(out, name, failure)?;
        writeln!(out, " {}", elapsed)?;
        return write_mismatch(out, failure);
    }
    paint(out, outcome_color(outcome), outcome.label())?;
    write!(out, " {}", name)?;
    if let Some(message) = outcome.message() {
        write!(out, ": {}", message)?;
    }
    writeln!(out, " {}", elapsed)
}

/// `FAIL <name>: <message> (<file>:<line>)`, without the trailing newline.
fn write_failure_line(out: &mut dyn WriteColor, name: &str, failure: &Failure) -> io::Result<()> {
    paint(out, Color::Red, "FAIL")?;
    write!(out, " {}: {} ({})", name, failure.message, failure.location)
}

fn write_mismatch(out: &mut dyn WriteColor, failure: &Failure) -> io::Result<()> {
    let Some(Mismatch { expected, actual }) = &failure.mismatch else {
        return Ok(());
    };
    writeln!(out, "Expected:\n####\n{}\n####", expected)?;
    writeln!(out, "Actual:\n####\n{}\n####", actual)?;
    if expected.contains('\n') || actual.contains('\n') {
        write_diff(out, expected, actual)?;
    }
    Ok(())
}

fn write_diff(out: &mut dyn WriteColor, expected: &str, actual: &str) -> io::Result<()> {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        let (prefix, color, chunk) = match diff {
            Difference::Same(x) => (' ', None, x),
            Difference::Rem(x) => ('-', Some(Color::Red), x),
            Difference::Add(x) => ('+', Some(Color::Green), x),
        };
        for line in chunk.split('\n') {
            out.set_color(ColorSpec::new().set_fg(color))?;
            write!(out, "{}{}", prefix, line)?;
            out.reset()?;
            writeln!(out)?;
        }
    }
    Ok(())
}
