//! Trestle: a small, single-threaded unit-test runner.
//!
//! Tests are plain closures returning an [`Outcome`]; suites are named groups
//! of tests with optional setup and teardown hooks. A [`Harness`] runs suites
//! one test at a time, applies name filters and stop-on-first-failure, keeps
//! pass/fail/skip counts, and reports compact or verbose output. The
//! [`cli`] module wraps all of that into a `main` for test binaries.

pub use crate::config::{ColorMode, RunConfig};
pub use crate::context::{Counters, Flags, RunContext};
pub use crate::errors::{TrestleError, UsageError};
pub use crate::harness::{Harness, Registry, RunSummary};
pub use crate::outcome::{Failure, Location, Mismatch, Outcome};
pub use crate::suite::Suite;

#[macro_use]
mod assertions;

pub mod cli;
pub mod clock;
pub mod config;
pub mod context;
pub mod errors;
pub mod executor;
pub mod harness;
pub mod matcher;
pub mod outcome;
pub mod reporter;
pub mod suite;
