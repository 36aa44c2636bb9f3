//! Error types for the runner.
//!
//! Assertion failures are not errors: they travel as
//! [`Outcome::Fail`](crate::Outcome::Fail). The types here cover the few
//! conditions that stop a run outright: command-line misuse, a dead clock,
//! and a reporting stream that refuses writes.

use miette::Diagnostic;
use thiserror::Error;

/// Command-line misuse. Reported before any suite runs.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum UsageError {
    #[error("unknown flag: {0}")]
    #[diagnostic(code(trestle::usage::unknown_flag), help("run with -h for the list of flags"))]
    UnknownFlag(String),

    #[error("-{0} requires an argument")]
    #[diagnostic(code(trestle::usage::missing_argument))]
    MissingArgument(char),

    #[error("invalid width `{0}`: expected a positive integer")]
    #[diagnostic(code(trestle::usage::invalid_width))]
    InvalidWidth(String),

    #[error("{0}")]
    #[diagnostic(code(trestle::usage))]
    Other(String),
}

#[derive(Debug, Error, Diagnostic)]
pub enum TrestleError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Usage(#[from] UsageError),

    #[error("monotonic clock unavailable")]
    #[diagnostic(
        code(trestle::clock),
        help("elapsed times in summaries cannot be trusted without a working clock")
    )]
    Clock,

    #[error("failed to write to the reporting stream")]
    #[diagnostic(code(trestle::output))]
    Output(#[from] std::io::Error),
}
