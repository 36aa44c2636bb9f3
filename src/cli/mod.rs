//! The entry point shell for test binaries.
//!
//! This module turns a command line into a [`RunConfig`], drives every
//! registered suite through a [`Harness`], prints the final summary, and maps
//! the result to a process exit status. A test binary's `main` is usually a
//! single call to [`main`].

use std::env;
use std::ffi::OsString;
use std::path::Path;
use std::process::ExitCode;

use termcolor::{ColorChoice, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

use crate::cli::args::Invocation;
use crate::config::{ColorMode, RunConfig};
use crate::errors::{TrestleError, UsageError};
use crate::harness::{Harness, Registry, RunSummary};
use crate::reporter::Reporter;

pub mod args;
pub mod output;

/// Environment variable holding the log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "TRESTLE_LOG";

/// How a command-line invocation ended.
#[derive(Debug)]
pub enum RunStatus {
    /// `-h` was given; usage was printed.
    Help,
    /// The command line was rejected; usage was printed.
    Usage(UsageError),
    /// Suites ran (or were listed) to completion.
    Completed(RunSummary),
    /// The run could not be reported.
    Failed(TrestleError),
}

impl RunStatus {
    pub fn success(&self) -> bool {
        match self {
            RunStatus::Help => true,
            RunStatus::Completed(summary) => summary.success(),
            RunStatus::Usage(_) | RunStatus::Failed(_) => false,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// The main entry point for a test binary.
///
/// ```no_run
/// use std::process::ExitCode;
/// use trestle::{pass, Registry};
///
/// fn main() -> ExitCode {
///     let registry = Registry::new().suite("smoke", |suite| {
///         suite.run_test("starts", || pass!());
///     });
///     trestle::cli::main(&registry)
/// }
/// ```
pub fn main(registry: &Registry) -> ExitCode {
    init_logging();
    let status = run(env::args_os(), registry, StandardStream::stdout);
    if let RunStatus::Failed(error) = &status {
        eprintln!("Error: {}", error);
    }
    status.exit_code()
}

/// Parses `argv` and runs `registry`, writing through the sink `open`
/// returns for the resolved colour choice.
pub fn run<I, T, W, F>(argv: I, registry: &Registry, open: F) -> RunStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: WriteColor + 'static,
    F: FnOnce(ColorChoice) -> W,
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let program = program_name(&argv);

    match args::parse(argv) {
        Ok(Invocation::Help) => {
            print_usage(open(ColorMode::Auto.choice()), &program, None);
            RunStatus::Help
        }
        Err(error) => {
            tracing::debug!(%error, "rejected command line");
            print_usage(open(ColorMode::Auto.choice()), &program, Some(&error));
            RunStatus::Usage(error)
        }
        Ok(Invocation::Run(config)) => {
            let out = open(config.color.choice());
            match run_with(&config, registry, out) {
                Ok(summary) => RunStatus::Completed(summary),
                Err(error) => RunStatus::Failed(error),
            }
        }
    }
}

/// Runs every suite of `registry` under `config` and prints the final
/// summary to `out`.
pub fn run_with(
    config: &RunConfig,
    registry: &Registry,
    out: impl WriteColor + 'static,
) -> Result<RunSummary, TrestleError> {
    tracing::debug!(suites = registry.len(), flags = ?config.flags, "starting run");
    let mut harness = Harness::new(config, out);
    harness.run_registry(registry);
    harness.finish()
}

/// Installs a stderr subscriber filtered by `TRESTLE_LOG`. Leaves an already
/// installed subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_usage(out: impl WriteColor + 'static, program: &str, error: Option<&UsageError>) {
    let mut text = args::usage(program);
    if let Some(error) = error {
        text = format!("{}\n{}", error, text);
    }
    let mut reporter = Reporter::new(out);
    reporter.usage(&text);
    reporter.flush();
    if let Some(error) = reporter.take_error() {
        tracing::warn!(%error, "could not print usage");
    }
}

fn program_name(argv: &[OsString]) -> String {
    argv.first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trestle".to_string())
}
