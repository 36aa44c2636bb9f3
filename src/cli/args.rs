//! Defines the command-line flags accepted by test binaries.
//!
//! This module uses the `clap` crate with its "derive" feature. The built-in
//! help flag is disabled so that `-h` behaves like every other flag and the
//! caller decides where usage text goes.

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};

use crate::config::{ColorMode, RunConfig};
use crate::context::Flags;
use crate::errors::UsageError;

/// Flags understood by every test binary.
#[derive(Debug, Parser)]
#[command(
    name = "trestle",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    help_template = "{usage-heading} {usage}\n\n{all-args}"
)]
pub struct Args {
    /// Print this help and exit
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub help: bool,

    /// List suites and their tests, then exit
    #[arg(short = 'l', action = ArgAction::SetTrue)]
    pub list: bool,

    /// Stop the runner after the first failure
    #[arg(short = 'f', action = ArgAction::SetTrue)]
    pub first_fail: bool,

    /// Verbose output
    #[arg(short = 'v', action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Only run suites whose name contains SUITE
    #[arg(short = 's', value_name = "SUITE")]
    pub suite: Option<String>,

    /// Only run tests whose name contains TEST
    #[arg(short = 't', value_name = "TEST")]
    pub test: Option<String>,

    /// Wrap compact output after WIDTH tests
    #[arg(short = 'w', long = "width", value_name = "WIDTH", value_parser = parse_width)]
    pub width: Option<usize>,

    /// Colour status words
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Run(RunConfig),
}

impl Args {
    pub fn into_config(self) -> RunConfig {
        let mut flags = Flags::empty();
        flags.set(Flags::LIST_ONLY, self.list);
        flags.set(Flags::FIRST_FAILURE_STOP, self.first_fail);
        flags.set(Flags::VERBOSE, self.verbose);

        let mut config = RunConfig::new().with_flags(flags).with_color(self.color);
        config.suite_filter = self.suite;
        config.test_filter = self.test;
        if let Some(width) = self.width {
            config.width = width;
        }
        config
    }
}

/// Parses a full argument vector, program name first.
pub fn parse<I, T>(argv: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = Args::try_parse_from(argv).map_err(usage_error)?;
    if args.help {
        return Ok(Invocation::Help);
    }
    Ok(Invocation::Run(args.into_config()))
}

/// Usage text with `program` as the displayed binary name.
pub fn usage(program: &str) -> String {
    Args::command()
        .bin_name(program)
        .render_help()
        .to_string()
}

fn parse_width(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(UsageError::InvalidWidth(raw.to_string()).to_string()),
    }
}

fn usage_error(err: clap::Error) -> UsageError {
    let context = |kind: ContextKind| match err.get(kind) {
        Some(ContextValue::String(value)) => Some(value.clone()),
        _ => None,
    };
    let arg = context(ContextKind::InvalidArg).unwrap_or_default();

    match err.kind() {
        ErrorKind::UnknownArgument => UsageError::UnknownFlag(arg),
        ErrorKind::InvalidValue if arg.starts_with("-s") => UsageError::MissingArgument('s'),
        ErrorKind::InvalidValue if arg.starts_with("-t") => UsageError::MissingArgument('t'),
        ErrorKind::ValueValidation if arg.starts_with("-w") => {
            UsageError::InvalidWidth(context(ContextKind::InvalidValue).unwrap_or_default())
        }
        _ => {
            let rendered = err.to_string();
            let first = rendered.lines().next().unwrap_or_default();
            UsageError::Other(first.trim_start_matches("error: ").to_string())
        }
    }
}
