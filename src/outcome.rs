//! The three-valued result of a test body.
//!
//! A test body returns exactly one [`Outcome`]. Failures carry the message and
//! source location of the assertion that produced them; a failing string
//! comparison additionally carries both full texts so the reporter can show
//! them side by side.

use std::fmt;

/// Source location of the assertion that ended a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Expected and actual text of a failed string-equality assertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: String,
    pub actual: String,
}

/// Metadata of a failing test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub location: Location,
    pub mismatch: Option<Mismatch>,
}

/// Classification of a completed test body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass { message: Option<String> },
    Fail(Failure),
    Skip { message: Option<String> },
}

impl Outcome {
    /// A plain pass with no message.
    pub fn pass() -> Self {
        Outcome::Pass { message: None }
    }

    pub fn pass_with(message: impl Into<String>) -> Self {
        Outcome::Pass {
            message: Some(message.into()),
        }
    }

    pub fn fail(message: impl Into<String>, file: &'static str, line: u32) -> Self {
        Outcome::Fail(Failure {
            message: message.into(),
            location: Location::new(file, line),
            mismatch: None,
        })
    }

    /// A failure that also records both sides of a string comparison.
    pub fn fail_mismatch(
        message: impl Into<String>,
        file: &'static str,
        line: u32,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Outcome::Fail(Failure {
            message: message.into(),
            location: Location::new(file, line),
            mismatch: Some(Mismatch {
                expected: expected.into(),
                actual: actual.into(),
            }),
        })
    }

    pub fn skip() -> Self {
        Outcome::Skip { message: None }
    }

    pub fn skip_with(message: impl Into<String>) -> Self {
        Outcome::Skip {
            message: Some(message.into()),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Outcome::Skip { .. })
    }

    /// The message attached to this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Pass { message } | Outcome::Skip { message } => message.as_deref(),
            Outcome::Fail(failure) => Some(&failure.message),
        }
    }

    /// Status word used by verbose reporting.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Pass { .. } => "PASS",
            Outcome::Fail(_) => "FAIL",
            Outcome::Skip { .. } => "SKIP",
        }
    }

    /// Single-character glyph used by compact reporting.
    pub fn glyph(&self) -> char {
        match self {
            Outcome::Pass { .. } => '.',
            Outcome::Fail(_) => 'F',
            Outcome::Skip { .. } => 's',
        }
    }
}
