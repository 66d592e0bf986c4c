use std::fmt;

use itertools::Itertools;
use serde::Serialize;

const PANIC_PREFIX: &str = "panic:";
const BUILD_HEADER_PREFIX: &str = "# ";
const CANT_LOAD_PREFIX: &str = "can't load package";

/// Closed set of reasons a command invocation may have failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The process crashed with an unrecoverable runtime fault.
    Panic,
    /// The command could not compile or load before running.
    BuildFailed,
    /// The command succeeded but produced nothing to report.
    /// Never assigned by [`classify`], only by callers inspecting output.
    NoBenchmarks,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Panic => "panic",
            FailureKind::BuildFailed => "build_failed",
            FailureKind::NoBenchmarks => "no_benchmarks",
            FailureKind::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed command invocation: best-effort kind plus the raw evidence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub message: String,
    pub stderr: String,
}

impl RunFailure {
    /// Builds a failure, classifying it from the captured stderr.
    pub fn new(message: impl Into<String>, stderr: impl Into<String>) -> Self {
        let stderr = stderr.into();
        Self {
            kind: classify(&stderr),
            message: message.into(),
            stderr,
        }
    }

    pub fn with_kind(self, kind: FailureKind) -> Self {
        Self { kind, ..self }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stderr.is_empty() {
            write!(f, "failed: {}", self.message)
        } else {
            write!(f, "failed: {}", self.stderr)
        }
    }
}

impl std::error::Error for RunFailure {}

/// Guesses the failure kind from the first two lines of stderr.
///
/// Needs at least three newline-separated segments, otherwise the output is
/// too terse to tell anything and the result is [`FailureKind::Other`].
/// The panic check runs before the build check.
pub fn classify(stderr: &str) -> FailureKind {
    let lines = stderr.split('\n').collect_vec();
    if lines.len() < 3 {
        return FailureKind::Other;
    }

    let head = &lines[..2];
    if head.iter().any(|line| line.starts_with(PANIC_PREFIX)) {
        return FailureKind::Panic;
    }
    if head.iter().any(|line| line.starts_with(BUILD_HEADER_PREFIX))
        || lines[0].starts_with(CANT_LOAD_PREFIX)
    {
        return FailureKind::BuildFailed;
    }

    FailureKind::Other
}
