//! Structured failure reasons.
//!
//! The evaluators report every rule that fails to match to a
//! [`DiagnosticSink`]. Reporting never changes a result; a sink that is not
//! [`enabled`](DiagnosticSink::enabled) lets the evaluators skip building
//! messages altogether.

use framecull_spec::RuleKind;
use serde::{Deserialize, Serialize};

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// A rule of the given kind.
    Rule(RuleKind),
    /// A whole specification.
    Specification,
}

impl Subject {
    /// Returns a short label, e.g. "size" or "specification".
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Rule(kind) => kind.as_str(),
            Subject::Specification => "specification",
        }
    }
}

/// One reason a frame failed a rule or specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What failed.
    pub subject: Subject,

    /// Name of the failing rule or specification.
    pub name: String,

    /// Human-readable description.
    pub message: String,

    /// Where in the frame the check looked, e.g. "(500, 500)".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Observed value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<String>,

    /// Value the rule required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_value: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic with required fields.
    pub fn new(subject: Subject, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject,
            name: name.into(),
            message: message.into(),
            location: None,
            actual_value: None,
            expected_value: None,
        }
    }

    /// Builder method to set the frame location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the observed value.
    pub fn with_actual_value(mut self, value: impl Into<String>) -> Self {
        self.actual_value = Some(value.into());
        self
    }

    /// Builder method to set the required value.
    pub fn with_expected_value(mut self, value: impl Into<String>) -> Self {
        self.expected_value = Some(value.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.name)?;
        if let Some(ref location) = self.location {
            write!(f, " at {}", location)?;
        }
        match (&self.actual_value, &self.expected_value) {
            (Some(actual), Some(expected)) => {
                write!(f, " (frame has {}, rule requires {})", actual, expected)
            }
            (Some(actual), None) => write!(f, " (frame has {})", actual),
            (None, Some(expected)) => write!(f, " (rule requires {})", expected),
            (None, None) => Ok(()),
        }
    }
}

/// Receiver for diagnostics emitted during evaluation.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Returns false if reports are discarded.
    fn enabled(&self) -> bool {
        true
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}

    fn enabled(&self) -> bool {
        false
    }
}
