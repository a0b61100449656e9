//! Specification evaluation and the final verdict.

use framecull_spec::Specification;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, DiagnosticSink, NullSink, Subject};
use crate::frame::Frame;
use crate::rules::evaluate_rule;

/// Options for a single classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Collect failure reasons into [`Verdict::reasons`].
    pub diagnostics: bool,
}

impl EvalOptions {
    /// Options with diagnostics collection turned on.
    pub fn with_diagnostics() -> Self {
        Self { diagnostics: true }
    }
}

/// Keep/reject decision for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// True if some specification accepted the frame.
    pub accepted: bool,

    /// Name of the first specification that accepted the frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_specification: Option<String>,

    /// Failure reasons in evaluation order. Empty unless diagnostics were requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<Diagnostic>,
}

impl Verdict {
    /// Returns true if the frame should be disposed of.
    pub fn is_rejected(&self) -> bool {
        !self.accepted
    }
}

/// Evaluates a specification: every rule must match.
///
/// Stops at the first failing rule, so later rules are neither evaluated nor
/// reported. An empty rule list passes. A failing specification is reported
/// after the rule that broke it.
pub fn evaluate_specification<F>(
    spec: &Specification,
    frame: &F,
    sink: &mut dyn DiagnosticSink,
) -> bool
where
    F: Frame + ?Sized,
{
    let passed = spec.rules.iter().all(|rule| evaluate_rule(rule, frame, sink));
    if !passed && sink.enabled() {
        sink.report(Diagnostic::new(
            Subject::Specification,
            &spec.name,
            "Frame broke rules for specification",
        ));
    }
    passed
}

/// Evaluates specifications in order and returns the first one that accepts
/// the frame, reporting the failures of those before it to `sink`.
///
/// An empty specification list accepts nothing.
pub fn first_accepting<'a, F>(
    specifications: &'a [Specification],
    frame: &F,
    sink: &mut dyn DiagnosticSink,
) -> Option<&'a Specification>
where
    F: Frame + ?Sized,
{
    specifications
        .iter()
        .find(|spec| evaluate_specification(spec, frame, sink))
}

/// Classifies a frame: accepted if any specification passes.
///
/// # Example
/// ```
/// use framecull_engine::{classify, EvalOptions};
/// use framecull_spec::{Rule, Specification};
/// use image::RgbImage;
///
/// let frame = RgbImage::new(1280, 720);
/// let specs = vec![Specification::new("hd").with_rule(Rule::size("hd", 1920, 1080))];
///
/// let verdict = classify(&specs, &frame, &EvalOptions::with_diagnostics());
/// assert!(verdict.is_rejected());
/// assert_eq!(verdict.reasons.len(), 2);
/// ```
pub fn classify<F>(specifications: &[Specification], frame: &F, options: &EvalOptions) -> Verdict
where
    F: Frame + ?Sized,
{
    let mut reasons = Vec::new();
    let mut discard = NullSink;
    let sink: &mut dyn DiagnosticSink = if options.diagnostics {
        &mut reasons
    } else {
        &mut discard
    };

    let matched = first_accepting(specifications, frame, sink).map(|spec| spec.name.clone());

    Verdict {
        accepted: matched.is_some(),
        matched_specification: matched,
        reasons,
    }
}
