//! Specification validation.
//!
//! Evaluation never needs these checks; they flag rule trees that are legal
//! but almost certainly not what the author meant.

use std::collections::HashSet;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::rule::Rule;
use crate::spec::Specification;

/// Validates a specification and returns a validation result.
///
/// # Example
/// ```
/// use framecull_spec::{Rule, Specification};
/// use framecull_spec::validation::validate_specification;
///
/// let spec = Specification::new("hd-only").with_rule(Rule::size("hd", 1920, 1080));
/// assert!(validate_specification(&spec).is_ok());
/// ```
pub fn validate_specification(spec: &Specification) -> ValidationResult {
    let mut result = ValidationResult::default();

    if spec.name.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptySpecificationName,
            "specification name must not be empty",
            "name",
        ));
    }

    if spec.rules.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::NoRules,
            format!("specification '{}' has no rules and accepts every frame", spec.name),
            "rules",
        ));
    }

    let mut seen = HashSet::new();
    for (i, rule) in spec.rules.iter().enumerate() {
        validate_rule(rule, &format!("rules[{}]", i), &mut seen, &mut result);
    }

    result
}

fn validate_rule(
    rule: &Rule,
    path: &str,
    seen: &mut HashSet<String>,
    result: &mut ValidationResult,
) {
    let name = rule.name();
    if name.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyRuleName,
            format!("{} rule has an empty name", rule.kind()),
            path,
        ));
    } else if !seen.insert(name.to_string()) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DuplicateRuleName,
            format!("rule name '{}' is used more than once", name),
            path,
        ));
    }

    match rule {
        Rule::Size { width, height, .. } => {
            if *width == 0 || *height == 0 {
                result.add_error(ValidationError::with_path(
                    ErrorCode::ZeroDimension,
                    format!(
                        "size rule '{}' requires {}x{}, which no frame can have",
                        name, width, height
                    ),
                    path,
                ));
            }
        }
        Rule::PixelColor { .. } | Rule::PixelNotColor { .. } => {}
        Rule::Or { rules, .. } => {
            match rules.len() {
                0 => result.add_warning(ValidationWarning::with_path(
                    WarningCode::EmptyOrRule,
                    format!("or rule '{}' has no sub-rules and never matches", name),
                    path,
                )),
                1 => result.add_warning(ValidationWarning::with_path(
                    WarningCode::SingleBranchOr,
                    format!("or rule '{}' has a single sub-rule", name),
                    path,
                )),
                _ => {}
            }
            for (i, sub_rule) in rules.iter().enumerate() {
                validate_rule(sub_rule, &format!("{}.rules[{}]", path, i), seen, result);
            }
        }
    }
}
