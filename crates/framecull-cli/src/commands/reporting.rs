use colored::Colorize;
use framecull_engine::Diagnostic;
use framecull_spec::{Rule, ValidationResult};
use serde::Serialize;

use crate::input::LoadResult;

/// Prints a JSON document to stdout.
pub(crate) fn print_json<T: Serialize>(output: &T) {
    let json = serde_json::to_string_pretty(output).expect("CLI output serialization should not fail");
    println!("{}", json);
}

/// Echoes the parsed specifications and their rule trees.
pub(crate) fn print_specifications(loaded: &[LoadResult]) {
    println!("{}", "Parsed specifications:".cyan().bold());
    for load in loaded {
        let spec = &load.specification;
        println!(
            "  {} ({} rule(s)) {}",
            spec.name.bold(),
            spec.rule_count(),
            format!("{} [{}]", load.path.display(), &load.source_hash[..16]).dimmed()
        );
        for rule in &spec.rules {
            print_rule(rule, 2);
        }
    }
}

fn print_rule(rule: &Rule, depth: usize) {
    println!("{:indent$}- {}", "", rule.summary(), indent = depth * 2);
    for sub_rule in rule.sub_rules() {
        print_rule(sub_rule, depth + 1);
    }
}

/// Prints validation errors and warnings for one specification.
pub(crate) fn print_validation_messages(result: &ValidationResult) {
    for error in &result.errors {
        println!("    {} {}", "x".red(), error);
    }
    for warning in &result.warnings {
        println!("    {} {}", "!".yellow(), warning);
    }
}

/// Prints the reasons a frame was rejected, in evaluation order.
pub(crate) fn print_diagnostics(reasons: &[Diagnostic]) {
    for reason in reasons {
        println!(
            "    {} {}",
            format!("[{}]", reason.subject.as_str()).dimmed(),
            reason
        );
    }
}
