//! Validate command implementation
//!
//! Loads specification files and lints their rule trees without touching
//! any frames.

use anyhow::Result;
use colored::Colorize;
use framecull_spec::validation::validate_specification;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json,
    SpecificationInfo, ValidateFileResult, ValidateOutput,
};
use super::reporting;
use crate::input::load_specification;

/// Run the validate command
///
/// # Arguments
/// * `spec_paths` - Specification files to check
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every file loads without errors, 1 otherwise
pub fn run(spec_paths: &[String], json_output: bool) -> Result<ExitCode> {
    let results: Vec<ValidateFileResult> = spec_paths.iter().map(|p| validate_file(p)).collect();
    let success = results.iter().all(|r| r.ok);

    if json_output {
        reporting::print_json(&ValidateOutput {
            success,
            files: results,
        });
    } else {
        print_human(&results);
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn validate_file(spec_path: &str) -> ValidateFileResult {
    let loaded = match load_specification(Path::new(spec_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            return ValidateFileResult {
                file: spec_path.to_string(),
                ok: false,
                specification: None,
                errors: vec![input_error_to_json(&e)],
                warnings: Vec::new(),
            }
        }
    };

    let result = validate_specification(&loaded.specification);
    ValidateFileResult {
        file: spec_path.to_string(),
        ok: result.is_ok(),
        specification: Some(SpecificationInfo::from_load_result(&loaded)),
        errors: result.errors.iter().map(validation_error_to_json).collect(),
        warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
    }
}

fn print_human(results: &[ValidateFileResult]) {
    for result in results {
        println!("{} {}", "Validating:".cyan().bold(), result.file);
        if let Some(ref info) = result.specification {
            println!(
                "  {} \"{}\", {} rule(s) ({})",
                "Specification:".dimmed(),
                info.name,
                info.rule_count,
                &info.source_hash[..16]
            );
        }
        for error in &result.errors {
            match error.path {
                Some(ref path) => println!(
                    "    {} {}: {} (at {})",
                    "x".red(),
                    error.code,
                    error.message,
                    path
                ),
                None => println!("    {} {}: {}", "x".red(), error.code, error.message),
            }
        }
        for warning in &result.warnings {
            match warning.path {
                Some(ref path) => println!(
                    "    {} {}: {} (at {})",
                    "!".yellow(),
                    warning.code,
                    warning.message,
                    path
                ),
                None => println!("    {} {}: {}", "!".yellow(), warning.code, warning.message),
            }
        }
    }

    let failed = results.iter().filter(|r| !r.ok).count();
    if failed == 0 {
        println!(
            "\n{} {} specification file(s) valid",
            "SUCCESS".green().bold(),
            results.len()
        );
    } else {
        println!(
            "\n{} {} of {} specification file(s) invalid",
            "FAILED".red().bold(),
            failed,
            results.len()
        );
    }
}
