//! Check command implementation
//!
//! Classifies a single frame and explains the verdict.

use anyhow::{Context, Result};
use colored::Colorize;
use framecull_engine::{open_frame, EvalOptions, SpecificationSet};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, input_error_to_json, CheckOutput, JsonError, SpecificationInfo};
use super::reporting;
use crate::input::load_specifications;

/// Run the check command
///
/// # Arguments
/// * `spec_paths` - Specification files; the frame is accepted if any one passes
/// * `frame_path` - Frame to classify
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if the frame is accepted, 1 if rejected or unreadable
pub fn run(spec_paths: &[String], frame_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(spec_paths, frame_path)
    } else {
        run_human(spec_paths, frame_path)
    }
}

/// Run check with human-readable (colored) output
fn run_human(spec_paths: &[String], frame_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Checking:".cyan().bold(), frame_path);

    let loaded = load_specifications(spec_paths)?;
    let set: SpecificationSet = loaded
        .iter()
        .map(|load| load.specification.clone())
        .collect();

    let frame = open_frame(Path::new(frame_path))
        .with_context(|| format!("Failed to open frame: {}", frame_path))?;
    println!(
        "{} {}x{}, {} specification(s)",
        "Frame:".dimmed(),
        frame.width(),
        frame.height(),
        set.len()
    );

    let verdict = set.classify(&frame, &EvalOptions::with_diagnostics());
    reporting::print_diagnostics(&verdict.reasons);

    match verdict.matched_specification {
        Some(name) => {
            println!(
                "\n{} by specification \"{}\"",
                "ACCEPTED".green().bold(),
                name
            );
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!(
                "\n{} by all {} specification(s)",
                "REJECTED".red().bold(),
                set.len()
            );
            Ok(ExitCode::from(1))
        }
    }
}

/// Run check with machine-readable JSON output
fn run_json(spec_paths: &[String], frame_path: &str) -> Result<ExitCode> {
    let loaded = match load_specifications(spec_paths) {
        Ok(loaded) => loaded,
        Err(e) => {
            reporting::print_json(&CheckOutput::failure(frame_path, input_error_to_json(&e)));
            return Ok(ExitCode::from(1));
        }
    };
    let set: SpecificationSet = loaded
        .iter()
        .map(|load| load.specification.clone())
        .collect();

    let frame = match open_frame(Path::new(frame_path)) {
        Ok(frame) => frame,
        Err(e) => {
            let error = JsonError::new(error_codes::FRAME_DECODE, e.to_string()).with_file(frame_path);
            reporting::print_json(&CheckOutput::failure(frame_path, error));
            return Ok(ExitCode::from(1));
        }
    };

    let verdict = set.classify(&frame, &EvalOptions::with_diagnostics());
    let accepted = verdict.accepted;

    let output = CheckOutput {
        success: true,
        frame: frame_path.to_string(),
        width: Some(frame.width()),
        height: Some(frame.height()),
        specifications: loaded.iter().map(SpecificationInfo::from_load_result).collect(),
        verdict: Some(verdict),
        errors: Vec::new(),
    };
    reporting::print_json(&output);

    Ok(if accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
