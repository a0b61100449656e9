//! Triage command implementation
//!
//! Classifies every frame in a source directory and moves or deletes the
//! rejected ones.

use anyhow::Result;
use colored::Colorize;
use framecull_engine::SpecificationSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use super::json_output::{
    error_codes, input_error_to_json, path_error_to_json, validation_error_to_json,
    validation_warning_to_json, JsonError, JsonWarning, SpecificationInfo, TriageOutput,
};
use super::reporting;
use crate::frames::scan_frames;
use crate::input::{load_specifications, InputError, LoadResult};
use crate::interrupt;
use crate::paths::{prepare_destination, verify_source, PathError};
use crate::triage::{run_triage, Disposal, FrameOutcome, TriageOptions};

/// Why a run could not start.
#[derive(Debug)]
enum SetupError {
    Path(PathError),
    Input(InputError),
    Scan {
        source: PathBuf,
        error: walkdir::Error,
    },
}

impl SetupError {
    fn to_json(&self) -> JsonError {
        match self {
            SetupError::Path(e) => path_error_to_json(e),
            SetupError::Input(e) => input_error_to_json(e),
            SetupError::Scan { source, error } => JsonError::new(
                error_codes::SCAN,
                format!("Failed to list frames: {}", error),
            )
            .with_file(source.display().to_string()),
        }
    }

    fn into_anyhow(self) -> anyhow::Error {
        match self {
            SetupError::Path(e) => e.into(),
            SetupError::Input(e) => e.into(),
            SetupError::Scan { source, error } => anyhow::Error::new(error)
                .context(format!("Failed to list frames in {}", source.display())),
        }
    }
}

/// Everything a run needs, checked before the first frame is touched.
struct Prepared {
    loaded: Vec<LoadResult>,
    set: SpecificationSet,
    options: TriageOptions,
    frames: Vec<PathBuf>,
}

/// Checks the source, then the destination, then loads the specifications.
fn prepare(
    spec_paths: &[String],
    source: &Path,
    destination: &Path,
    delete: bool,
    debug: bool,
    test: bool,
) -> Result<Prepared, SetupError> {
    verify_source(source).map_err(SetupError::Path)?;

    let disposal = if delete {
        Disposal::Delete
    } else {
        prepare_destination(destination, !test).map_err(SetupError::Path)?;
        Disposal::Move {
            destination: destination.to_path_buf(),
        }
    };

    let loaded = load_specifications(spec_paths).map_err(SetupError::Input)?;
    let set = loaded
        .iter()
        .map(|load| load.specification.clone())
        .collect();

    let frames = scan_frames(source).map_err(|error| SetupError::Scan {
        source: source.to_path_buf(),
        error,
    })?;

    Ok(Prepared {
        loaded,
        set,
        options: TriageOptions {
            disposal,
            dry_run: test,
            diagnostics: debug,
        },
        frames,
    })
}

/// Run the triage command
///
/// # Arguments
/// * `spec_paths` - Specification files; a frame is kept if any one accepts it
/// * `source` - Directory holding the frames
/// * `destination` - Directory rejected frames are moved into
/// * `delete` - Delete rejected frames instead of moving them
/// * `debug` - Print the parsed specifications and every failure reason
/// * `test` - Classify only; list rejected frames without touching them
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on completion or interrupt, 1 if the run could not start
///
/// The Ctrl+C watcher is installed before any setup work, so an interrupt
/// while specifications load or the source is listed still exits 0.
pub fn run(
    spec_paths: &[String],
    source: &str,
    destination: &str,
    delete: bool,
    debug: bool,
    test: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let source = Path::new(source);
    let destination = Path::new(destination);
    if json_output {
        let interrupted = match interrupt::install() {
            Ok(flag) => flag,
            Err(e) => {
                let error = JsonError::new(error_codes::INTERRUPT, format!("{:#}", e));
                reporting::print_json(&TriageOutput::failure(error));
                return Ok(ExitCode::from(1));
            }
        };
        run_json(
            spec_paths,
            source,
            destination,
            delete,
            debug,
            test,
            &interrupted,
        )
    } else {
        let interrupted = interrupt::install()?;
        run_human(
            spec_paths,
            source,
            destination,
            delete,
            debug,
            test,
            &interrupted,
        )
    }
}

/// Run triage with human-readable (colored) output
fn run_human(
    spec_paths: &[String],
    source: &Path,
    destination: &Path,
    delete: bool,
    debug: bool,
    test: bool,
    interrupted: &AtomicBool,
) -> Result<ExitCode> {
    let Prepared {
        loaded,
        set,
        options,
        frames,
    } = prepare(spec_paths, source, destination, delete, debug, test)
        .map_err(SetupError::into_anyhow)?;

    if debug {
        reporting::print_specifications(&loaded);
        for (name, result) in set.validate() {
            if !result.errors.is_empty() || !result.warnings.is_empty() {
                println!("  {} {}", "Lint:".yellow().bold(), name);
                reporting::print_validation_messages(&result);
            }
        }
    }

    let summary = run_triage(frames, &set, &options, interrupted, |record| {
        match &record.outcome {
            FrameOutcome::Skipped { reason } => {
                eprintln!(
                    "  {} Skipped {}: {}",
                    "!".yellow(),
                    record.path.display(),
                    reason
                );
            }
            FrameOutcome::Rejected { .. } if debug => {
                println!("Bad frame detected ({})", record.path.display());
                reporting::print_diagnostics(&record.reasons);
            }
            _ => {}
        }
    });

    if summary.interrupted {
        eprintln!(
            "{} remaining frames were left untouched",
            "Interrupted:".yellow().bold()
        );
    }
    if !summary.skipped.is_empty() {
        eprintln!(
            "{}",
            format!("{} frame(s) skipped", summary.skipped.len()).yellow()
        );
    }

    println!("{}", summary.summary_line());
    if test {
        for path in &summary.rejected {
            println!("{}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Run triage with machine-readable JSON output
fn run_json(
    spec_paths: &[String],
    source: &Path,
    destination: &Path,
    delete: bool,
    debug: bool,
    test: bool,
    interrupted: &AtomicBool,
) -> Result<ExitCode> {
    let Prepared {
        loaded,
        set,
        options,
        frames,
    } = match prepare(spec_paths, source, destination, delete, debug, test) {
        Ok(prepared) => prepared,
        Err(e) => {
            reporting::print_json(&TriageOutput::failure(e.to_json()));
            return Ok(ExitCode::from(1));
        }
    };

    let mut warnings: Vec<JsonWarning> = Vec::new();
    if debug {
        for (_, result) in set.validate() {
            warnings.extend(result.warnings.iter().map(validation_warning_to_json));
            warnings.extend(result.errors.iter().map(|e| {
                let error = validation_error_to_json(e);
                JsonWarning {
                    code: error.code,
                    message: error.message,
                    path: error.path,
                }
            }));
        }
    }

    let mut records = Vec::new();
    let summary = run_triage(frames, &set, &options, interrupted, |record| {
        records.push(record.clone())
    });

    let output = TriageOutput {
        success: true,
        dry_run: options.dry_run,
        disposal: Some(options.disposal.clone()),
        specifications: loaded.iter().map(SpecificationInfo::from_load_result).collect(),
        summary: Some(summary),
        frames: records,
        errors: Vec::new(),
        warnings,
    };
    reporting::print_json(&output);

    Ok(ExitCode::SUCCESS)
}
