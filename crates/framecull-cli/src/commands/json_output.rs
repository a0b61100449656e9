//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`, which replaces the colored report with one
//! of the documents below printed to stdout.

use framecull_engine::Verdict;
use framecull_spec::{ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

use crate::input::{InputError, LoadResult};
use crate::paths::PathError;
use crate::triage::{FrameRecord, TriageSummary};

/// Stable error codes for CLI-level failures.
///
/// Validation findings pass through with their own `E0xx`/`W0xx` codes.
pub mod error_codes {
    /// Specification file missing or unreadable
    pub const FILE_READ: &str = "CLI_001";
    /// Specification file is not well-formed JSON
    pub const JSON_PARSE: &str = "CLI_002";
    /// Specification file holds an invalid rule tree
    pub const INVALID_RULE: &str = "CLI_003";
    /// Source directory missing or not a directory
    pub const SOURCE: &str = "CLI_004";
    /// Destination directory unusable
    pub const DESTINATION: &str = "CLI_005";
    /// Frame could not be read or decoded
    pub const FRAME_DECODE: &str = "CLI_006";
    /// Source directory could not be listed
    pub const SCAN: &str = "CLI_007";
    /// Ctrl+C watcher could not be installed
    pub const INTERRUPT: &str = "CLI_008";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path inside the specification (e.g., "rules[0].rules[1]")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File or directory the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the specification path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Path inside the specification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Identifies a loaded specification file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificationInfo {
    pub name: String,
    pub file: String,
    /// BLAKE3 hash of the file content
    pub source_hash: String,
    /// Number of rule nodes, nested ones included
    pub rule_count: usize,
}

impl SpecificationInfo {
    pub fn from_load_result(loaded: &LoadResult) -> Self {
        Self {
            name: loaded.specification.name.clone(),
            file: loaded.path.display().to_string(),
            source_hash: loaded.source_hash.clone(),
            rule_count: loaded.specification.rule_count(),
        }
    }
}

/// Output of `framecull triage --json`.
#[derive(Debug, Clone, Serialize)]
pub struct TriageOutput {
    pub success: bool,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal: Option<crate::triage::Disposal>,
    pub specifications: Vec<SpecificationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TriageSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<JsonWarning>,
}

impl TriageOutput {
    /// A run that could not start.
    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            dry_run: false,
            disposal: None,
            specifications: Vec::new(),
            summary: None,
            frames: Vec::new(),
            errors: vec![error],
            warnings: Vec::new(),
        }
    }
}

/// Output of `framecull check --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    pub success: bool,
    pub frame: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub specifications: Vec<SpecificationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl CheckOutput {
    /// A check that could not classify the frame.
    pub fn failure(frame: &str, error: JsonError) -> Self {
        Self {
            success: false,
            frame: frame.to_string(),
            width: None,
            height: None,
            specifications: Vec::new(),
            verdict: None,
            errors: vec![error],
        }
    }
}

/// One specification file in `framecull validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateFileResult {
    pub file: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specification: Option<SpecificationInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<JsonWarning>,
}

/// Output of `framecull validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub files: Vec<ValidateFileResult>,
}

/// Converts a specification loading error.
pub fn input_error_to_json(error: &InputError) -> JsonError {
    let code = match error {
        InputError::FileNotFound { .. } | InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        InputError::InvalidRule { .. } => error_codes::INVALID_RULE,
    };
    JsonError::new(code, error.to_string()).with_file(error.path().display().to_string())
}

/// Converts a source or destination error.
pub fn path_error_to_json(error: &PathError) -> JsonError {
    let code = match error {
        PathError::SourceMissing { .. } | PathError::SourceNotDirectory { .. } => {
            error_codes::SOURCE
        }
        _ => error_codes::DESTINATION,
    };
    JsonError::new(code, error.to_string()).with_file(error.path().display().to_string())
}

/// Converts a validation error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let mut json = JsonError::new(error.code.code(), &error.message);
    if let Some(ref path) = error.path {
        json = json.with_path(path);
    }
    json
}

/// Converts a validation warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.code().to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}
