//! CLI command implementations

pub mod check;
pub mod json_output;
pub mod triage;
pub mod validate;

mod reporting;
