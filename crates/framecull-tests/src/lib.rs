//! framecull End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the rule engine and the CLI:
//!
//! - Scenarios: JSON rule documents evaluated against synthetic frames
//! - Triage: whole runs over a directory of frames (move, delete, dry run)
//! - Exit codes: setup failures and their messages
//! - Properties: evaluation laws checked with proptest
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p framecull-tests
//! ```

pub mod harness;
