//! framecull CLI library.
//!
//! Specification loading, frame scanning, the triage driver and the command
//! implementations behind the `framecull` binary.

pub mod commands;
pub mod frames;
pub mod input;
pub mod interrupt;
pub mod paths;
pub mod triage;
