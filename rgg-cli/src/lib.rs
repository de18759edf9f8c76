//! Library half of the `rgg` binary.
//!
//! Exposes argument parsing, command execution, rendering and JSON
//! persistence so integration tests can drive the pipeline in-process.

pub mod cli;
pub mod logging;
