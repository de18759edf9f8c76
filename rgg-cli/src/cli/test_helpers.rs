//! Small helpers shared across CLI tests.

use std::path::Path;

use tempfile::TempDir;

use super::{Cli, CliError, Layout, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// CLI options for a seeded run that writes to `output`.
pub(super) fn cli_for(vertices: usize, edges: usize, layout: Layout, output: &Path) -> Cli {
    Cli {
        vertices,
        edges,
        seed: Some(42),
        layout,
        output: output.to_path_buf(),
        no_persist: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
