//! Command-line interface for the random connected graph generator.
//!
//! `rgg <VERTICES> <EDGES>` builds a connected graph with exactly the requested
//! number of edges, renders it to stdout and, unless `--no-persist` is given,
//! stores it as JSON.

mod commands;
mod persist;
mod render;

pub use commands::{Cli, CliError, ExecutionSummary, Layout, run_cli};
pub use persist::{GraphDocument, VertexEntry, persist_summary, write_graph_json};
pub use render::{publish_summary, render_persist_notice, render_summary};

#[cfg(test)]
mod test_helpers;
