//! Argument parsing and graph construction for the `rgg` binary.

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rgg_core::{EdgeBounds, GraphError, GraphStore, RandomGraphBuilder, RenderLayout};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_OUTPUT: &str = "graph.json";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rgg",
    about = "Generate a random connected undirected graph.",
    long_about = "Generate a random connected undirected graph with exactly EDGES edges \
                  on VERTICES vertices. EDGES must lie between VERTICES - 1 and \
                  VERTICES * (VERTICES - 1) / 2."
)]
pub struct Cli {
    /// Number of vertices (at least 1).
    pub vertices: usize,

    /// Number of edges.
    pub edges: usize,

    /// Seed for the random generator; defaults to the current time.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Layout used for both the console output and the JSON file.
    #[arg(long, value_enum, default_value_t = Layout::Matrix)]
    pub layout: Layout,

    /// File the JSON representation is written to.
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Skip writing the JSON file.
    #[arg(long)]
    pub no_persist: bool,
}

/// Graph layouts selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// Lower-triangular adjacency matrix.
    #[default]
    Matrix,
    /// Neighbour list per vertex.
    Neighbours,
}

impl Layout {
    /// Label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Neighbours => "neighbours",
        }
    }
}

impl From<Layout> for RenderLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Matrix => Self::Matrix,
            Layout::Neighbours => Self::Neighbours,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Creating or writing the output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Encoding the graph as JSON failed.
    #[error("failed to serialise graph to `{path}`: {source}")]
    Serialize {
        /// Destination of the JSON document.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the rendered graph to the console failed.
    #[error("failed to write graph output: {source}")]
    Output {
        /// Underlying stream error.
        #[source]
        source: io::Error,
    },
    /// The graph request was rejected.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Outcome of a successful run, ready to be rendered and persisted.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// The generated graph.
    pub graph: GraphStore,
    /// Seed that reproduces `graph` via `--seed`.
    pub seed: u64,
    /// Layout chosen for rendering and persistence.
    pub layout: Layout,
    /// JSON destination, `None` when persistence is disabled.
    pub output: Option<PathBuf>,
}

/// Builds the graph described by `cli`.
///
/// Bounds are validated before anything is allocated, so a rejected request
/// produces no output at all.
///
/// # Errors
/// Returns [`CliError::Core`] when the vertex count is zero or the edge count
/// lies outside `[v - 1, v * (v - 1) / 2]`.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use rgg_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["rgg", "4", "3", "--seed", "7", "--no-persist"]);
/// let summary = run_cli(cli).expect("4 vertices can hold 3 edges");
/// assert_eq!(summary.graph.edge_count(), 3);
/// assert_eq!(summary.seed, 7);
/// assert!(summary.output.is_none());
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(
        vertices = cli.vertices,
        edges = cli.edges,
        seed = field::Empty,
        layout = cli.layout.as_str(),
    ),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let Cli {
        vertices,
        edges,
        seed,
        layout,
        output,
        no_persist,
    } = cli;

    let bounds = EdgeBounds::for_vertices(vertices)?;
    let builder = match seed {
        Some(seed) => RandomGraphBuilder::new().with_seed(seed),
        None => RandomGraphBuilder::new(),
    };
    Span::current().record("seed", builder.seed());

    let graph = builder.build_with_bounds(bounds, edges)?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        min = bounds.min(),
        max = bounds.max(),
        "command completed"
    );
    Ok(ExecutionSummary {
        graph,
        seed: builder.seed(),
        layout,
        output: (!no_persist).then_some(output),
    })
}
