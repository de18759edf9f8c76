//! JSON persistence of generated graphs.
//!
//! The matrix layout is stored as `{"adjMatrix": [[..], ..]}` holding rows
//! `1..v` of the lower-triangular adjacency matrix. The neighbours layout is
//! stored as `{"vertices": [{"id": 0, "neighbours": [..]}, ..]}`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rgg_core::{GraphStore, RenderLayout};
use serde::Serialize;
use tracing::{debug, instrument};

use super::commands::{CliError, ExecutionSummary};

/// Serialisable view of a graph in one of the supported layouts.
///
/// # Examples
/// ```
/// use rgg_cli::cli::GraphDocument;
/// use rgg_core::{GraphStore, RenderLayout};
///
/// let mut graph = GraphStore::new(3).expect("valid vertex count");
/// graph.add_edge(0, 2).expect("valid edge");
/// let json = serde_json::to_string(&GraphDocument::new(&graph, RenderLayout::Matrix))
///     .expect("document serialises");
/// assert_eq!(json, r#"{"adjMatrix":[[0,0],[1,0]]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GraphDocument {
    /// Lower-triangular adjacency rows.
    Matrix {
        /// Rows `1..v`, each `v - 1` flags wide.
        #[serde(rename = "adjMatrix")]
        adj_matrix: Vec<Vec<u8>>,
    },
    /// Neighbour list per vertex.
    Neighbours {
        /// One entry per vertex in ascending id order.
        vertices: Vec<VertexEntry>,
    },
}

/// A vertex and its ascending neighbour ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexEntry {
    /// Vertex index.
    pub id: usize,
    /// Adjacent vertex indices.
    pub neighbours: Vec<usize>,
}

impl GraphDocument {
    /// Captures `graph` in `layout`.
    #[must_use]
    pub fn new(graph: &GraphStore, layout: RenderLayout) -> Self {
        match layout {
            RenderLayout::Matrix => Self::Matrix {
                adj_matrix: graph.adjacency_rows(),
            },
            RenderLayout::Neighbours => Self::Neighbours {
                vertices: graph
                    .vertices()
                    .map(|id| VertexEntry {
                        id,
                        neighbours: graph.neighbours(id).collect(),
                    })
                    .collect(),
            },
        }
    }
}

/// Writes `graph` as compact JSON to `path`, truncating any existing file.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be created or flushed and
/// [`CliError::Serialize`] when encoding fails part-way.
#[instrument(
    name = "cli.persist",
    err,
    skip(graph),
    fields(path = %path.display(), layout = ?layout),
)]
pub fn write_graph_json(
    path: &Path,
    graph: &GraphStore,
    layout: RenderLayout,
) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &GraphDocument::new(graph, layout)).map_err(|source| {
        CliError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(io_error)?;
    debug!(edges = graph.edge_count(), "graph persisted");
    Ok(())
}

/// Persists `summary` to its output path, if it has one.
///
/// Returns the path written so the caller can announce it.
///
/// # Errors
/// Propagates failures from [`write_graph_json`].
pub fn persist_summary(summary: &ExecutionSummary) -> Result<Option<PathBuf>, CliError> {
    let Some(path) = &summary.output else {
        return Ok(None);
    };
    write_graph_json(path, &summary.graph, summary.layout.into())?;
    Ok(Some(path.clone()))
}
