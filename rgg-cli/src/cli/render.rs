//! Console rendering of an [`ExecutionSummary`].

use std::io::{self, Write};
use std::path::Path;

use rgg_core::RenderLayout;

use super::commands::{CliError, ExecutionSummary, Layout};
use super::persist::persist_summary;

const MATRIX_BANNER: &str = "##### GRAPH ADJACENCY MATRIX #####";
const LIST_BANNER: &str = "##### GRAPH ADJACENCY LIST #####";

/// Writes the framed graph followed by the seed that reproduces it.
///
/// Rendering depends only on the summary, so rendering the same summary twice
/// produces identical bytes.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use rgg_cli::cli::{ExecutionSummary, Layout, render_summary};
/// # use rgg_core::GraphStore;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut graph = GraphStore::new(2)?;
/// graph.add_edge(0, 1)?;
/// let summary = ExecutionSummary { graph, seed: 3, layout: Layout::Matrix, output: None };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.contains("(1) [1]\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let banner = match summary.layout {
        Layout::Matrix => MATRIX_BANNER,
        Layout::Neighbours => LIST_BANNER,
    };
    write!(writer, "\n{banner}\n\n")?;
    writer.write_all(
        summary
            .graph
            .render(RenderLayout::from(summary.layout))
            .as_bytes(),
    )?;
    write!(writer, "\n{}\n\n", "#".repeat(banner.len()))?;
    writeln!(writer, "seed: {}", summary.seed)
}

/// Announces where the JSON document was written.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_persist_notice(path: &Path, mut writer: impl Write) -> io::Result<()> {
    write!(writer, "JSON-Data written to file: {}\n\n", path.display())
}

/// Persists `summary`, then writes the framed graph and the persist notice.
///
/// `writer` receives nothing unless the JSON document was stored, so a failed
/// write never leaves a rendered graph behind.
///
/// # Errors
/// Returns the persistence error from [`persist_summary`], or
/// [`CliError::Output`] when writing to `writer` fails.
pub fn publish_summary(
    summary: &ExecutionSummary,
    mut writer: impl Write,
) -> Result<(), CliError> {
    let written = persist_summary(summary)?;
    let output = |source| CliError::Output { source };
    render_summary(summary, &mut writer).map_err(output)?;
    if let Some(path) = written {
        render_persist_notice(&path, &mut writer).map_err(output)?;
    }
    writer.flush().map_err(output)
}
