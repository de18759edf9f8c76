//! Shared test utilities for `rgg-core`.

use std::collections::HashSet;

use proptest::test_runner::Config as ProptestConfig;
use rgg_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::graph::GraphStore;

/// Builds a standard proptest configuration from the shared run profile.
///
/// Keeps property suites aligned on the same `RGG_PBT_CASES` and
/// `RGG_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Checks every structural guarantee of a built graph.
///
/// Returns a description of the first violation found:
///
/// - vertex and edge counts match the request,
/// - no edge is a self-loop or out of range,
/// - no unordered pair is listed twice,
/// - adjacency is symmetric,
/// - the graph is connected.
pub(crate) fn check_graph_invariants(
    graph: &GraphStore,
    vertices: usize,
    edges: usize,
) -> Result<(), String> {
    if graph.vertex_count() != vertices {
        return Err(format!(
            "expected {vertices} vertices, found {}",
            graph.vertex_count()
        ));
    }
    if graph.edge_count() != edges {
        return Err(format!("expected {edges} edges, found {}", graph.edge_count()));
    }

    let mut seen = HashSet::new();
    for edge in graph.edges() {
        let (low, high) = edge.endpoints();
        if low == high {
            return Err(format!("self-loop on {low}"));
        }
        if high >= vertices {
            return Err(format!("edge ({low}, {high}) is out of range"));
        }
        if !seen.insert((low, high)) {
            return Err(format!("edge ({low}, {high}) listed twice"));
        }
        if !graph.has_edge(low, high) || !graph.has_edge(high, low) {
            return Err(format!("edge ({low}, {high}) is not symmetric"));
        }
    }
    if seen.len() != edges {
        return Err(format!(
            "edge enumeration yielded {} edges, expected {edges}",
            seen.len()
        ));
    }

    let degree_sum: usize = graph.vertices().map(|vertex| graph.degree(vertex)).sum();
    if degree_sum != 2 * edges {
        return Err(format!("degree sum {degree_sum} != 2 * {edges}"));
    }

    if !graph.is_connected() {
        return Err("graph is not connected".to_owned());
    }
    Ok(())
}
