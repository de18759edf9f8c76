//! Unit and property tests for random connected graph construction.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use rgg_test_support::tracing::RecordingLayer;

use super::{RandomGraphBuilder, clock_seed, connect_spanning_path, fill_random, saturate};
use crate::{
    bounds::EdgeBounds,
    error::GraphError,
    graph::GraphStore,
    test_utils::{check_graph_invariants, suite_proptest_config},
};

fn build(seed: u64, vertices: usize, edges: usize) -> GraphStore {
    RandomGraphBuilder::new()
        .with_seed(seed)
        .build(vertices, edges)
        .expect("request must be within bounds")
}

#[rstest]
#[case(4, 3)]
#[case(5, 10)]
#[case(1, 0)]
#[case(2, 1)]
#[case(7, 6)]
#[case(7, 12)]
#[case(7, 20)]
#[case(30, 100)]
fn builds_valid_graphs(#[case] vertices: usize, #[case] edges: usize) {
    for seed in [0, 1, 42, 999] {
        let graph = build(seed, vertices, edges);
        check_graph_invariants(&graph, vertices, edges)
            .unwrap_or_else(|reason| panic!("seed {seed}: {reason}"));
    }
}

#[test]
fn minimum_edge_count_yields_a_path_tree() {
    let graph = build(11, 4, 3);
    assert!(graph.is_connected());
    assert_eq!(graph.edge_count(), 3);
    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        assert!(graph.has_edge(a, b) && graph.has_edge(b, a));
    }
    // A Hamiltonian path has exactly two endpoints of degree one.
    let leaves = graph.vertices().filter(|&v| graph.degree(v) == 1).count();
    assert_eq!(leaves, 2);
    assert!(graph.vertices().all(|v| graph.degree(v) <= 2));
}

#[test]
fn maximum_edge_count_yields_complete_graph() {
    let graph = build(3, 5, 10);
    for a in 0..5 {
        for b in 0..5 {
            assert_eq!(graph.has_edge(a, b), a != b, "pair ({a}, {b})");
        }
    }
}

#[test]
fn single_vertex_has_no_edges() {
    let graph = build(5, 1, 0);
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_connected());
}

#[rstest]
#[case::too_few(3, 1, GraphError::TooFewEdges { vertices: 3, edges: 1, min: 2 })]
#[case::too_many(3, 4, GraphError::TooManyEdges { vertices: 3, edges: 4, max: 3 })]
#[case::single_vertex_with_edge(1, 1, GraphError::TooManyEdges { vertices: 1, edges: 1, max: 0 })]
#[case::zero_vertices(0, 0, GraphError::InvalidVertexCount { got: 0 })]
fn rejects_out_of_range_requests(
    #[case] vertices: usize,
    #[case] edges: usize,
    #[case] expected: GraphError,
) {
    let err = RandomGraphBuilder::new()
        .build(vertices, edges)
        .expect_err("request must be rejected");
    assert_eq!(err, expected);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn oversized_vertex_counts_are_rejected_before_allocation() {
    let vertices = 1_usize << 32;
    let err = RandomGraphBuilder::new()
        .with_seed(1)
        .build(vertices, vertices - 1)
        .expect_err("matrix cannot be allocated");
    assert_eq!(err, GraphError::InvalidVertexCount { got: vertices });
}

#[test]
fn clock_seed_is_taken_from_the_wall_clock() {
    // Any date after 1970-01-02 is more than a day of nanoseconds.
    assert!(clock_seed() > 86_400_000_000_000);
    assert!(RandomGraphBuilder::new().seed() > 86_400_000_000_000);
}

#[test]
fn same_seed_reproduces_the_graph() {
    let builder = RandomGraphBuilder::new().with_seed(1234);
    let first = builder.build(12, 30).expect("valid request");
    let second = builder.build(12, 30).expect("valid request");
    assert_eq!(first, second);
}

#[test]
fn different_seeds_vary_the_graph() {
    let graphs: Vec<_> = (0..8).map(|seed| build(seed, 12, 20)).collect();
    assert!(graphs.windows(2).any(|pair| pair[0] != pair[1]));
}

#[test]
fn spanning_path_skips_single_vertex() {
    let mut graph = GraphStore::new(1).expect("valid vertex count");
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(connect_spanning_path(&mut graph, &mut rng), 0);
    assert_eq!(graph.edge_count(), 0);
}

#[rstest]
#[case(2)]
#[case(9)]
#[case(64)]
fn spanning_path_connects_every_vertex(#[case] vertices: usize) {
    let mut graph = GraphStore::new(vertices).expect("valid vertex count");
    let mut rng = SmallRng::seed_from_u64(vertices as u64);
    assert_eq!(connect_spanning_path(&mut graph, &mut rng), vertices - 1);
    assert!(graph.is_connected());
}

#[test]
fn saturate_keeps_existing_edges() {
    let mut graph = GraphStore::new(6).expect("valid vertex count");
    let mut rng = SmallRng::seed_from_u64(8);
    connect_spanning_path(&mut graph, &mut rng);
    let before: Vec<_> = graph.edges().collect();
    assert_eq!(saturate(&mut graph), 15 - 5);
    assert_eq!(graph.edge_count(), 15);
    assert!(before.iter().all(|edge| graph.contains(*edge)));
}

#[test]
fn fill_random_never_removes_edges() {
    let mut graph = GraphStore::new(10).expect("valid vertex count");
    let mut rng = SmallRng::seed_from_u64(77);
    connect_spanning_path(&mut graph, &mut rng);
    let path: Vec<_> = graph.edges().collect();

    let outcome = fill_random(&mut graph, &mut rng, 20, usize::MAX);
    assert!(!outcome.exhaustive);
    assert_eq!(graph.edge_count(), 29);
    assert!(path.iter().all(|edge| graph.contains(*edge)));
}

#[test]
fn fill_random_falls_back_to_scanning_when_budget_is_spent() {
    let mut graph = GraphStore::new(8).expect("valid vertex count");
    let mut rng = SmallRng::seed_from_u64(5);
    connect_spanning_path(&mut graph, &mut rng);

    // 28 possible pairs, 7 on the path: ask for all but one of the rest.
    let outcome = fill_random(&mut graph, &mut rng, 20, 0);
    assert!(outcome.exhaustive);
    assert_eq!(graph.edge_count(), 27);
    check_graph_invariants(&graph, 8, 27).expect("fallback must keep invariants");
}

#[test]
fn near_saturation_requests_complete() {
    let vertices = 40;
    let max = EdgeBounds::for_vertices(vertices).expect("valid").max();
    let graph = build(2024, vertices, max - 1);
    check_graph_invariants(&graph, vertices, max - 1).expect("graph must be valid");
}

#[test]
fn build_with_bounds_reuses_precomputed_bounds() {
    let bounds = EdgeBounds::for_vertices(6).expect("valid vertex count");
    let graph = RandomGraphBuilder::new()
        .with_seed(9)
        .build_with_bounds(bounds, bounds.min())
        .expect("minimum is within bounds");
    assert_eq!(graph.edge_count(), 5);
}

#[test]
fn build_records_span_fields() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        RandomGraphBuilder::new()
            .with_seed(17)
            .build(5, 10)
            .expect("complete graph is valid")
    });

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "core.build")
        .expect("core.build span must exist");
    assert_eq!(span.fields.get("vertices"), Some(&"5".to_owned()));
    assert_eq!(span.fields.get("seed"), Some(&"17".to_owned()));
    assert_eq!(span.fields.get("strategy"), Some(&"saturate".to_owned()));

    assert!(layer.events().iter().any(|event| {
        event
            .fields
            .get("message")
            .is_some_and(|message| message == "graph built")
    }));
}

#[test]
fn build_records_sampling_strategy() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        RandomGraphBuilder::new()
            .with_seed(3)
            .build(10, 20)
            .expect("request is valid")
    });

    let spans = layer.spans();
    let span = spans
        .iter()
        .find(|span| span.name == "core.build")
        .expect("core.build span must exist");
    assert_eq!(span.fields.get("strategy"), Some(&"sample".to_owned()));
    assert!(span.fields.contains_key("rejected"));
}

fn request_strategy() -> impl Strategy<Value = (usize, usize, u64)> {
    (1_usize..=24, any::<u64>(), any::<u64>()).prop_map(|(vertices, pick, seed)| {
        let bounds = EdgeBounds::for_vertices(vertices).expect("vertices >= 1");
        let span = bounds.max() - bounds.min() + 1;
        let edges = bounds.min() + (pick % span as u64) as usize;
        (vertices, edges, seed)
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn built_graphs_hold_all_invariants((vertices, edges, seed) in request_strategy()) {
        let graph = RandomGraphBuilder::new()
            .with_seed(seed)
            .build(vertices, edges)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        check_graph_invariants(&graph, vertices, edges).map_err(TestCaseError::fail)?;
    }

    #[test]
    fn out_of_range_requests_fail(vertices in 2_usize..=24, extra in 1_usize..50) {
        let bounds = EdgeBounds::for_vertices(vertices).expect("vertices >= 1");
        let builder = RandomGraphBuilder::new().with_seed(0);

        let too_many = builder.build(vertices, bounds.max() + extra);
        prop_assert!(
            matches!(too_many, Err(GraphError::TooManyEdges { .. })),
            "expected too many edges error"
        );

        // min >= 1 here, so subtracting at least one always undershoots.
        let too_few = builder.build(vertices, bounds.min().saturating_sub(extra));
        prop_assert!(
            matches!(too_few, Err(GraphError::TooFewEdges { .. })),
            "expected too few edges error"
        );
    }
}
