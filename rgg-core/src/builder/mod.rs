//! Random connected graph construction.
//!
//! [`RandomGraphBuilder`] validates the requested edge count, lays down a
//! random Hamiltonian path so the graph is connected, and then spends the
//! remaining edge budget either by filling the complete graph or by rejection
//! sampling random vertex pairs.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    Result,
    bounds::EdgeBounds,
    graph::{Edge, GraphStore},
};

/// Rejected draws allowed per possible edge before the random fill gives up
/// on sampling and scans for the missing pairs instead.
const RETRY_BUDGET_FACTOR: usize = 4;

/// Configures and runs random connected graph construction.
///
/// Every call to [`RandomGraphBuilder::build`] seeds a fresh [`SmallRng`] from
/// the configured seed, so a builder produces the same graph for the same
/// `(vertices, edges)` request.
///
/// # Examples
/// ```
/// use rgg_core::RandomGraphBuilder;
///
/// let graph = RandomGraphBuilder::new()
///     .with_seed(7)
///     .build(6, 8)
///     .expect("6 vertices can hold 8 edges");
/// assert_eq!(graph.vertex_count(), 6);
/// assert_eq!(graph.edge_count(), 8);
/// assert!(graph.is_connected());
/// ```
#[derive(Debug, Clone)]
pub struct RandomGraphBuilder {
    seed: u64,
}

impl Default for RandomGraphBuilder {
    fn default() -> Self {
        Self { seed: clock_seed() }
    }
}

impl RandomGraphBuilder {
    /// Creates a builder seeded from the wall clock.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::RandomGraphBuilder;
    ///
    /// let builder = RandomGraphBuilder::new();
    /// let again = builder.clone();
    /// assert_eq!(builder.seed(), again.seed());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the random seed.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::RandomGraphBuilder;
    ///
    /// let builder = RandomGraphBuilder::new().with_seed(42);
    /// assert_eq!(builder.seed(), 42);
    /// ```
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the seed used by [`Self::build`].
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Builds a connected graph with exactly `edges` edges on `vertices`
    /// vertices.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::InvalidVertexCount`] when `vertices` is
    /// zero, [`crate::GraphError::TooManyEdges`] when `edges` exceeds
    /// `vertices * (vertices - 1) / 2` and [`crate::GraphError::TooFewEdges`]
    /// when `edges < vertices - 1`. Nothing is allocated in either case.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::{GraphError, RandomGraphBuilder};
    ///
    /// let builder = RandomGraphBuilder::new().with_seed(1);
    /// let complete = builder.build(5, 10).expect("complete graph is valid");
    /// assert!((0..5).all(|a| (0..5).all(|b| a == b || complete.has_edge(a, b))));
    ///
    /// let err = builder.build(3, 4).expect_err("3 vertices hold at most 3 edges");
    /// assert!(matches!(err, GraphError::TooManyEdges { max: 3, .. }));
    /// ```
    pub fn build(&self, vertices: usize, edges: usize) -> Result<GraphStore> {
        let bounds = EdgeBounds::for_vertices(vertices)?;
        self.build_with_bounds(bounds, edges)
    }

    /// Same as [`Self::build`] but reuses bounds the caller already computed.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::TooManyEdges`] or
    /// [`crate::GraphError::TooFewEdges`] when `edges` falls outside `bounds`.
    #[instrument(
        name = "core.build",
        err,
        skip(self, bounds),
        fields(
            vertices = bounds.vertices(),
            edges = edges,
            seed = self.seed,
            strategy = field::Empty,
            rejected = field::Empty,
        ),
    )]
    pub fn build_with_bounds(&self, bounds: EdgeBounds, edges: usize) -> Result<GraphStore> {
        bounds.check(edges)?;

        let mut graph = GraphStore::new(bounds.vertices())?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let span = Span::current();

        let spanning = connect_spanning_path(&mut graph, &mut rng);
        debug!(spanning, "spanning path placed");

        if bounds.is_saturated(edges) {
            span.record("strategy", field::display("saturate"));
            saturate(&mut graph);
        } else {
            span.record("strategy", field::display("sample"));
            let remaining = edges - graph.edge_count();
            let retry_budget = bounds.max().saturating_mul(RETRY_BUDGET_FACTOR);
            let outcome = fill_random(&mut graph, &mut rng, remaining, retry_budget);
            span.record("rejected", outcome.rejected);
        }

        debug_assert_eq!(graph.edge_count(), edges, "edge budget must be spent exactly");
        info!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }
}

/// Book-keeping from the random fill phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FillOutcome {
    /// Draws discarded because they hit an existing edge or a self-loop.
    pub(crate) rejected: usize,
    /// Whether the phase finished by scanning for missing pairs.
    pub(crate) exhaustive: bool,
}

/// Connects a random permutation of the vertices into a path.
///
/// Returns the number of edges placed, `v - 1` for `v >= 2` and zero for a
/// single vertex.
pub(crate) fn connect_spanning_path<R: Rng>(graph: &mut GraphStore, rng: &mut R) -> usize {
    if graph.vertex_count() < 2 {
        return 0;
    }
    let mut order: Vec<usize> = graph.vertices().collect();
    order.shuffle(rng);

    let mut placed = 0;
    for pair in order.windows(2) {
        if let &[a, b] = pair {
            if let Some(edge) = Edge::new(a, b) {
                placed += usize::from(graph.insert(edge));
            }
        }
    }
    placed
}

/// Adds every pair that is not yet an edge, producing the complete graph.
pub(crate) fn saturate(graph: &mut GraphStore) -> usize {
    let mut added = 0;
    for edge in graph.pairs() {
        added += usize::from(graph.insert(edge));
    }
    added
}

/// Inserts `remaining` new edges between uniformly drawn vertex pairs.
///
/// Collisions and self-loops are redrawn without consuming the budget. After
/// more than `retry_budget` rejected draws the remaining edges are sampled
/// from the list of missing pairs instead, which bounds the loop when the
/// graph is close to complete.
pub(crate) fn fill_random<R: Rng>(
    graph: &mut GraphStore,
    rng: &mut R,
    mut remaining: usize,
    retry_budget: usize,
) -> FillOutcome {
    let vertices = graph.vertex_count();
    let mut rejected = 0_usize;

    while remaining > 0 {
        if rejected > retry_budget {
            warn!(
                rejected,
                remaining, "rejection budget exhausted, scanning for missing pairs"
            );
            fill_from_missing(graph, rng, remaining);
            return FillOutcome {
                rejected,
                exhaustive: true,
            };
        }

        let a = rng.gen_range(0..vertices);
        let b = rng.gen_range(0..vertices);
        match Edge::new(a, b) {
            Some(edge) if graph.insert(edge) => remaining -= 1,
            _ => rejected += 1,
        }
    }

    FillOutcome {
        rejected,
        exhaustive: false,
    }
}

fn fill_from_missing<R: Rng>(graph: &mut GraphStore, rng: &mut R, remaining: usize) {
    let missing: Vec<Edge> = graph
        .pairs()
        .filter(|edge| !graph.contains(*edge))
        .collect();
    debug_assert!(missing.len() >= remaining, "edge budget exceeds free pairs");
    for edge in missing.choose_multiple(rng, remaining) {
        graph.insert(*edge);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
        })
}

#[cfg(test)]
mod tests;
