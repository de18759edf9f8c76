//! Undirected simple graph storage.
//!
//! [`GraphStore`] keeps the edge relation in a strict lower-triangular
//! adjacency matrix packed into a [`BitVec`]. The flag for the unordered pair
//! `{low, high}` with `low < high` lives at `high * (high - 1) / 2 + low`, so
//! symmetry holds by construction and self-loops have no cell at all.
//!
//! ```text
//!        0 1 2 3
//!    1 ⎛ 0       ⎞
//!    2 ⎜ 1 2     ⎟
//!    3 ⎝ 3 4 5   ⎠
//! ```

use std::{collections::VecDeque, fmt, ops::Range};

use bitvec::{bitvec, order::Lsb0, slice::BitSlice, vec::BitVec};

use crate::{
    bounds::pair_count,
    error::{GraphError, Result},
};

/// Normalised unordered pair of distinct vertices.
///
/// # Examples
/// ```
/// use rgg_core::Edge;
///
/// let edge = Edge::new(3, 1).expect("distinct endpoints");
/// assert_eq!(edge.endpoints(), (1, 3));
/// assert_eq!(Edge::new(2, 2), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    low: usize,
    high: usize,
}

impl Edge {
    /// Builds the edge `{a, b}`, returning `None` for a self-loop.
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Option<Self> {
        if a < b {
            Some(Self { low: a, high: b })
        } else if b < a {
            Some(Self { low: b, high: a })
        } else {
            None
        }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn low(&self) -> usize {
        self.low
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn high(&self) -> usize {
        self.high
    }

    /// Both endpoints as `(low, high)`.
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.low, self.high)
    }

    const fn cell(&self) -> usize {
        // high >= 1 because low < high.
        self.high * (self.high - 1) / 2 + self.low
    }
}

/// Text layouts supported by [`GraphStore::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderLayout {
    /// Rows `1..v` of the lower-triangular adjacency matrix.
    #[default]
    Matrix,
    /// One line per vertex listing its neighbours in ascending order.
    Neighbours,
}

/// Vertex set and edge relation of an undirected simple graph.
///
/// Vertices are the dense indices `0..vertex_count()`. The store never holds
/// self-loops or parallel edges; inserting an existing pair again is a no-op.
///
/// # Examples
/// ```
/// use rgg_core::GraphStore;
///
/// let mut graph = GraphStore::new(3).expect("three vertices are valid");
/// assert!(graph.add_edge(0, 2).expect("valid edge"));
/// assert!(!graph.add_edge(2, 0).expect("valid edge"));
/// assert!(graph.has_edge(2, 0));
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphStore {
    vertices: usize,
    cells: BitVec,
    edges: usize,
}

impl GraphStore {
    /// Allocates an edgeless graph on `vertices` vertices.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertexCount`] when `vertices` is zero or
    /// the matrix would need more bits than a [`BitVec`] can address.
    pub fn new(vertices: usize) -> Result<Self> {
        if vertices == 0 {
            return Err(GraphError::InvalidVertexCount { got: vertices });
        }
        let cells = pair_count(vertices)
            .filter(|&cells| cells <= BitSlice::<usize, Lsb0>::MAX_BITS)
            .ok_or(GraphError::InvalidVertexCount { got: vertices })?;
        Ok(Self {
            vertices,
            cells: bitvec![0; cells],
            edges: 0,
        })
    }

    /// Number of vertices.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Number of distinct edges stored.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edges
    }

    /// Range of valid vertex indices.
    #[must_use]
    pub const fn vertices(&self) -> Range<usize> {
        0..self.vertices
    }

    /// Inserts the unordered pair `{a, b}`.
    ///
    /// Returns `Ok(true)` when the edge was added and `Ok(false)` when it was
    /// already present.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] when either endpoint is not a
    /// vertex of this graph and [`GraphError::SelfLoop`] when `a == b`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        let edge = Edge::new(a, b).ok_or(GraphError::SelfLoop { vertex: a })?;
        Ok(self.insert(edge))
    }

    /// Returns whether `{a, b}` is an edge. Self-loops and out-of-range
    /// indices are never edges.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        Edge::new(a, b).is_some_and(|edge| self.contains(edge))
    }

    /// Returns whether `edge` is stored. Edges touching a vertex outside the
    /// graph are never stored.
    #[must_use]
    pub fn contains(&self, edge: Edge) -> bool {
        // Out-of-range endpoints have no cell.
        edge.high < self.vertices && self.cells.get(edge.cell()).is_some_and(|bit| *bit)
    }

    /// Neighbours of `vertex` in ascending order. Empty for an unknown vertex.
    pub fn neighbours(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.vertices()
            .filter(move |&other| self.has_edge(vertex, other))
    }

    /// Number of edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbours(vertex).count()
    }

    /// Every stored edge, ordered by `(high, low)`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.pairs().filter(|edge| self.contains(*edge))
    }

    /// Returns whether every vertex is reachable from every other.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::GraphStore;
    ///
    /// let mut graph = GraphStore::new(3).expect("valid vertex count");
    /// graph.add_edge(0, 1).expect("valid edge");
    /// assert!(!graph.is_connected());
    /// graph.add_edge(1, 2).expect("valid edge");
    /// assert!(graph.is_connected());
    /// ```
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let mut seen = bitvec![0; self.vertices];
        let mut queue = VecDeque::from([0_usize]);
        seen.set(0, true);
        let mut reached = 1_usize;
        while let Some(vertex) = queue.pop_front() {
            for next in self.neighbours(vertex) {
                if !seen.replace(next, true) {
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.vertices
    }

    /// Rows `1..v` of the lower-triangular adjacency matrix as `0/1` flags.
    ///
    /// Every row has width `v - 1`; row `r` describes vertex `r` and cell `c`
    /// holds `1` when `{c, r}` is an edge. Cells with `c >= r` are always `0`.
    /// A single-vertex graph has no rows.
    #[must_use]
    pub fn adjacency_rows(&self) -> Vec<Vec<u8>> {
        let width = self.vertices - 1;
        (1..self.vertices)
            .map(|row| {
                (0..width)
                    .map(|col| u8::from(col < row && self.has_edge(row, col)))
                    .collect()
            })
            .collect()
    }

    /// Renders the graph in the requested layout.
    ///
    /// The output depends only on the stored edges, so rendering the same
    /// graph twice yields identical text.
    ///
    /// # Examples
    /// ```
    /// use rgg_core::{GraphStore, RenderLayout};
    ///
    /// let mut graph = GraphStore::new(3).expect("valid vertex count");
    /// graph.add_edge(0, 1).expect("valid edge");
    /// graph.add_edge(2, 1).expect("valid edge");
    /// assert_eq!(graph.render(RenderLayout::Matrix), "(1) [1 0]\n(2) [0 1]\n");
    /// assert_eq!(graph.render(RenderLayout::Neighbours), "0: 1\n1: 0 2\n2: 1\n");
    /// ```
    #[must_use]
    pub fn render(&self, layout: RenderLayout) -> String {
        match layout {
            RenderLayout::Matrix => self.to_string(),
            RenderLayout::Neighbours => {
                let mut out = String::new();
                for vertex in self.vertices() {
                    out.push_str(&vertex.to_string());
                    out.push(':');
                    for next in self.neighbours(vertex) {
                        out.push(' ');
                        out.push_str(&next.to_string());
                    }
                    out.push('\n');
                }
                out
            }
        }
    }

    /// Stores `edge`, returning `true` when it was not present before.
    ///
    /// The caller guarantees both endpoints are below `vertex_count()`.
    pub(crate) fn insert(&mut self, edge: Edge) -> bool {
        debug_assert!(edge.high < self.vertices, "edge endpoint out of range");
        let was_set = self.cells.replace(edge.cell(), true);
        if !was_set {
            self.edges += 1;
        }
        !was_set
    }

    /// Every unordered pair of distinct vertices, ordered by `(high, low)`.
    pub(crate) fn pairs(&self) -> impl Iterator<Item = Edge> + use<> {
        (1..self.vertices).flat_map(|high| (0..high).map(move |low| Edge { low, high }))
    }

    const fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertices {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                vertices: self.vertices,
            })
        }
    }
}

impl fmt::Display for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.adjacency_rows().iter().enumerate() {
            write!(f, "({}) [", index + 1)?;
            for (col, flag) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{flag}")?;
            }
            f.write_str("]\n")?;
        }
        Ok(())
    }
}
