//! Admissible edge counts for a connected simple graph.

use crate::error::{GraphError, Result};

/// Inclusive range of edge counts that a connected simple graph on a given
/// number of vertices can have.
///
/// The bounds are computed once per request and passed along explicitly so
/// validation and construction always agree on the same values.
///
/// # Examples
/// ```
/// use rgg_core::EdgeBounds;
///
/// let bounds = EdgeBounds::for_vertices(5).expect("five vertices are valid");
/// assert_eq!(bounds.min(), 4);
/// assert_eq!(bounds.max(), 10);
/// assert!(bounds.check(7).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBounds {
    vertices: usize,
    min: usize,
    max: usize,
}

impl EdgeBounds {
    /// Computes `min = v - 1` and `max = v * (v - 1) / 2`.
    ///
    /// When `v * (v - 1)` overflows `usize` the maximum saturates at
    /// `usize::MAX`; such a graph could never be allocated anyway.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidVertexCount`] when `vertices` is zero.
    pub fn for_vertices(vertices: usize) -> Result<Self> {
        if vertices == 0 {
            return Err(GraphError::InvalidVertexCount { got: vertices });
        }
        let min = vertices - 1;
        let max = pair_count(vertices).unwrap_or(usize::MAX);
        Ok(Self { vertices, min, max })
    }

    /// Number of vertices the bounds were computed for.
    #[must_use]
    pub const fn vertices(&self) -> usize {
        self.vertices
    }

    /// Fewest edges that keep every vertex connected.
    #[must_use]
    pub const fn min(&self) -> usize {
        self.min
    }

    /// Edge count of the complete graph.
    #[must_use]
    pub const fn max(&self) -> usize {
        self.max
    }

    /// Returns `true` when `edges` requests the complete graph.
    #[must_use]
    pub const fn is_saturated(&self, edges: usize) -> bool {
        edges == self.max
    }

    /// Validates an edge count against the bounds.
    ///
    /// # Errors
    /// Returns [`GraphError::TooManyEdges`] when `edges > max` and
    /// [`GraphError::TooFewEdges`] when `edges < min`.
    pub const fn check(&self, edges: usize) -> Result<()> {
        if edges > self.max {
            return Err(GraphError::TooManyEdges {
                vertices: self.vertices,
                edges,
                max: self.max,
            });
        }
        if edges < self.min {
            return Err(GraphError::TooFewEdges {
                vertices: self.vertices,
                edges,
                min: self.min,
            });
        }
        Ok(())
    }
}

/// Number of unordered pairs of distinct vertices, `n * (n - 1) / 2`.
pub(crate) fn pair_count(vertices: usize) -> Option<usize> {
    let below = vertices.checked_sub(1)?;
    // One of two consecutive integers is even, so halve that one first.
    if vertices % 2 == 0 {
        (vertices / 2).checked_mul(below)
    } else {
        vertices.checked_mul(below / 2)
    }
}
