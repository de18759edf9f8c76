//! Random connected graph core.
//!
//! [`RandomGraphBuilder`] turns a `(vertices, edges)` request into a
//! connected simple graph held in a [`GraphStore`]. [`EdgeBounds`] captures
//! the admissible edge counts so callers can validate a request before any
//! storage is allocated.

mod bounds;
mod builder;
mod error;
mod graph;
#[cfg(test)]
mod test_utils;

pub use crate::{
    bounds::EdgeBounds,
    builder::RandomGraphBuilder,
    error::{ErrorClass, GraphError, GraphErrorCode, Result},
    graph::{Edge, GraphStore, RenderLayout},
};
