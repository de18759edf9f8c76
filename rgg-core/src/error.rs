//! Error types for the random graph core.
//!
//! Defines the public error enum, its stable machine-readable codes and a
//! convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr, $class:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }

            /// Return the broad [`ErrorClass`] this code belongs to.
            pub const fn class(self) -> ErrorClass {
                match self {
                    $(Self::$CodeVariant => ErrorClass::$class,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Coarse grouping of failures, used by callers that only care whether the
/// input was malformed or merely out of range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    /// The arguments are malformed independently of any bound.
    InvalidArgument,
    /// The edge count lies outside `[v - 1, v * (v - 1) / 2]`.
    Range,
}

impl ErrorClass {
    /// Return a short lowercase label suitable for structured logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::Range => "range",
        }
    }
}

/// Error type produced when constructing or mutating a [`crate::GraphStore`]
/// or running the [`crate::RandomGraphBuilder`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// The vertex count is zero or too large to store.
    #[error("vertex count {got} is not supported; expected 1 or more that fit in memory")]
    InvalidVertexCount {
        /// The vertex count supplied by the caller.
        got: usize,
    },
    /// Too few edges were requested to connect every vertex.
    #[error(
        "min amount of edges in a graph with {vertices} vertices is {min} (requested {edges})"
    )]
    TooFewEdges {
        /// Number of vertices in the requested graph.
        vertices: usize,
        /// Number of edges requested.
        edges: usize,
        /// Smallest admissible edge count, `vertices - 1`.
        min: usize,
    },
    /// More edges were requested than a simple graph can hold.
    #[error(
        "max amount of edges in a graph with {vertices} vertices is {max} (requested {edges})"
    )]
    TooManyEdges {
        /// Number of vertices in the requested graph.
        vertices: usize,
        /// Number of edges requested.
        edges: usize,
        /// Largest admissible edge count, `vertices * (vertices - 1) / 2`.
        max: usize,
    },
    /// An edge may not join a vertex to itself.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// The vertex named at both ends.
        vertex: usize,
    },
    /// An edge endpoint does not name a vertex of the graph.
    #[error("vertex {vertex} is out of range for a graph with {vertices} vertices")]
    VertexOutOfRange {
        /// The offending index.
        vertex: usize,
        /// Number of vertices in the graph.
        vertices: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// The vertex count is zero or too large to store.
        InvalidVertexCount => InvalidVertexCount { .. } => "RGG_INVALID_VERTEX_COUNT", InvalidArgument,
        /// Too few edges were requested to connect every vertex.
        TooFewEdges => TooFewEdges { .. } => "RGG_TOO_FEW_EDGES", Range,
        /// More edges were requested than a simple graph can hold.
        TooManyEdges => TooManyEdges { .. } => "RGG_TOO_MANY_EDGES", Range,
        /// An edge may not join a vertex to itself.
        SelfLoop => SelfLoop { .. } => "RGG_SELF_LOOP", InvalidArgument,
        /// An edge endpoint does not name a vertex of the graph.
        VertexOutOfRange => VertexOutOfRange { .. } => "RGG_VERTEX_OUT_OF_RANGE", InvalidArgument,
    }
}

impl GraphError {
    /// Shorthand for `self.code().class()`.
    pub const fn class(&self) -> ErrorClass {
        self.code().class()
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GraphError>;
