// Copyright 2025 Lars Brubaker
// License: MIT
//
// Error types for the triangulator.

use thiserror::Error;

use crate::mesh::VertIdx;

/// Result type alias using [`TriangulationError`].
pub type Result<T> = std::result::Result<T, TriangulationError>;

/// Errors that abort a triangulation run.
///
/// Every variant is fatal for the run that produced it: the mesh state is no longer
/// trustworthy and nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriangulationError {
    /// A triangle with repeated vertices, coincident coordinates or zero area.
    #[error("triangle ({a}, {b}, {c}) is degenerate")]
    DegenerateTriangle {
        /// First vertex.
        a: VertIdx,
        /// Second vertex.
        b: VertIdx,
        /// Third vertex.
        c: VertIdx,
    },

    /// A triangle with the same vertex set is already in the mesh.
    #[error("triangle ({a}, {b}, {c}) is already present")]
    DuplicateTriangle {
        /// First vertex.
        a: VertIdx,
        /// Second vertex.
        b: VertIdx,
        /// Third vertex.
        c: VertIdx,
    },

    /// The directed-edge index disagrees with the stored triangles.
    #[error("adjacency index corrupt around ({a}, {b}, {c}): {detail}")]
    AdjacencyCorruption {
        /// First vertex.
        a: VertIdx,
        /// Second vertex.
        b: VertIdx,
        /// Third vertex, or the apex that was expected.
        c: VertIdx,
        /// What was inconsistent.
        detail: &'static str,
    },

    /// The edge-event resolver could not follow constraint edge (i, j).
    #[error("could not resolve constraint edge ({i}, {j}): {detail}")]
    UnresolvedIntersection {
        /// The endpoint just swept.
        i: VertIdx,
        /// The lower endpoint.
        j: VertIdx,
        /// Where the traversal got stuck.
        detail: &'static str,
    },

    /// A vertex expected on the advancing front is not there.
    #[error("vertex {vertex} is not on the advancing front")]
    FrontCorruption {
        /// The missing vertex.
        vertex: VertIdx,
    },

    /// An edge references a point that does not exist.
    #[error("edge {edge} references point {vertex}, but only {len} points exist")]
    EdgeOutOfRange {
        /// The edge index.
        edge: usize,
        /// The invalid point index.
        vertex: VertIdx,
        /// Number of points.
        len: usize,
    },

    /// A triangle references a point that does not exist.
    #[error("triangle references point {vertex}, but only {len} points exist")]
    VertexOutOfRange {
        /// The invalid point index.
        vertex: VertIdx,
        /// Number of points.
        len: usize,
    },

    /// An edge connects a point to itself.
    #[error("edge {edge} is a self-loop on point {vertex}")]
    SelfLoop {
        /// The edge index.
        edge: usize,
        /// The repeated point index.
        vertex: VertIdx,
    },

    /// A coordinate is NaN or infinite.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The point index.
        index: usize,
    },
}

impl TriangulationError {
    pub(crate) fn unresolved(i: VertIdx, j: VertIdx, detail: &'static str) -> Self {
        TriangulationError::UnresolvedIntersection { i, j, detail }
    }
}
