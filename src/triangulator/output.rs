// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangulation result and read-only queries on it.

use ahash::{AHashMap, AHashSet};

use crate::geom::{in_circle, orient, Point, Real};
use crate::mesh::{Edge, VertIdx};
use crate::sweep::edge_key;

/// The outcome of a triangulation run.
///
/// `points()` is the working buffer the triangles index into: the two synthetic
/// points first, then the normalized input sorted by (y, x).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    points: Vec<Point>,
    triangles: Vec<[VertIdx; 3]>,
    constraints: Vec<Edge>,
    sources: Vec<Option<usize>>,
}

impl Triangulation {
    pub(crate) fn new(
        points: Vec<Point>,
        triangles: Vec<[VertIdx; 3]>,
        constraints: Vec<Edge>,
        sources: Vec<Option<usize>>,
    ) -> Self {
        Triangulation {
            points,
            triangles,
            constraints,
            sources,
        }
    }

    pub fn points(&self) -> &[Point] { &self.points }
    /// Counter-clockwise triangles indexing `points()`.
    pub fn triangles(&self) -> &[[VertIdx; 3]] { &self.triangles }
    /// Normalized constraint edges, indexing `points()`.
    pub fn constraint_edges(&self) -> &[Edge] { &self.constraints }
    pub fn triangle_count(&self) -> usize { self.triangles.len() }
    pub fn vertex_count(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.triangles.is_empty() }

    /// The input point that output point `v` came from. `None` for the synthetic
    /// points and for points created by edge splitting. Merged duplicates report the
    /// lowest input index of their group.
    pub fn source_index(&self, v: VertIdx) -> Option<usize> {
        self.sources.get(v as usize).copied().flatten()
    }

    pub fn source_indices(&self) -> &[Option<usize>] {
        &self.sources
    }

    /// Sum of the triangle areas.
    pub fn area(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                0.5 * orient(
                    self.points[a as usize],
                    self.points[b as usize],
                    self.points[c as usize],
                )
            })
            .sum()
    }

    /// Number of interior, unconstrained edges whose opposite vertex lies strictly
    /// inside the circumcircle of the triangle on the other side. Zero for a
    /// constrained Delaunay triangulation; the sweep does not legalize, so this is
    /// usually nonzero for larger inputs.
    pub fn delaunay_violations(&self) -> usize {
        let mut apex: AHashMap<(VertIdx, VertIdx), VertIdx> =
            AHashMap::with_capacity(self.triangles.len() * 3);
        for &[a, b, c] in &self.triangles {
            apex.insert((a, b), c);
            apex.insert((b, c), a);
            apex.insert((c, a), b);
        }
        let constrained: AHashSet<(VertIdx, VertIdx)> =
            self.constraints.iter().map(|&[a, b]| edge_key(a, b)).collect();

        let p = |v: VertIdx| self.points[v as usize];
        apex.iter()
            .filter(|&(&(a, b), _)| a < b && !constrained.contains(&(a, b)))
            .filter_map(|(&(a, b), &c)| apex.get(&(b, a)).map(|&d| (a, b, c, d)))
            .filter(|&(a, b, c, d)| in_circle(p(d), p(a), p(b), p(c)) > 0.0)
            .count()
    }

    /// Output coordinates as a flat `[x0, y0, x1, y1, ...]` buffer.
    pub fn flat_vertices(&self) -> Vec<Real> {
        self.points.iter().flat_map(|p| [p[0], p[1]]).collect()
    }

    /// Triangles as a flat index buffer, three entries per triangle.
    pub fn flat_triangles(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    pub fn into_parts(self) -> (Vec<Point>, Vec<[VertIdx; 3]>) {
        (self.points, self.triangles)
    }
}
