// Copyright 2025 Lars Brubaker
// License: MIT
//
// Triangle store with a directed-edge adjacency index.
//
// Design:
//   - Triangles live in a Vec arena; freed slots are recycled through a free list,
//     so a TriIdx stays valid until its triangle is removed.
//   - Every stored triangle is counter-clockwise and keyed by its canonical rotation
//     (smallest vertex index first), which makes uniqueness a single map lookup.
//   - The adjacency index maps each directed edge (a, b) of a live triangle to its
//     apex c. A live triangle owns exactly three entries; add and remove touch all
//     three or none.

use ahash::AHashMap;

use crate::error::{Result, TriangulationError};
use crate::geom::{orient, Point};

/// Index into the point buffer.
pub type VertIdx = u32;
/// Index into Mesh::tris
pub type TriIdx = u32;
/// An unordered pair of point indices.
pub type Edge = [VertIdx; 2];

/// A triangle given by three point indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle(pub [VertIdx; 3]);

impl Triangle {
    #[inline]
    pub fn new(a: VertIdx, b: VertIdx, c: VertIdx) -> Self {
        Triangle([a, b, c])
    }

    #[inline]
    pub fn vertices(self) -> [VertIdx; 3] {
        self.0
    }

    /// The rotation that puts the smallest index first. Orientation is unchanged.
    pub fn canonical(self) -> Self {
        let [a, b, c] = self.0;
        if a <= b && a <= c {
            self
        } else if b <= a && b <= c {
            Triangle([b, c, a])
        } else {
            Triangle([c, a, b])
        }
    }

    /// The same vertices in the opposite orientation.
    #[inline]
    pub fn reversed(self) -> Self {
        let [a, b, c] = self.0;
        Triangle([a, c, b])
    }

    #[inline]
    pub fn contains(self, v: VertIdx) -> bool {
        self.0.contains(&v)
    }

    /// Directed edges in rotation order: (a, b), (b, c), (c, a).
    pub fn edges(self) -> [(VertIdx, VertIdx); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }

    /// Each directed edge paired with the vertex opposite it.
    fn directed(self) -> [((VertIdx, VertIdx), VertIdx); 3] {
        let [a, b, c] = self.0;
        [((a, b), c), ((b, c), a), ((c, a), b)]
    }

    /// Rotation that starts at `v`, or `None` if `v` is not a vertex.
    pub fn rotated_to(self, v: VertIdx) -> Option<Self> {
        let [a, b, c] = self.0;
        if a == v {
            Some(self)
        } else if b == v {
            Some(Triangle([b, c, a]))
        } else if c == v {
            Some(Triangle([c, a, b]))
        } else {
            None
        }
    }

    /// The edge opposite vertex `v`, in the triangle's own orientation.
    pub fn edge_opposite(self, v: VertIdx) -> Option<(VertIdx, VertIdx)> {
        self.rotated_to(v).map(|t| (t.0[1], t.0[2]))
    }

    /// The vertex not on edge (a, b), if (a, b) is an edge of this triangle.
    pub fn third(self, a: VertIdx, b: VertIdx) -> Option<VertIdx> {
        if a == b || !self.contains(a) || !self.contains(b) {
            return None;
        }
        self.0.iter().copied().find(|&v| v != a && v != b)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    tris: Vec<Option<Triangle>>,
    tri_free: Vec<TriIdx>,
    /// canonical triangle -> slot
    index: AHashMap<Triangle, TriIdx>,
    /// directed edge -> apex of the CCW triangle on its left
    apex: AHashMap<(VertIdx, VertIdx), VertIdx>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Mesh {
            tris: Vec::with_capacity(triangles),
            tri_free: Vec::new(),
            index: AHashMap::with_capacity(triangles),
            apex: AHashMap::with_capacity(triangles * 3),
        }
    }

    /// Number of live triangles.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Upper bound (exclusive) on the TriIdx values handed out so far.
    pub fn slot_count(&self) -> usize {
        self.tris.len()
    }

    /// Insert triangle (a, b, c), normalizing it to counter-clockwise order.
    /// Returns the canonical triangle actually stored.
    pub fn add_triangle(
        &mut self,
        points: &[Point],
        a: VertIdx,
        b: VertIdx,
        c: VertIdx,
    ) -> Result<Triangle> {
        let degenerate = TriangulationError::DegenerateTriangle { a, b, c };
        if a == b || b == c || c == a {
            return Err(degenerate);
        }
        let point = |v: VertIdx| {
            points
                .get(v as usize)
                .copied()
                .ok_or(TriangulationError::VertexOutOfRange {
                    vertex: v,
                    len: points.len(),
                })
        };
        let (pa, pb, pc) = (point(a)?, point(b)?, point(c)?);
        if pa == pb || pb == pc || pc == pa {
            return Err(degenerate);
        }
        let o = orient(pa, pb, pc);
        if o == 0.0 || !o.is_finite() {
            return Err(degenerate);
        }
        let tri = if o > 0.0 {
            Triangle([a, b, c])
        } else {
            Triangle([b, a, c])
        }
        .canonical();

        if self.index.contains_key(&tri) {
            return Err(TriangulationError::DuplicateTriangle { a, b, c });
        }
        for (edge, _) in tri.directed() {
            if self.apex.contains_key(&edge) {
                return Err(TriangulationError::AdjacencyCorruption {
                    a,
                    b,
                    c,
                    detail: "directed edge already belongs to another triangle",
                });
            }
        }

        for (edge, opposite) in tri.directed() {
            self.apex.insert(edge, opposite);
        }
        let slot = match self.tri_free.pop() {
            Some(slot) => {
                self.tris[slot as usize] = Some(tri);
                slot
            }
            None => {
                self.tris.push(Some(tri));
                (self.tris.len() - 1) as TriIdx
            }
        };
        self.index.insert(tri, slot);
        tracing::trace!(?tri, slot, "add triangle");
        Ok(tri)
    }

    /// Remove the triangle with vertex set {a, b, c}, given in either orientation.
    /// Returns the canonical triangle that was stored.
    pub fn remove_triangle(&mut self, a: VertIdx, b: VertIdx, c: VertIdx) -> Result<Triangle> {
        let candidates = [Triangle([a, b, c]).canonical(), Triangle([b, a, c]).canonical()];
        let (tri, slot) = candidates
            .iter()
            .find_map(|t| self.index.get(t).map(|&slot| (*t, slot)))
            .ok_or(TriangulationError::AdjacencyCorruption {
                a,
                b,
                c,
                detail: "no stored triangle has this vertex set",
            })?;

        for (edge, opposite) in tri.directed() {
            if self.apex.get(&edge) != Some(&opposite) {
                return Err(TriangulationError::AdjacencyCorruption {
                    a,
                    b,
                    c,
                    detail: "directed edge entry missing for stored triangle",
                });
            }
        }
        for (edge, _) in tri.directed() {
            self.apex.remove(&edge);
        }
        self.index.remove(&tri);
        self.tris[slot as usize] = None;
        self.tri_free.push(slot);
        tracing::trace!(?tri, slot, "remove triangle");
        Ok(tri)
    }

    /// Apex c of the live triangle (a, b, c) holding directed edge (a, b).
    #[inline]
    pub fn apex(&self, a: VertIdx, b: VertIdx) -> Option<VertIdx> {
        self.apex.get(&(a, b)).copied()
    }

    /// Returns true if some live triangle has (a, b) as an edge, in either direction.
    pub fn has_edge(&self, a: VertIdx, b: VertIdx) -> bool {
        self.apex.contains_key(&(a, b)) || self.apex.contains_key(&(b, a))
    }

    /// A live triangle on undirected edge (a, b). The side left of (a, b) is tried first.
    pub fn triangle_on_edge(&self, a: VertIdx, b: VertIdx) -> Option<Triangle> {
        if let Some(c) = self.apex(a, b) {
            return Some(Triangle([a, b, c]).canonical());
        }
        self.apex(b, a).map(|c| Triangle([b, a, c]).canonical())
    }

    /// The other triangle sharing edge (a, b) with the triangle whose third vertex is `apex`.
    ///
    /// Returns `Ok(None)` when the edge is a boundary edge (only one side is populated).
    /// Fails if both sides exist but neither has `apex` as its third vertex.
    pub fn adjacent_triangle(
        &self,
        a: VertIdx,
        b: VertIdx,
        apex: VertIdx,
    ) -> Result<Option<Triangle>> {
        let (Some(left), Some(right)) = (self.apex(a, b), self.apex(b, a)) else {
            return Ok(None);
        };
        if left == apex {
            Ok(Some(Triangle([b, a, right]).canonical()))
        } else if right == apex {
            Ok(Some(Triangle([a, b, left]).canonical()))
        } else {
            Err(TriangulationError::AdjacencyCorruption {
                a,
                b,
                c: apex,
                detail: "edge and apex do not form a stored triangle",
            })
        }
    }

    /// The triangle across edge (a, b) from `tri`.
    pub fn neighbor_across(
        &self,
        tri: Triangle,
        a: VertIdx,
        b: VertIdx,
    ) -> Result<Option<Triangle>> {
        let [x, y, z] = tri.0;
        let apex = tri.third(a, b).ok_or(TriangulationError::AdjacencyCorruption {
            a: x,
            b: y,
            c: z,
            detail: "edge is not part of the triangle",
        })?;
        self.adjacent_triangle(a, b, apex)
    }

    /// Slot of the live triangle with the same vertices, in either orientation.
    pub fn locate(&self, tri: Triangle) -> Option<TriIdx> {
        self.index
            .get(&tri.canonical())
            .or_else(|| self.index.get(&tri.reversed().canonical()))
            .copied()
    }

    pub fn get(&self, idx: TriIdx) -> Option<Triangle> {
        self.tris.get(idx as usize).copied().flatten()
    }

    pub fn contains(&self, tri: Triangle) -> bool {
        self.locate(tri).is_some()
    }

    /// Live triangles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TriIdx, Triangle)> + '_ {
        self.tris
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i as TriIdx, t)))
    }

    /// Live triangles having `v` as a vertex. Linear in the number of slots.
    pub fn triangles_at(&self, v: VertIdx) -> impl Iterator<Item = Triangle> + '_ {
        self.iter().map(|(_, t)| t).filter(move |t| t.contains(v))
    }

    /// Live triangles as vertex triples, in slot order.
    pub fn triangles(&self) -> Vec<[VertIdx; 3]> {
        self.iter().map(|(_, t)| t.0).collect()
    }
}
