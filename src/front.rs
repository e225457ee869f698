// Copyright 2025 Lars Brubaker
// License: MIT
//
// The advancing front: the ordered lower-to-upper boundary between the triangulated
// region and the points not yet swept.
//
// Entries are point indices kept in strictly increasing x order. The first and last
// entries are the two synthetic points for the whole sweep. Lookups by vertex are
// linear, as are insertions and removals.

use crate::error::{Result, TriangulationError};
use crate::geom::{Point, Real};
use crate::mesh::VertIdx;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Front {
    verts: Vec<VertIdx>,
}

impl Front {
    pub fn new(verts: Vec<VertIdx>) -> Self {
        Front { verts }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    #[inline]
    pub fn get(&self, k: usize) -> Option<VertIdx> {
        self.verts.get(k).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[VertIdx] {
        &self.verts
    }

    /// Position of `v` on the front.
    pub fn position(&self, v: VertIdx) -> Result<usize> {
        self.verts
            .iter()
            .position(|&f| f == v)
            .ok_or(TriangulationError::FrontCorruption { vertex: v })
    }

    /// Index `l` of the front segment (l, l + 1) whose x-span holds `x`:
    /// the last `l` with `x(front[l + 1]) <= x` is skipped past, so the result satisfies
    /// `x(front[l]) <= x < x(front[l + 1])` for any `x` strictly inside the front's span.
    pub fn locate(&self, points: &[Point], x: Real) -> Result<usize> {
        let mut l = 0;
        while l + 1 < self.verts.len() && points[self.verts[l + 1] as usize][0] <= x {
            l += 1;
        }
        if l + 1 >= self.verts.len() {
            let vertex = self.verts.last().copied().unwrap_or(0);
            return Err(TriangulationError::FrontCorruption { vertex });
        }
        Ok(l)
    }

    #[inline]
    pub fn insert(&mut self, k: usize, v: VertIdx) {
        self.verts.insert(k, v);
    }

    #[inline]
    pub fn remove(&mut self, k: usize) -> VertIdx {
        self.verts.remove(k)
    }

    #[inline]
    pub fn replace(&mut self, k: usize, v: VertIdx) {
        self.verts[k] = v;
    }

    /// Remove every entry strictly between the positions of `a` and `b`.
    /// Returns the number of entries removed.
    pub fn collapse(&mut self, a: VertIdx, b: VertIdx) -> Result<usize> {
        let ka = self.position(a)?;
        let kb = self.position(b)?;
        let (lo, hi) = if ka <= kb { (ka, kb) } else { (kb, ka) };
        if hi <= lo + 1 {
            return Ok(0);
        }
        self.verts.drain(lo + 1..hi);
        Ok(hi - lo - 1)
    }

    /// Drop immediately repeated entries.
    pub fn dedup(&mut self) {
        self.verts.dedup();
    }
}
