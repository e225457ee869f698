// Copyright 2025 Lars Brubaker
// License: MIT
//
// Edge events: forcing a constraint edge (i, j) into the mesh, where i is the point
// just swept and j lies below it.
//
// The cut from i to j is followed through the mesh. Every triangle it crosses is
// removed, and front stretches it passes over are cut off. The vertices exposed on
// either side of the cut form two open chains from i to j, which are then
// re-triangulated independently. Front ranges skipped over are recorded as holes and
// collapsed once both chains are filled.

use crate::error::{Result, TriangulationError};
use crate::geom::{distance_to_line, orient, Point, Real};
use crate::mesh::{Triangle, VertIdx};

use super::Sweep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// The two open polygons on either side of the cut, both starting at i.
#[derive(Debug)]
struct Chains {
    left: Vec<VertIdx>,
    right: Vec<VertIdx>,
}

impl Chains {
    fn new(i: VertIdx) -> Self {
        Chains {
            left: vec![i],
            right: vec![i],
        }
    }

    fn push(&mut self, side: Side, v: VertIdx) {
        let chain = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        if chain.last() != Some(&v) {
            chain.push(v);
        }
    }
}

/// Where the walk along the cut currently is.
#[derive(Clone, Copy, Debug)]
enum Cursor {
    /// The cut crosses mesh edge (a, b); `next` is the triangle beyond it, if any.
    Through {
        a: VertIdx,
        b: VertIdx,
        next: Option<Triangle>,
    },
    /// The cut runs above the front, which is walked from position `at`.
    /// `hole_start` is the front vertex where the cut-off range begins.
    Along { at: usize, hole_start: VertIdx },
}

impl Sweep {
    fn side(&self, i: VertIdx, j: VertIdx, v: VertIdx) -> Option<Side> {
        let o = orient(self.point(i), self.point(j), self.point(v));
        if o > 0.0 {
            Some(Side::Left)
        } else if o < 0.0 {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// The triangle at `i` whose opening contains the direction towards `j`,
    /// rotated so that it starts at `i`.
    fn find_cut_triangle(&self, i: VertIdx, j: VertIdx) -> Option<Triangle> {
        let (pi, pj) = (self.point(i), self.point(j));
        self.mesh
            .triangles_at(i)
            .filter_map(|t| t.rotated_to(i))
            .find(|t| {
                let [_, a, b] = t.vertices();
                orient(pi, self.point(a), pj) > 0.0 && orient(pi, pj, self.point(b)) > 0.0
            })
    }

    /// Make constraint edge (i, j) an edge of the mesh.
    pub(super) fn edge_event(&mut self, i: VertIdx, j: VertIdx) -> Result<()> {
        if self.mesh.has_edge(i, j) {
            tracing::trace!(i, j, "constraint already present");
            return Ok(());
        }
        let (pi, pj) = (self.point(i), self.point(j));
        // direction of travel along the front, none for a vertical cut
        let step: Option<isize> = if pj[0] > pi[0] {
            Some(1)
        } else if pj[0] < pi[0] {
            Some(-1)
        } else {
            None
        };
        // side of the cut holding the already triangulated region
        let lower = if pj[0] < pi[0] { Side::Left } else { Side::Right };

        let mut chains = Chains::new(i);
        let mut holes: Vec<(VertIdx, VertIdx)> = Vec::new();
        let mut removed = 0usize;

        let mut cursor = match self.find_cut_triangle(i, j) {
            Some(start) => {
                let [_, a, b] = start.vertices();
                let (sa, sb) = (self.side(i, j, a), self.side(i, j, b));
                match (sa, sb) {
                    (Some(sa), Some(sb)) if sa != sb => {
                        chains.push(sa, a);
                        chains.push(sb, b);
                    }
                    _ => {
                        return Err(TriangulationError::unresolved(
                            i,
                            j,
                            "cut triangle does not straddle the edge",
                        ))
                    }
                }
                let next = self.mesh.neighbor_across(start, a, b)?;
                self.mesh.remove_triangle(i, a, b)?;
                removed += 1;
                Cursor::Through { a, b, next }
            }
            None => Cursor::Along {
                at: self.front.position(i)?,
                hole_start: i,
            },
        };

        loop {
            cursor = match cursor {
                Cursor::Through { a, b, next: None } => {
                    // the cut leaves the triangulated region through front edge (a, b)
                    let step = step.ok_or(TriangulationError::unresolved(
                        i,
                        j,
                        "vertical edge crossed the front",
                    ))?;
                    let (ka, kb) = (self.front.position(a)?, self.front.position(b)?);
                    let (behind, ahead, at) = if kb as isize - ka as isize == step {
                        (a, b, kb)
                    } else if ka as isize - kb as isize == step {
                        (b, a, ka)
                    } else {
                        return Err(TriangulationError::unresolved(
                            i,
                            j,
                            "crossed edge without a triangle is not a front edge",
                        ));
                    };
                    if self.side(i, j, ahead) != Some(lower) {
                        return Err(TriangulationError::unresolved(
                            i,
                            j,
                            "front vertex past the crossing is above the edge",
                        ));
                    }
                    Cursor::Along {
                        at,
                        hole_start: behind,
                    }
                }
                Cursor::Through {
                    a,
                    b,
                    next: Some(t),
                } => {
                    let c = t.third(a, b).ok_or(TriangulationError::unresolved(
                        i,
                        j,
                        "neighbor does not share the crossed edge",
                    ))?;
                    if c == j {
                        self.mesh.remove_triangle(a, b, c)?;
                        removed += 1;
                        break;
                    }
                    let sc = self.side(i, j, c).ok_or(TriangulationError::unresolved(
                        i,
                        j,
                        "edge passes through a mesh vertex",
                    ))?;
                    chains.push(sc, c);
                    let (na, nb) = if self.side(i, j, a) == Some(sc) {
                        (c, b)
                    } else {
                        (a, c)
                    };
                    let next = self.mesh.neighbor_across(t, na, nb)?;
                    self.mesh.remove_triangle(a, b, c)?;
                    removed += 1;
                    Cursor::Through { a: na, b: nb, next }
                }
                Cursor::Along { at, hole_start } => {
                    let step = step.ok_or(TriangulationError::unresolved(
                        i,
                        j,
                        "vertical edge cannot follow the front",
                    ))?;
                    let nk = at as isize + step;
                    let v = usize::try_from(nk)
                        .ok()
                        .and_then(|nk| self.front.get(nk))
                        .ok_or(TriangulationError::unresolved(i, j, "ran off the front"))?;
                    if v == j {
                        holes.push((hole_start, j));
                        break;
                    }
                    let sv = self.side(i, j, v).ok_or(TriangulationError::unresolved(
                        i,
                        j,
                        "edge passes through a front vertex",
                    ))?;
                    chains.push(sv, v);
                    if sv == lower {
                        Cursor::Along {
                            at: nk as usize,
                            hole_start,
                        }
                    } else {
                        // the front rises above the cut: go back into the mesh below it
                        holes.push((hole_start, v));
                        let u = self.front.as_slice()[at];
                        let t = self.mesh.triangle_on_edge(u, v).ok_or(
                            TriangulationError::unresolved(i, j, "front edge has no triangle"),
                        )?;
                        Cursor::Through {
                            a: u,
                            b: v,
                            next: Some(t),
                        }
                    }
                }
            };
        }

        chains.push(Side::Left, j);
        chains.push(Side::Right, j);
        tracing::debug!(
            i,
            j,
            removed,
            left = chains.left.len(),
            right = chains.right.len(),
            holes = holes.len(),
            "edge event"
        );
        let Chains { left, right } = chains;
        self.fill_chain(left, i, j)?;
        self.fill_chain(right, i, j)?;
        for (start, end) in holes {
            self.front.collapse(start, end)?;
        }
        Ok(())
    }

    /// Triangulate the polygon formed by `chain` (running from i to j) and the cut.
    ///
    /// Each step clips the valid ear whose tip lies farthest from line (i, j).
    fn fill_chain(&mut self, mut chain: Vec<VertIdx>, i: VertIdx, j: VertIdx) -> Result<()> {
        let (pi, pj) = (self.point(i), self.point(j));
        let coords: Vec<Point> = chain.iter().map(|&v| self.point(v)).collect();
        let twice_area: Real = coords
            .iter()
            .zip(coords.iter().cycle().skip(1))
            .map(|(p, q)| p[0] * q[1] - q[0] * p[1])
            .sum();
        let sign = if twice_area > 0.0 { 1.0 } else { -1.0 };

        while chain.len() > 2 {
            let mut best: Option<(Real, usize)> = None;
            for m in 1..chain.len() - 1 {
                let (a, b, c) = (chain[m - 1], chain[m], chain[m + 1]);
                let (pa, pb, pc) = (self.point(a), self.point(b), self.point(c));
                if orient(pa, pb, pc) * sign <= 0.0 {
                    continue;
                }
                let blocked = chain.iter().any(|&v| {
                    if v == a || v == b || v == c {
                        return false;
                    }
                    let q = self.point(v);
                    orient(pa, pb, q) * sign >= 0.0
                        && orient(pb, pc, q) * sign >= 0.0
                        && orient(pc, pa, q) * sign >= 0.0
                });
                if blocked {
                    continue;
                }
                let d = distance_to_line(pb, pi, pj);
                if best.map_or(true, |(bd, _)| d > bd) {
                    best = Some((d, m));
                }
            }
            let (_, m) = best.ok_or(TriangulationError::unresolved(
                i,
                j,
                "no ear left in the chain polygon",
            ))?;
            self.mesh
                .add_triangle(&self.points, chain[m - 1], chain[m], chain[m + 1])?;
            chain.remove(m);
        }
        Ok(())
    }
}
