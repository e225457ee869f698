// Copyright 2025 Lars Brubaker
// License: MIT
//
// Advancing-front sweep.
//
// Points are swept in increasing (y, x) order behind two synthetic points placed
// below and to either side of the input. Each point is attached to the front
// (point event), the front is smoothed around it, and every constraint edge whose
// upper endpoint is the new point is forced into the mesh (edge event, see
// sweep/edge_event.rs). The remaining gaps and the exterior are handled in
// sweep/finalize.rs.

mod edge_event;
mod finalize;

use std::cmp::Ordering;

use ahash::AHashSet;

use crate::error::{Result, TriangulationError};
use crate::front::Front;
use crate::geom::{cosine, orient, Point, Real};
use crate::mesh::{Edge, Mesh, VertIdx};

/// Number of synthetic points at the start of the working buffer.
pub const SYNTHETIC_POINTS: usize = 2;

/// Default synthetic-point margin, as a fraction of the input extent.
pub const DEFAULT_MARGIN: Real = 0.3;

/// Everything the sweep hands back to the caller.
#[derive(Clone, Debug)]
pub(crate) struct SweepResult {
    /// Synthetic points, then the input sorted by (y, x).
    pub points: Vec<Point>,
    pub triangles: Vec<[VertIdx; 3]>,
    /// Constraint edges in working indices.
    pub constraints: Vec<Edge>,
    /// `order[k]` is the input index of working point `k + SYNTHETIC_POINTS`.
    pub order: Vec<usize>,
}

pub(crate) struct Sweep {
    points: Vec<Point>,
    constraints: Vec<Edge>,
    /// Undirected constraint keys, (min, max).
    constraint_set: AHashSet<(VertIdx, VertIdx)>,
    /// (top, bottom) constraint pairs sorted by top.
    events: Vec<(VertIdx, VertIdx)>,
    event_pos: usize,
    order: Vec<usize>,
    mesh: Mesh,
    front: Front,
}

fn yx_order(a: Point, b: Point) -> Ordering {
    a[1].partial_cmp(&b[1])
        .unwrap_or(Ordering::Equal)
        .then(a[0].partial_cmp(&b[0]).unwrap_or(Ordering::Equal))
}

#[inline]
pub(crate) fn edge_key(a: VertIdx, b: VertIdx) -> (VertIdx, VertIdx) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Sweep {
    /// Sort the input, place the synthetic points and seed the front.
    ///
    /// `input` must be non-empty, finite and free of duplicate points; `edges` must
    /// index into it without self-loops.
    pub fn new(input: &[Point], edges: &[Edge], margin: Real) -> Result<Self> {
        debug_assert!(!input.is_empty(), "sweep needs at least one point");
        let n = input.len();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| yx_order(input[a], input[b]));
        let mut working = vec![0 as VertIdx; n];
        for (k, &old) in order.iter().enumerate() {
            working[old] = (k + SYNTHETIC_POINTS) as VertIdx;
        }

        let mut lo = input[0];
        let mut hi = input[0];
        for p in input {
            lo = [lo[0].min(p[0]), lo[1].min(p[1])];
            hi = [hi[0].max(p[0]), hi[1].max(p[1])];
        }
        let mut xa = (hi[0] - lo[0]) * margin;
        let mut ya = (hi[1] - lo[1]) * margin;
        if xa == 0.0 {
            xa = ya.max(1.0);
        }
        if ya == 0.0 {
            ya = xa.max(1.0);
        }

        let mut points = Vec::with_capacity(n + SYNTHETIC_POINTS);
        points.push([lo[0] - xa, lo[1] - ya]);
        points.push([hi[0] + xa, lo[1] - ya]);
        points.extend(order.iter().map(|&k| input[k]));

        let constraints: Vec<Edge> = edges
            .iter()
            .map(|&[a, b]| [working[a as usize], working[b as usize]])
            .collect();
        let constraint_set = constraints.iter().map(|&[a, b]| edge_key(a, b)).collect();
        let mut events: Vec<(VertIdx, VertIdx)> = constraints
            .iter()
            .filter(|e| e[0] != e[1])
            .map(|&[a, b]| (a.max(b), a.min(b)))
            .collect();
        events.sort_by_key(|e| e.0);

        let mut mesh = Mesh::with_capacity(2 * (n + SYNTHETIC_POINTS));
        mesh.add_triangle(&points, 0, 2, 1)?;
        tracing::debug!(
            points = n,
            constraints = constraints.len(),
            xa,
            ya,
            "sweep initialized"
        );

        Ok(Sweep {
            points,
            constraints,
            constraint_set,
            events,
            event_pos: 0,
            order,
            mesh,
            front: Front::new(vec![0, 2, 1]),
        })
    }

    #[inline]
    fn point(&self, v: VertIdx) -> Point {
        self.points[v as usize]
    }

    pub fn is_constraint(&self, a: VertIdx, b: VertIdx) -> bool {
        self.constraint_set.contains(&edge_key(a, b))
    }

    #[cfg(test)]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Sweep every point after the seed, running edge events as their upper
    /// endpoints are reached.
    pub fn sweep_points(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("sweep", points = self.points.len()).entered();
        for i in 3..self.points.len() as VertIdx {
            self.point_event(i)?;
            self.smooth_front(i)?;
            while let Some(j) = self.next_event_at(i) {
                self.edge_event(i, j)?;
            }
        }
        tracing::debug!(
            triangles = self.mesh.len(),
            front = self.front.len(),
            "sweep done"
        );
        Ok(())
    }

    /// Pops the next pending edge event with top endpoint `i`.
    fn next_event_at(&mut self, i: VertIdx) -> Option<VertIdx> {
        match self.events.get(self.event_pos) {
            Some(&(top, bottom)) if top == i => {
                self.event_pos += 1;
                Some(bottom)
            }
            _ => None,
        }
    }

    /// Attach point `i` to the front segment below it.
    fn point_event(&mut self, i: VertIdx) -> Result<()> {
        let pi = self.point(i);
        let l = self.front.locate(&self.points, pi[0])?;
        let (left, right) = (self.front.as_slice()[l], self.front.as_slice()[l + 1]);

        if pi[0] > self.point(left)[0] {
            // middle case
            self.mesh.add_triangle(&self.points, left, right, i)?;
            self.front.insert(l + 1, i);
        } else {
            // i is straight above front[l]
            if l == 0 {
                return Err(TriangulationError::FrontCorruption { vertex: left });
            }
            let outer = self.front.as_slice()[l - 1];
            self.mesh.add_triangle(&self.points, left, right, i)?;
            self.mesh.add_triangle(&self.points, outer, left, i)?;
            self.front.replace(l, i);
        }
        tracing::trace!(i, l, front = self.front.len(), "point event");
        Ok(())
    }

    /// Fill valleys next to `i` whose angle at the neighbor is at most a right angle.
    fn smooth_front(&mut self, i: VertIdx) -> Result<()> {
        for step in [-1isize, 1] {
            loop {
                let k0 = self.front.position(i)? as isize;
                let (k1, k2) = (k0 + step, k0 + 2 * step);
                if k2 < 0 || k2 >= self.front.len() as isize {
                    break;
                }
                let (k1, k2) = (k1 as usize, k2 as usize);
                let f = self.front.as_slice();
                let (v1, v2) = (f[k1], f[k2]);
                let (p, p1, p2) = (self.point(i), self.point(v1), self.point(v2));

                // left-to-right triple must turn counter-clockwise
                let valley = if step > 0 {
                    orient(p, p1, p2)
                } else {
                    orient(p2, p1, p)
                };
                if valley <= 0.0 {
                    break;
                }
                let cos = cosine(p, p1, p2);
                if cos.is_nan() || cos < 0.0 {
                    break;
                }
                self.mesh.add_triangle(&self.points, i, v1, v2)?;
                self.front.remove(k1);
                tracing::trace!(i, removed = v1, "smoothed front");
            }
        }
        Ok(())
    }

    /// Fill the hull, classify regions and hand out the surviving triangles.
    pub fn finish(mut self, fill_hull: bool, discard_exterior: bool) -> Result<SweepResult> {
        let _span = tracing::debug_span!("finalize").entered();
        self.front.dedup();
        if fill_hull {
            self.fill_hull()?;
        }
        if discard_exterior {
            self.discard_exterior()?;
        }
        Ok(SweepResult {
            triangles: self.mesh.triangles(),
            points: self.points,
            constraints: self.constraints,
            order: self.order,
        })
    }
}
