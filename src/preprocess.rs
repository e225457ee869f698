// Copyright 2025 Lars Brubaker
// License: MIT
//
// Input normalization run before the sweep: validation, splitting of intersecting
// constraint edges, and merging of points with identical coordinates.

use ahash::AHashMap;

use crate::error::{Result, TriangulationError};
use crate::geom::{intersection_param, lerp, orient, Point, Real};
use crate::mesh::{Edge, VertIdx};

/// What a normalization pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Points appended by edge splitting. They follow the input points.
    pub split_points: usize,
    /// Indices (before compaction) of points folded into an earlier duplicate, ascending.
    pub merged: Vec<VertIdx>,
}

/// Check coordinates and edge endpoints before anything else touches them.
pub fn validate(points: &[Point], edges: &[Edge]) -> Result<()> {
    if let Some(index) = points
        .iter()
        .position(|p| !p[0].is_finite() || !p[1].is_finite())
    {
        return Err(TriangulationError::NonFiniteCoordinate { index });
    }
    for (edge, &[a, b]) in edges.iter().enumerate() {
        for vertex in [a, b] {
            if vertex as usize >= points.len() {
                return Err(TriangulationError::EdgeOutOfRange {
                    edge,
                    vertex,
                    len: points.len(),
                });
            }
        }
        if a == b {
            return Err(TriangulationError::SelfLoop { edge, vertex: a });
        }
    }
    Ok(())
}

/// Split every edge at the points where other edges meet its interior, and at
/// free points (referenced by no edge) lying exactly on it.
///
/// New points are appended to `points`. A split edge keeps its slot and first endpoint
/// and now ends at its first cut; the remaining pieces are appended to `edges` in
/// order along the edge. Returns the number of points added.
pub fn split_intersecting_edges(points: &mut Vec<Point>, edges: &mut Vec<Edge>) -> usize {
    let n = edges.len();
    let mut cuts: Vec<Vec<(Real, Point)>> = vec![Vec::new(); n];

    for i in 0..n {
        let (a, b) = (points[edges[i][0] as usize], points[edges[i][1] as usize]);
        for k in i + 1..n {
            let (c, d) = (points[edges[k][0] as usize], points[edges[k][1] as usize]);
            let hi = intersection_param(c, d, a, b);
            let hk = intersection_param(a, b, c, d);
            if !((0.0..=1.0).contains(&hi) && (0.0..=1.0).contains(&hk)) {
                continue;
            }
            let p = lerp(a, b, hi);
            if hi > 0.0 && hi < 1.0 {
                cuts[i].push((hi, p));
            }
            if hk > 0.0 && hk < 1.0 {
                cuts[k].push((hk, p));
            }
        }
    }

    let mut referenced = vec![false; points.len()];
    for &[a, b] in edges.iter() {
        referenced[a as usize] = true;
        referenced[b as usize] = true;
    }
    for (v, &p) in points.iter().enumerate() {
        if referenced[v] {
            continue;
        }
        for (ei, &[a, b]) in edges.iter().enumerate() {
            if let Some(t) = param_on_segment(p, points[a as usize], points[b as usize]) {
                cuts[ei].push((t, p));
            }
        }
    }

    let before = points.len();
    for (ei, mut along) in cuts.into_iter().enumerate() {
        if along.is_empty() {
            continue;
        }
        along.sort_by(|x, y| x.0.total_cmp(&y.0));
        along.dedup_by(|x, y| x.0 == y.0);

        let end = edges[ei][1];
        let first = points.len() as VertIdx;
        points.extend(along.iter().map(|&(_, p)| p));
        let last = points.len() as VertIdx - 1;

        edges[ei][1] = first;
        edges.extend((first..last).map(|v| [v, v + 1]));
        edges.push([last, end]);
    }

    let added = points.len() - before;
    if added > 0 {
        tracing::debug!(added, edges = edges.len(), "split intersecting edges");
    }
    added
}

/// Parameter of `p` along segment ab when `p` lies exactly on its interior.
fn param_on_segment(p: Point, a: Point, b: Point) -> Option<Real> {
    if orient(a, b, p) != 0.0 {
        return None;
    }
    let d = [b[0] - a[0], b[1] - a[1]];
    let t = ((p[0] - a[0]) * d[0] + (p[1] - a[1]) * d[1]) / (d[0] * d[0] + d[1] * d[1]);
    (t > 0.0 && t < 1.0).then_some(t)
}

/// Fold points with identical coordinates into the lowest-indexed copy.
///
/// Edges are rewritten to the surviving indices and the point buffer is compacted.
/// Edges that collapse to a single point are dropped; duplicate edges are kept.
/// Returns the removed indices (in the numbering before compaction), ascending.
pub fn merge_duplicate_points(points: &mut Vec<Point>, edges: &mut Vec<Edge>) -> Vec<VertIdx> {
    // -0.0 and 0.0 compare equal, so both map to the same key
    let key = |p: Point| ((p[0] + 0.0).to_bits(), (p[1] + 0.0).to_bits());

    let mut first_seen: AHashMap<(u64, u64), VertIdx> = AHashMap::with_capacity(points.len());
    let mut remap: Vec<VertIdx> = Vec::with_capacity(points.len());
    let mut removed = Vec::new();
    let mut compacted = 0;
    for (k, &p) in points.iter().enumerate() {
        match first_seen.get(&key(p)) {
            Some(&kept) => {
                remap.push(remap[kept as usize]);
                removed.push(k as VertIdx);
            }
            None => {
                first_seen.insert(key(p), k as VertIdx);
                remap.push(compacted);
                compacted += 1;
            }
        }
    }
    if removed.is_empty() {
        return removed;
    }

    let mut next_removed = removed.iter().peekable();
    let mut k = 0;
    points.retain(|_| {
        let drop = next_removed.next_if(|&&r| r == k).is_some();
        k += 1;
        !drop
    });

    for e in edges.iter_mut() {
        *e = [remap[e[0] as usize], remap[e[1] as usize]];
    }
    edges.retain(|e| e[0] != e[1]);

    tracing::debug!(merged = removed.len(), points = points.len(), "merged duplicate points");
    removed
}

/// Validate, then split and merge as requested, in place.
pub fn normalize_in_place(
    points: &mut Vec<Point>,
    edges: &mut Vec<Edge>,
    split: bool,
    merge: bool,
) -> Result<NormalizeReport> {
    validate(points, edges)?;
    let split_points = if split {
        split_intersecting_edges(points, edges)
    } else {
        0
    };
    let merged = if merge {
        merge_duplicate_points(points, edges)
    } else {
        Vec::new()
    };
    Ok(NormalizeReport {
        split_points,
        merged,
    })
}
