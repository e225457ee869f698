// Copyright 2025 Lars Brubaker
// License: MIT
//
// Public entry point: accumulate points and constraint edges, choose options,
// and run normalization plus the sweep to get a Triangulation.

mod output;

pub use output::Triangulation;

use crate::error::Result;
use crate::geom::{Point, Real};
use crate::mesh::{Edge, VertIdx};
use crate::preprocess::{normalize_in_place, NormalizeReport};
use crate::sweep::{Sweep, DEFAULT_MARGIN, SYNTHETIC_POINTS};

// ─────────────────────────────── Public types ──────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriOption {
    /// Split constraint edges where they cross or touch each other.
    SplitIntersections,
    /// Fold points with identical coordinates into one.
    MergeDuplicates,
    /// Close the convex gaps left along the hull after the sweep.
    FillHull,
    /// Drop triangles outside the constrained region. When off, the whole working
    /// mesh is returned, triangles on the synthetic points included.
    DiscardExterior,
}

// ─────────────────────────── Triangulator ──────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Triangulator {
    points: Vec<Point>,
    edges: Vec<Edge>,
    /// Input index behind each stored point, `None` for points created by splitting.
    sources: Vec<Option<usize>>,
    split_intersections: bool,
    merge_duplicates: bool,
    fill_hull: bool,
    discard_exterior: bool,
    margin: Real,
}

impl Triangulator {
    pub fn new() -> Self {
        Triangulator {
            points: Vec::new(),
            edges: Vec::new(),
            sources: Vec::new(),
            split_intersections: true,
            merge_duplicates: true,
            fill_hull: true,
            discard_exterior: true,
            margin: DEFAULT_MARGIN,
        }
    }

    pub fn set_option(&mut self, option: TriOption, value: bool) {
        match option {
            TriOption::SplitIntersections => self.split_intersections = value,
            TriOption::MergeDuplicates => self.merge_duplicates = value,
            TriOption::FillHull => self.fill_hull = value,
            TriOption::DiscardExterior => self.discard_exterior = value,
        }
    }

    pub fn option(&self, option: TriOption) -> bool {
        match option {
            TriOption::SplitIntersections => self.split_intersections,
            TriOption::MergeDuplicates => self.merge_duplicates,
            TriOption::FillHull => self.fill_hull,
            TriOption::DiscardExterior => self.discard_exterior,
        }
    }

    /// Synthetic-point margin as a fraction of the input extent.
    /// Non-positive and non-finite values are ignored.
    pub fn set_margin(&mut self, margin: Real) {
        if margin.is_finite() && margin > 0.0 {
            self.margin = margin;
        }
    }

    pub fn margin(&self) -> Real {
        self.margin
    }

    // ─────── Input ────────────────────────────────────────────────────────────

    pub fn add_point(&mut self, p: Point) -> VertIdx {
        let idx = self.points.len();
        self.points.push(p);
        self.sources.push(Some(idx));
        idx as VertIdx
    }

    /// Append `points`, returning the index of the first one.
    pub fn add_points(&mut self, points: &[Point]) -> VertIdx {
        let first = self.points.len();
        self.points.extend_from_slice(points);
        self.sources.extend((first..self.points.len()).map(Some));
        first as VertIdx
    }

    /// Add a constraint edge. Endpoints are checked when the input is normalized.
    pub fn add_edge(&mut self, a: VertIdx, b: VertIdx) {
        self.edges.push([a, b]);
    }

    /// Add a closed contour: its points plus an edge between each consecutive pair,
    /// last to first included. Two points give a single edge, fewer give none.
    pub fn add_contour(&mut self, contour: &[Point]) -> VertIdx {
        let first = self.add_points(contour);
        let n = contour.len() as VertIdx;
        match n {
            0 | 1 => {}
            2 => self.add_edge(first, first + 1),
            _ => {
                for k in 0..n {
                    self.add_edge(first + k, first + (k + 1) % n);
                }
            }
        }
        first
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // ─────── Processing ───────────────────────────────────────────────────────

    /// Validate, split and merge the accumulated input in place.
    pub fn normalize(&mut self) -> Result<()> {
        let report = normalize_in_place(
            &mut self.points,
            &mut self.edges,
            self.split_intersections,
            self.merge_duplicates,
        )?;
        track_sources(&mut self.sources, &report);
        Ok(())
    }

    /// Triangulate a copy of the accumulated input; `self` is left untouched.
    pub fn triangulate(&self) -> Result<Triangulation> {
        let _span = tracing::debug_span!(
            "triangulate",
            points = self.points.len(),
            edges = self.edges.len()
        )
        .entered();

        let mut points = self.points.clone();
        let mut edges = self.edges.clone();
        let mut sources = self.sources.clone();
        let report = normalize_in_place(
            &mut points,
            &mut edges,
            self.split_intersections,
            self.merge_duplicates,
        )?;
        track_sources(&mut sources, &report);

        if points.is_empty() {
            tracing::debug!("nothing to triangulate");
            return Ok(Triangulation::default());
        }

        let mut sweep = Sweep::new(&points, &edges, self.margin)?;
        sweep.sweep_points()?;
        let result = sweep.finish(self.fill_hull, self.discard_exterior)?;

        let mut out_sources = vec![None; SYNTHETIC_POINTS];
        out_sources.extend(result.order.iter().map(|&k| sources[k]));
        tracing::debug!(
            triangles = result.triangles.len(),
            vertices = result.points.len(),
            "triangulated"
        );
        Ok(Triangulation::new(
            result.points,
            result.triangles,
            result.constraints,
            out_sources,
        ))
    }
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Follow a normalization pass through the point-to-input mapping.
fn track_sources(sources: &mut Vec<Option<usize>>, report: &NormalizeReport) {
    sources.extend(std::iter::repeat(None).take(report.split_points));
    if report.merged.is_empty() {
        return;
    }
    let mut merged = report.merged.iter().peekable();
    let mut k: VertIdx = 0;
    sources.retain(|_| {
        let drop = merged.next_if(|&&r| r == k).is_some();
        k += 1;
        !drop
    });
}

// ─────────────────────────── Free functions ────────────────────────────────────

/// Split intersecting edges and merge duplicate points with default options.
pub fn normalize(points: &[Point], edges: &[Edge]) -> Result<(Vec<Point>, Vec<Edge>)> {
    let mut points = points.to_vec();
    let mut edges = edges.to_vec();
    normalize_in_place(&mut points, &mut edges, true, true)?;
    Ok((points, edges))
}

/// Triangulate the region bounded by `edges` with default options.
pub fn triangulate(points: &[Point], edges: &[Edge]) -> Result<Triangulation> {
    let mut tri = Triangulator::new();
    tri.add_points(points);
    for &[a, b] in edges {
        tri.add_edge(a, b);
    }
    tri.triangulate()
}
