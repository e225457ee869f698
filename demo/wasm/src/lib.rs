// Copyright 2025 Lars Brubaker
// WASM bindings for sweep-cdt

use sweep_cdt::{TriOption, Triangulation, Triangulator};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() {
    console_error_panic_hook::set_once();
}

/// Accumulates contours, points and edges, then triangulates them.
#[wasm_bindgen]
pub struct TriangulatorJs {
    inner: Triangulator,
    result: Option<Triangulation>,
    error: Option<String>,
}

#[wasm_bindgen]
impl TriangulatorJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TriangulatorJs {
        TriangulatorJs {
            inner: Triangulator::new(),
            result: None,
            error: None,
        }
    }

    /// Add a closed contour from a flat [x0,y0, x1,y1, ...] Float64Array.
    /// Returns the index of its first point.
    pub fn add_contour(&mut self, vertices: &[f64]) -> u32 {
        self.inner.add_contour(&pairs(vertices))
    }

    /// Add free points from a flat [x0,y0, ...] array. Returns the index of the first.
    pub fn add_points(&mut self, vertices: &[f64]) -> u32 {
        self.inner.add_points(&pairs(vertices))
    }

    /// Add constraint edges from a flat [a0,b0, a1,b1, ...] index array.
    pub fn add_edges(&mut self, edges: &[u32]) {
        for e in edges.chunks_exact(2) {
            self.inner.add_edge(e[0], e[1]);
        }
    }

    /// 0 = SplitIntersections 1 = MergeDuplicates 2 = FillHull 3 = DiscardExterior
    pub fn set_option(&mut self, option: u32, value: bool) {
        let opt = match option {
            0 => TriOption::SplitIntersections,
            1 => TriOption::MergeDuplicates,
            2 => TriOption::FillHull,
            3 => TriOption::DiscardExterior,
            _ => return,
        };
        self.inner.set_option(opt, value);
    }

    pub fn set_margin(&mut self, margin: f64) {
        self.inner.set_margin(margin);
    }

    /// Triangulate and return true on success. On failure see `last_error`.
    pub fn triangulate(&mut self) -> bool {
        match self.inner.triangulate() {
            Ok(out) => {
                self.result = Some(out);
                self.error = None;
                true
            }
            Err(e) => {
                self.result = None;
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.clone()
    }

    pub fn triangle_count(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.triangle_count() as u32)
    }

    pub fn vertex_count(&self) -> u32 {
        self.result.as_ref().map_or(0, |r| r.vertex_count() as u32)
    }

    /// Flat vertex positions [x0,y0, x1,y1, ...], synthetic points first.
    pub fn get_vertices(&self) -> Vec<f64> {
        self.result
            .as_ref()
            .map(Triangulation::flat_vertices)
            .unwrap_or_default()
    }

    /// Flat counter-clockwise index triples [i0,i1,i2, ...].
    pub fn get_triangles(&self) -> Vec<u32> {
        self.result
            .as_ref()
            .map(Triangulation::flat_triangles)
            .unwrap_or_default()
    }
}

impl Default for TriangulatorJs {
    fn default() -> Self {
        Self::new()
    }
}

fn pairs(flat: &[f64]) -> Vec<[f64; 2]> {
    flat.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

/// Convenience: triangulate several closed contours given as one flat coordinate
/// array plus the number of points in each contour. Returns the index triples,
/// or an empty array on failure.
#[wasm_bindgen]
pub fn triangulate_contours(vertices: &[f64], counts: &[u32]) -> Vec<u32> {
    let mut t = TriangulatorJs::new();
    let mut start = 0usize;
    for &n in counts {
        let end = (start + 2 * n as usize).min(vertices.len());
        t.add_contour(&vertices[start..end]);
        start = end;
    }
    if !t.triangulate() {
        return Vec::new();
    }
    t.get_triangles()
}
