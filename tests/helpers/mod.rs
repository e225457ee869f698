// Copyright 2025 Lars Brubaker
// Shared test utilities for sweep-cdt tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use sweep_cdt::{Point, Real, Result, Triangulation, Triangulator, VertIdx};

/// Parse the `.dat` fixture format: one vertex per line as `x y` or `x, y`.
/// Blank lines separate contours.
pub fn parse_contours(data: &str) -> Vec<Vec<Point>> {
    let mut contours: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                contours.push(std::mem::take(&mut current));
            }
            continue;
        }
        let values: Vec<Real> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse::<Real>().ok())
            .collect();
        if let [x, y] = values[..] {
            current.push([x, y]);
        }
    }
    if !current.is_empty() {
        contours.push(current);
    }
    contours
}

/// Triangulate closed contours with default options.
pub fn triangulate_contours(contours: &[Vec<Point>]) -> Result<Triangulation> {
    let mut tri = Triangulator::new();
    for contour in contours {
        tri.add_contour(contour);
    }
    tri.triangulate()
}

/// Signed area of a closed polygon, positive when counter-clockwise.
pub fn polygon_area(poly: &[Point]) -> Real {
    let n = poly.len();
    (0..n)
        .map(|k| {
            let (p, q) = (poly[k], poly[(k + 1) % n]);
            p[0] * q[1] - q[0] * p[1]
        })
        .sum::<Real>()
        * 0.5
}

/// Signed area of a triangle.
pub fn triangle_area(a: Point, b: Point, c: Point) -> Real {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

/// Every triangle indexes valid points, has distinct vertices and positive area.
pub fn verify_valid_output(out: &Triangulation) {
    let n = out.points().len();
    for t in out.triangles() {
        for &v in t {
            assert!((v as usize) < n, "triangle {:?} indexes past {} points", t, n);
        }
        assert!(t[0] != t[1] && t[1] != t[2] && t[0] != t[2], "repeated vertex in {:?}", t);
        let [a, b, c] = t.map(|v| out.points()[v as usize]);
        assert!(
            triangle_area(a, b, c) > 0.0,
            "triangle {:?} is not counter-clockwise",
            t
        );
    }
}

/// No two triangles share a vertex set.
pub fn verify_unique(out: &Triangulation) {
    let mut seen = HashSet::new();
    for t in out.triangles() {
        let mut key = *t;
        key.sort_unstable();
        assert!(seen.insert(key), "triangle {:?} appears twice", t);
    }
}

/// Directed edge -> apex over the output triangles. Panics if two triangles claim
/// the same directed edge, which would mean they overlap.
pub fn directed_edges(out: &Triangulation) -> HashMap<(VertIdx, VertIdx), VertIdx> {
    let mut apex = HashMap::new();
    for &[a, b, c] in out.triangles() {
        for (e, o) in [((a, b), c), ((b, c), a), ((c, a), b)] {
            assert!(
                apex.insert(e, o).is_none(),
                "directed edge {:?} used by two triangles",
                e
            );
        }
    }
    apex
}

/// Triangles sharing an undirected edge sit on opposite sides of it.
pub fn verify_adjacency_duality(out: &Triangulation) {
    let apex = directed_edges(out);
    for (&(a, b), &c) in &apex {
        if let Some(&d) = apex.get(&(b, a)) {
            assert_ne!(c, d, "edge ({}, {}) has the same apex on both sides", a, b);
            assert_eq!(apex.get(&(c, a)), Some(&b));
            assert_eq!(apex.get(&(a, d)), Some(&b));
        }
    }
}

/// Every normalized constraint edge borders at least one output triangle.
pub fn verify_constraints_present(out: &Triangulation) {
    let apex = directed_edges(out);
    for &[a, b] in out.constraint_edges() {
        assert!(
            apex.contains_key(&(a, b)) || apex.contains_key(&(b, a)),
            "constraint edge ({}, {}) missing from the output",
            a,
            b
        );
    }
}

/// Number of output triangles having (a, b) as an edge.
pub fn triangles_on_edge(out: &Triangulation, a: VertIdx, b: VertIdx) -> usize {
    out.triangles()
        .iter()
        .filter(|t| t.contains(&a) && t.contains(&b))
        .count()
}

/// Output index of the point with the given coordinates.
pub fn find_point(out: &Triangulation, p: Point) -> Option<VertIdx> {
    out.points().iter().position(|&q| q == p).map(|k| k as VertIdx)
}

/// All structural checks in one go.
pub fn verify_all(out: &Triangulation) {
    verify_valid_output(out);
    verify_unique(out);
    verify_adjacency_duality(out);
    verify_constraints_present(out);
}

/// Star-shaped polygon around the origin: vertex `k` at angle `2πk/n + jitter[k]`
/// and distance `radii[k]`, counter-clockwise.
pub fn star_polygon(jitter: &[Real], radii: &[Real]) -> Vec<Point> {
    let n = radii.len();
    let step = 2.0 * std::f64::consts::PI / n as Real;
    (0..n)
        .map(|k| {
            let a = step * k as Real + jitter[k] * step;
            [radii[k] * a.cos(), radii[k] * a.sin()]
        })
        .collect()
}

/// Regular polygon with `m` vertices and circumradius `r`, rotated by 0.1 rad.
pub fn regular_polygon(m: usize, r: Real) -> Vec<Point> {
    let step = 2.0 * std::f64::consts::PI / m as Real;
    (0..m)
        .map(|k| {
            let a = step * k as Real + 0.1;
            [r * a.cos(), r * a.sin()]
        })
        .collect()
}
