// Copyright 2025 Lars Brubaker
// Tests using polygon fixtures from tests/data.

mod helpers;

use approx::assert_relative_eq;
use sweep_cdt::Real;

/// Load a .dat file, triangulate it, verify the mesh and return (triangles, area).
fn run_dat_file(data: &str, label: &str) -> (usize, Real) {
    let contours = helpers::parse_contours(data);
    assert!(
        !contours.is_empty(),
        "{}: should parse at least one contour",
        label
    );
    let out = helpers::triangulate_contours(&contours)
        .unwrap_or_else(|e| panic!("{}: triangulation failed: {}", label, e));
    helpers::verify_all(&out);
    assert!(out.area() > 0.0, "{}: empty result", label);
    (out.triangle_count(), out.area())
}

fn contour_area(data: &str) -> Real {
    let contours = helpers::parse_contours(data);
    let outer = helpers::polygon_area(&contours[0]).abs();
    let holes: Real = contours[1..]
        .iter()
        .map(|c| helpers::polygon_area(c).abs())
        .sum();
    outer - holes
}

#[test]
fn comb() {
    let data = include_str!("data/comb.dat");
    let (tris, area) = run_dat_file(data, "comb");
    // simple polygon: n - 2 triangles
    assert_eq!(tris, 18);
    assert_relative_eq!(area, 34.0, epsilon = 1e-9);
}

#[test]
fn star_with_hole() {
    let data = include_str!("data/star_hole.dat");
    let (tris, area) = run_dat_file(data, "star_hole");
    // n + 2h - 2 with n = 14 boundary vertices and one hole
    assert_eq!(tris, 14);
    assert_relative_eq!(area, contour_area(data), epsilon = 1e-9);
}

#[test]
fn spiral() {
    let data = include_str!("data/spiral.dat");
    let (tris, area) = run_dat_file(data, "spiral");
    assert_eq!(tris, 78);
    assert_relative_eq!(area, contour_area(data), epsilon = 1e-9);
}

#[test]
fn self_intersecting_notched_outline() {
    // outline crosses itself, repeats a vertex and carries a square hole
    let data = include_str!("data/notched.dat");
    let contours = helpers::parse_contours(data);
    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0].len(), 15);

    let out = helpers::triangulate_contours(&contours).unwrap();
    helpers::verify_all(&out);
    assert_eq!(out.triangle_count(), 16);
    // 18 distinct input points, one crossing that is not an input vertex, and the synthetic pair
    assert_eq!(out.vertex_count(), 21);
    let unsourced = out.source_indices()[2..]
        .iter()
        .filter(|s| s.is_none())
        .count();
    assert_eq!(unsourced, 1);
    assert_relative_eq!(out.area(), 196.9090909090909, epsilon = 1e-9);
}

#[test]
fn parse_contours_accepts_commas_and_blank_lines() {
    let data = "0, 0\n1 0\n\n\n0 1\n  2,2  \n";
    let contours = helpers::parse_contours(data);
    assert_eq!(
        contours,
        vec![vec![[0.0, 0.0], [1.0, 0.0]], vec![[0.0, 1.0], [2.0, 2.0]]]
    );
}
