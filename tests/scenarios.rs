// Copyright 2025 Lars Brubaker
// End-to-end scenarios: simple squares, holes, crossing constraints and
// coincident input points.

mod helpers;

use approx::assert_relative_eq;
use sweep_cdt::{normalize, triangulate, TriOption, Triangulator};

#[test]
fn unit_square_two_triangles() {
    let pts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let edges = [[0, 1], [1, 2], [2, 3], [3, 0]];
    let out = triangulate(&pts, &edges).unwrap();
    helpers::verify_all(&out);
    assert_eq!(out.triangle_count(), 2);
    assert_relative_eq!(out.area(), 1.0);
}

#[test]
fn square_with_square_hole() {
    let mut tri = Triangulator::new();
    tri.add_contour(&[[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]]);
    tri.add_contour(&[[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]);
    let out = tri.triangulate().unwrap();
    helpers::verify_all(&out);
    assert_eq!(out.triangle_count(), 8);
    assert_relative_eq!(out.area(), 8.0);

    // nothing survives inside the hole, and each hole edge bounds one triangle
    let hole: Vec<_> = [[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]]
        .iter()
        .map(|&p| helpers::find_point(&out, p).unwrap())
        .collect();
    for k in 0..4 {
        let (a, b) = (hole[k], hole[(k + 1) % 4]);
        assert_eq!(helpers::triangles_on_edge(&out, a, b), 1);
    }
    for t in out.triangles() {
        assert!(!t.iter().all(|v| hole.contains(v)), "triangle {:?} fills the hole", t);
    }
}

#[test]
fn hole_given_clockwise_or_counter_clockwise() {
    for reverse in [false, true] {
        let mut hole = vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 2.0]];
        if reverse {
            hole.reverse();
        }
        let mut tri = Triangulator::new();
        tri.add_contour(&[[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]]);
        tri.add_contour(&hole);
        let out = tri.triangulate().unwrap();
        assert_relative_eq!(out.area(), 8.0);
    }
}

#[test]
fn crossing_edge_is_replaced_by_three_pieces() {
    let pts = [
        [1.0, 0.0],
        [1.0, 3.0],
        [2.0, 0.0],
        [2.0, 3.0],
        [0.0, 1.0],
        [3.0, 2.0],
    ];
    let edges = [[0, 1], [2, 3], [4, 5]];
    let (points, split) = normalize(&pts, &edges).unwrap();
    assert_eq!(points.len(), 8);
    assert!(!split.contains(&[4, 5]) && !split.contains(&[5, 4]));

    let p6 = points[6];
    let p7 = points[7];
    for piece in [[4, 6], [6, 7], [7, 5]] {
        assert!(split.contains(&piece), "missing {:?}", piece);
    }
    // the pieces are collinear with the original edge
    for p in [p6, p7] {
        assert_relative_eq!(
            helpers::triangle_area(pts[4], pts[5], p),
            0.0,
            epsilon = 1e-12
        );
    }

    // and all of them end up in the mesh
    let mut tri = Triangulator::new();
    tri.add_points(&pts);
    for [a, b] in edges {
        tri.add_edge(a, b);
    }
    tri.set_option(TriOption::DiscardExterior, false);
    let out = tri.triangulate().unwrap();
    helpers::verify_all(&out);
    assert_eq!(out.constraint_edges().len(), 7);
}

#[test]
fn coincident_points_share_one_index() {
    let pts = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [2.0, 0.0]];
    let edges = [[0, 1], [4, 2], [2, 3], [3, 0]];
    let (points, merged) = normalize(&pts, &edges).unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(merged, vec![[0, 1], [1, 2], [2, 3], [3, 0]]);

    let out = triangulate(&pts, &edges).unwrap();
    helpers::verify_all(&out);
    assert_eq!(out.vertex_count(), 6);
    assert_relative_eq!(out.area(), 4.0);
    let corner = helpers::find_point(&out, [2.0, 0.0]).unwrap();
    assert_eq!(out.source_index(corner), Some(1));
}

#[test]
fn overlapping_squares_keep_the_symmetric_difference() {
    for dx in 1..=3 {
        for dy in 1..=3 {
            let (x, y) = (dx as f64, dy as f64);
            let mut tri = Triangulator::new();
            tri.add_contour(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
            tri.add_contour(&[[x, y], [4.0 + x, y], [4.0 + x, 4.0 + y], [x, 4.0 + y]]);
            let out = tri.triangulate().unwrap();
            helpers::verify_all(&out);
            let overlap = (4.0 - x) * (4.0 - y);
            assert_relative_eq!(out.area(), 32.0 - 2.0 * overlap, epsilon = 1e-9);
            // two crossing points were added
            assert_eq!(out.vertex_count(), 12);
        }
    }
}
