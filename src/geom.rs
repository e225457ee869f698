// Copyright 2025 Lars Brubaker
// License: MIT
//
// Geometric predicates used by every stage of the triangulator.
//
// All functions are pure and operate on plain `[Real; 2]` coordinates. They use
// ordinary floating-point arithmetic; callers must not rely on exact results for
// nearly degenerate configurations.

pub type Real = f64;

/// A 2D coordinate `[x, y]`.
pub type Point = [Real; 2];

/// Twice the signed area of triangle (a, b, c).
/// Positive when the points turn counter-clockwise, negative when clockwise,
/// zero when collinear.
#[inline]
pub fn orient(a: Point, b: Point, c: Point) -> Real {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Returns true if (a, b, c) make a strict counter-clockwise turn.
#[inline]
pub fn is_ccw(a: Point, b: Point, c: Point) -> bool {
    orient(a, b, c) > 0.0
}

/// Signed area of triangle (a, b, c).
#[inline]
pub fn signed_area(a: Point, b: Point, c: Point) -> Real {
    0.5 * orient(a, b, c)
}

/// Linear interpolation between `a` (t = 0) and `b` (t = 1).
#[inline]
pub fn lerp(a: Point, b: Point, t: Real) -> Point {
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
}

/// Intercept of the line through (a, b) on segment (c, d).
///
/// Returns the parameter `h` such that `c + h * (d - c)` lies on line (a, b):
/// 0 at `c`, 1 at `d`, values in (0, 1) strictly inside the segment.
/// Parallel lines give `Real::INFINITY`.
pub fn intersection_param(a: Point, b: Point, c: Point, d: Point) -> Real {
    let e = [b[0] - a[0], b[1] - a[1]];
    let f = [d[0] - c[0], d[1] - c[1]];
    // perpendicular to (a, b)
    let p = [-e[1], e[0]];
    let denom = f[0] * p[0] + f[1] * p[1];
    if denom == 0.0 {
        return Real::INFINITY;
    }
    ((a[0] - c[0]) * p[0] + (a[1] - c[1]) * p[1]) / denom
}

/// Returns true if segments (a, b) and (c, d) cross at a point interior to both.
/// Touching at an endpoint does not count.
pub fn segments_cross(a: Point, b: Point, c: Point, d: Point) -> bool {
    let h_ab = intersection_param(c, d, a, b);
    let h_cd = intersection_param(a, b, c, d);
    h_ab > 0.0 && h_ab < 1.0 && h_cd > 0.0 && h_cd < 1.0
}

/// Orthogonal projection of `p` onto the line through `a` and `b`.
/// If `a == b` the line is undefined and `a` is returned.
pub fn projection(a: Point, p: Point, b: Point) -> Point {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let len2 = ab[0] * ab[0] + ab[1] * ab[1];
    if len2 == 0.0 {
        return a;
    }
    let t = ((p[0] - a[0]) * ab[0] + (p[1] - a[1]) * ab[1]) / len2;
    lerp(a, b, t)
}

#[inline]
pub fn distance(a: Point, b: Point) -> Real {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
pub fn distance_to_line(p: Point, a: Point, b: Point) -> Real {
    let len = distance(a, b);
    if len == 0.0 {
        return distance(p, a);
    }
    orient(a, b, p).abs() / len
}

/// Distance from `p` to the closed segment (a, b).
pub fn point_on_segment_distance(p: Point, a: Point, b: Point) -> Real {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let len2 = ab[0] * ab[0] + ab[1] * ab[1];
    if len2 == 0.0 {
        return distance(p, a);
    }
    let t = ((p[0] - a[0]) * ab[0] + (p[1] - a[1]) * ab[1]) / len2;
    distance(p, lerp(a, b, t.clamp(0.0, 1.0)))
}

/// Cosine of the angle at `b` formed by `a`, `b`, `c`.
/// NaN when `b` coincides with `a` or `c`.
pub fn cosine(a: Point, b: Point, c: Point) -> Real {
    let u = [a[0] - b[0], a[1] - b[1]];
    let v = [c[0] - b[0], c[1] - b[1]];
    (u[0] * v[0] + u[1] * v[1]) / (u[0].hypot(u[1]) * v[0].hypot(v[1]))
}

/// Circumcenter of triangle (a, b, c), or `None` if the points are collinear.
pub fn circumcenter(a: Point, b: Point, c: Point) -> Option<Point> {
    let d = 2.0 * orient(a, b, c);
    if d == 0.0 {
        return None;
    }
    let bx = b[0] - a[0];
    let by = b[1] - a[1];
    let cx = c[0] - a[0];
    let cy = c[1] - a[1];
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    Some([a[0] + ux, a[1] + uy])
}

/// In-circle determinant: positive when `p` lies strictly inside the circumcircle
/// of the counter-clockwise triangle (a, b, c), negative outside, zero on it.
pub fn in_circle(p: Point, a: Point, b: Point, c: Point) -> Real {
    let adx = a[0] - p[0];
    let ady = a[1] - p[1];
    let bdx = b[0] - p[0];
    let bdy = b[1] - p[1];
    let cdx = c[0] - p[0];
    let cdy = c[1] - p[1];

    let ab_det = adx * bdy - bdx * ady;
    let bc_det = bdx * cdy - cdx * bdy;
    let ca_det = cdx * ady - adx * cdy;

    let a_lift = adx * adx + ady * ady;
    let b_lift = bdx * bdx + bdy * bdy;
    let c_lift = cdx * cdx + cdy * cdy;

    a_lift * bc_det + b_lift * ca_det + c_lift * ab_det
}
