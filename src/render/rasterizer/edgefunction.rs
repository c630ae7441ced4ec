//! Edge functions and the area-sum inside test.
//!
//! # Edge Function
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product (B - A) x (P - A), twice the signed area of
//! the triangle ABP. For a triangle (V0, V1, V2):
//!
//! ```text
//! e0 = E(V1, V2, P)    e1 = E(V2, V0, P)    e2 = E(V0, V1, P)
//! A  = E(V0, V1, V2) = e0 + e1 + e2
//! ```
//!
//! # Inside Test
//!
//! P is inside when the three sub-areas add up to the whole triangle without
//! cancelling, i.e. `|e0| + |e1| + |e2| == |A|`. That holds exactly when every
//! `e_i` is zero or has the sign of `A`, so both windings work and pixels on
//! an edge or vertex are included. Screen points are whole pixels, so the
//! sums are evaluated in integers and the test has no rounding slack: two
//! triangles sharing an edge both claim the pixels on it, and the depth test
//! decides which one is kept.
//!
//! A zero-area triangle has no inside. Every pixel is rejected.

use super::ScreenPoint;

/// Twice the signed area of triangle (`a`, `b`, `p`).
#[inline]
pub fn edge_function(a: ScreenPoint, b: ScreenPoint, p: ScreenPoint) -> i64 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Returns the barycentric weights `[w0, w1, w2]` of `p` if it lies inside the
/// triangle, or `None` if it lies outside or the triangle has no area.
///
/// The weights are each in `[0, 1]` and sum to `1` up to rounding.
#[inline]
pub fn barycentric(points: &[ScreenPoint; 3], p: ScreenPoint) -> Option<[f32; 3]> {
    let [v0, v1, v2] = *points;

    let area = edge_function(v0, v1, v2);
    if area == 0 {
        return None;
    }

    let e0 = edge_function(v1, v2, p);
    let e1 = edge_function(v2, v0, p);
    let e2 = edge_function(v0, v1, p);

    if e0.abs() + e1.abs() + e2.abs() != area.abs() {
        return None;
    }

    let area = area as f32;
    Some([e0 as f32 / area, e1 as f32 / area, e2 as f32 / area])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: i64, y: i64) -> ScreenPoint {
        ScreenPoint { x, y }
    }

    #[test]
    fn test_edge_function_sign() {
        let a = pt(0, 0);
        let b = pt(4, 0);
        assert!(edge_function(a, b, pt(2, 3)) > 0);
        assert!(edge_function(a, b, pt(2, -3)) < 0);
        assert_eq!(edge_function(a, b, pt(7, 0)), 0);
    }

    #[test]
    fn test_both_windings_agree() {
        let cw = [pt(2, 0), pt(3, 3), pt(0, 3)];
        let ccw = [pt(2, 0), pt(0, 3), pt(3, 3)];
        for y in -1..5 {
            for x in -1..5 {
                let p = pt(x, y);
                assert_eq!(barycentric(&cw, p).is_some(), barycentric(&ccw, p).is_some());
            }
        }
    }

    #[test]
    fn test_edges_and_vertices_are_inside() {
        let tri = [pt(0, 0), pt(6, 0), pt(0, 6)];
        // Vertices.
        assert_eq!(barycentric(&tri, pt(0, 0)), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(&tri, pt(6, 0)), Some([0.0, 1.0, 0.0]));
        // On the hypotenuse and on the axis edges.
        assert!(barycentric(&tri, pt(3, 3)).is_some());
        assert!(barycentric(&tri, pt(3, 0)).is_some());
        assert!(barycentric(&tri, pt(0, 5)).is_some());
        // Just outside.
        assert!(barycentric(&tri, pt(4, 3)).is_none());
        assert!(barycentric(&tri, pt(-1, 0)).is_none());
    }

    #[test]
    fn test_weights_are_valid_wherever_inside() {
        let tri = [pt(1, 2), pt(17, 5), pt(6, 14)];
        let mut inside = 0;
        for y in 0..16 {
            for x in 0..20 {
                if let Some(w) = barycentric(&tri, pt(x, y)) {
                    inside += 1;
                    for wi in w {
                        assert!((0.0..=1.0).contains(&wi), "weight {wi} at ({x}, {y})");
                    }
                    assert_abs_diff_eq!(w[0] + w[1] + w[2], 1.0, epsilon = 1e-6);
                }
            }
        }
        assert!(inside > 0);
    }

    #[test]
    fn test_shared_edge_has_no_gaps() {
        // Two halves of a square split along its diagonal.
        let upper = [pt(0, 0), pt(8, 0), pt(8, 8)];
        let lower = [pt(0, 0), pt(8, 8), pt(0, 8)];
        for y in 0..=8 {
            for x in 0..=8 {
                let p = pt(x, y);
                let hits = [&upper, &lower]
                    .iter()
                    .filter(|tri| barycentric(tri, p).is_some())
                    .count();
                let expected = if x == y { 2 } else { 1 };
                assert_eq!(hits, expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_degenerate_triangle_covers_nothing() {
        let line = [pt(0, 0), pt(2, 2), pt(4, 4)];
        let point = [pt(3, 3), pt(3, 3), pt(3, 3)];
        for y in 0..5 {
            for x in 0..5 {
                assert!(barycentric(&line, pt(x, y)).is_none());
                assert!(barycentric(&point, pt(x, y)).is_none());
            }
        }
    }
}
