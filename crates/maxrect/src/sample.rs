//! Boundary resampling at fixed arc-length spacing.
//!
//! Walk each edge (including the wrap-around edge) from its start vertex and
//! emit points at exact multiples of `point_gap`, then the terminal vertex
//! itself. Vertices are never lost, spacing inside an edge is exactly
//! `point_gap`, and only the last sub-segment before each vertex may be short.
//! The returned sequence starts at `v_0` and closes back onto it.

use nalgebra::Vector2;

use crate::error::RectError;
use crate::kernel::{azimuth, distance, increment};
use crate::polygon::Polygon;

/// Relative slack under which an interior point is treated as landing on the
/// edge's terminal vertex (and therefore not emitted twice).
const VERTEX_SNAP: f64 = 1e-9;

/// Ceiling on the number of boundary samples a single call may produce.
/// Gaps that would exceed it are rejected instead of allocated.
pub const MAX_SAMPLES: f64 = 1e8;

/// Dense boundary sample of `polygon` with spacing `point_gap`.
///
/// Smaller gaps raise density linearly and search cost quadratically. Gaps
/// needing more than `MAX_SAMPLES` points fail with `InvalidParams`.
pub fn resample_boundary(polygon: &Polygon, point_gap: f64) -> Result<Vec<Vector2<f64>>, RectError> {
    check_point_gap(point_gap)?;
    let verts = polygon.vertices();
    let expected = polygon.perimeter() / point_gap + verts.len() as f64;
    if !expected.is_finite() || expected > MAX_SAMPLES {
        return Err(RectError::invalid(format!(
            "point_gap {point_gap} needs ~{expected:.3e} boundary samples (limit {MAX_SAMPLES:e})"
        )));
    }
    let mut out = Vec::with_capacity((expected.ceil() as usize).saturating_add(1));
    out.push(verts[0]);
    for (v1, v2) in polygon.edges() {
        let len = distance(v1, v2);
        if len > 0.0 {
            let diff = increment(azimuth(v1, v2), point_gap);
            let count = (len / point_gap).floor() as usize;
            for k in 1..=count {
                // the final multiple may sit on v2 itself when len is a multiple of point_gap
                if (k as f64) * point_gap >= len * (1.0 - VERTEX_SNAP) {
                    break;
                }
                out.push(v1 + diff * (k as f64));
            }
        }
        out.push(v2);
    }
    Ok(out)
}

pub(crate) fn check_point_gap(point_gap: f64) -> Result<(), RectError> {
    if !(point_gap.is_finite() && point_gap > 0.0) {
        return Err(RectError::invalid(format!(
            "point_gap must be finite and > 0, got {point_gap}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::cross;
    use nalgebra::vector;
    use proptest::prelude::*;

    fn rect_2x1() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn exact_multiples_do_not_duplicate_vertices() {
        let pts = resample_boundary(&rect_2x1(), 0.5).unwrap();
        // 4 + 2 + 4 + 2 segments, plus the closing copy of v0
        assert_eq!(pts.len(), 13);
        assert_eq!(pts[0], pts[pts.len() - 1]);
        for w in pts.windows(2) {
            assert!((distance(w[0], w[1]) - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn short_tail_before_each_vertex() {
        let poly = rect_2x1();
        let pts = resample_boundary(&poly, 0.3).unwrap();
        for v in poly.vertices() {
            assert!(pts.iter().any(|p| p == v), "vertex {v:?} missing");
        }
        // bottom edge: 0.3 .. 1.8 then the vertex at 2.0
        assert!((pts[6] - vector![1.8, 0.0]).norm() < 1e-12);
        assert_eq!(pts[7], vector![2.0, 0.0]);
        for w in pts.windows(2) {
            assert!(distance(w[0], w[1]) <= 0.3 + 1e-12);
        }
    }

    #[test]
    fn coarse_gap_keeps_only_vertices() {
        let pts = resample_boundary(&rect_2x1(), 10.0).unwrap();
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn invalid_gap_rejected() {
        for gap in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                resample_boundary(&rect_2x1(), gap),
                Err(RectError::InvalidParams { .. })
            ));
        }
    }

    #[test]
    fn vanishing_gap_rejected_before_allocating() {
        // finite and positive, but perimeter / gap overflows any usize
        for gap in [1e-300, f64::MIN_POSITIVE, 6.0 / MAX_SAMPLES * 0.5] {
            assert!(matches!(
                resample_boundary(&rect_2x1(), gap),
                Err(RectError::InvalidParams { .. })
            ));
        }
        // just under the ceiling still samples
        assert!(resample_boundary(&rect_2x1(), 1e-3).is_ok());
    }

    proptest! {
        #[test]
        fn samples_lie_on_edges_in_order(
            w in 0.5f64..4.0,
            h in 0.5f64..4.0,
            skew in -1.0f64..1.0,
            gap in 0.05f64..0.7,
        ) {
            let poly = Polygon::from_xy(&[(0.0, 0.0), (w, 0.0), (w + skew, h), (skew, h)]).unwrap();
            let pts = resample_boundary(&poly, gap).unwrap();
            for v in poly.vertices() {
                prop_assert!(pts.iter().any(|p| p == v));
            }
            for pair in pts.windows(2) {
                let step = distance(pair[0], pair[1]);
                prop_assert!(step <= gap * (1.0 + 1e-9));
                prop_assert!(step > 0.0);
            }
            // every sample is on some edge
            for p in &pts {
                let on_edge = poly.edges().any(|(a, b)| {
                    let t = (p - a).dot(&(b - a)) / (b - a).norm_squared();
                    (-1e-9..=1.0 + 1e-9).contains(&t) && cross(a, b, *p).abs() < 1e-9
                });
                prop_assert!(on_edge);
            }
        }
    }
}
