//! Geometry kernel: bearings, displacement vectors, and signed areas in R².
//!
//! - `azimuth`: signed angle of a directed segment, measured from +x.
//! - `increment`: displacement of a given length along an angle.
//! - `shoelace_area`: signed area of a closed ring (CCW positive).
//!
//! Every routine is pure and allocation-free; callers own the points.

use std::f64::consts::PI;

use nalgebra::Vector2;

/// Signed angle of `p2 - p1` in (−π, π].
///
/// Pre: `p1 != p2`. For identical points `atan2(0, 0)` returns 0, which carries
/// no direction; the search never asks for it.
#[inline]
pub fn azimuth(p1: Vector2<f64>, p2: Vector2<f64>) -> f64 {
    let d = p2 - p1;
    let a = d.y.atan2(d.x);
    // atan2(-0.0, x < 0) lands on -π
    if a == -PI {
        PI
    } else {
        a
    }
}

/// Displacement `(cos θ · dist, sin θ · dist)`.
#[inline]
pub fn increment(angle: f64, dist: f64) -> Vector2<f64> {
    Vector2::new(angle.cos() * dist, angle.sin() * dist)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Vector2<f64>, q: Vector2<f64>) -> f64 {
    (q - p).norm()
}

/// z-component of `(b - a) × (c - a)`; positive when a→b→c turns left.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Signed shoelace area of the closed ring `pts` (first and last implicitly joined).
///
/// Positive for counterclockwise order. Fewer than 3 points yield 0.
pub fn shoelace_area(pts: &[Vector2<f64>]) -> f64 {
    if pts.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for k in 0..pts.len() {
        let p = pts[k];
        let q = pts[(k + 1) % pts.len()];
        acc += p.x * q.y - q.x * p.y;
    }
    0.5 * acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn azimuth_cardinal_directions() {
        let o = vector![0.0, 0.0];
        assert!(azimuth(o, vector![1.0, 0.0]).abs() < 1e-12);
        assert!((azimuth(o, vector![0.0, 1.0]) - FRAC_PI_2).abs() < 1e-12);
        assert!((azimuth(o, vector![1.0, 1.0]) - FRAC_PI_4).abs() < 1e-12);
        // (−π, π]: pointing along −x gives +π, not −π
        assert!((azimuth(o, vector![-1.0, 0.0]) - PI).abs() < 1e-12);
    }

    #[test]
    fn negative_zero_dy_stays_in_half_open_range() {
        let o = vector![0.0, 0.0];
        assert_eq!(azimuth(o, vector![-1.0, -0.0]), PI);
        assert_eq!(azimuth(vector![3.0, 0.0], vector![1.0, -0.0]), PI);
    }

    #[test]
    fn increment_axes_and_diagonal() {
        let e = increment(0.0, 2.0);
        assert!((e - vector![2.0, 0.0]).norm() < 1e-12);
        let n = increment(FRAC_PI_2, 3.0);
        assert!((n - vector![0.0, 3.0]).norm() < 1e-12);
        let d = increment(FRAC_PI_4, 2f64.sqrt());
        assert!((d - vector![1.0, 1.0]).norm() < 1e-12);
    }

    #[test]
    fn shoelace_orientation_sign() {
        let ccw = [
            vector![0.0, 0.0],
            vector![2.0, 0.0],
            vector![2.0, 1.0],
            vector![0.0, 1.0],
        ];
        assert!((shoelace_area(&ccw) - 2.0).abs() < 1e-12);
        let mut cw = ccw;
        cw.reverse();
        assert!((shoelace_area(&cw) + 2.0).abs() < 1e-12);
        assert_eq!(shoelace_area(&ccw[..2]), 0.0);
    }

    proptest! {
        #[test]
        fn increment_then_azimuth_recovers_bearing(
            x in -10.0f64..10.0,
            y in -10.0f64..10.0,
            theta in -3.1f64..3.1,
            dist in 0.01f64..5.0,
        ) {
            let p = vector![x, y];
            let q = p + increment(theta, dist);
            prop_assert!((azimuth(p, q) - theta).abs() < 1e-9);
            prop_assert!((distance(p, q) - dist).abs() < 1e-9);
        }
    }
}
