//! Convex variant: resolve the interior side once, then clip two perpendicular rays.
//!
//! In a convex polygon the whole rectangle on a chord is inside as soon as its
//! four corners are, so the side is the shorter of the two perpendicular
//! extensions from the base endpoints.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

use crate::error::RectError;
use crate::kernel::{azimuth, distance, increment};
use crate::oracle::ContainmentOracle;

/// Direction (absolute angle) of the interior side of the base `p1 → p2`, if any.
///
/// Tries +90° first, then −90°. Each test point sits `tiny` off the base and `tiny`
/// along it towards the other endpoint; both points must be strictly inside
/// for the same rotation.
pub(crate) fn interior_direction<O: ContainmentOracle + ?Sized>(
    oracle: &O,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    tiny: f64,
) -> Option<f64> {
    let angle = azimuth(p1, p2);
    let along = increment(angle, tiny);
    [FRAC_PI_2, -FRAC_PI_2].into_iter().find_map(|turn| {
        let off = increment(angle + turn, tiny);
        let inside =
            oracle.contains_point(p1 + off + along) && oracle.contains_point(p2 + off - along);
        inside.then_some(angle + turn)
    })
}

/// Distance from `origin` to where the perpendicular ray first leaves the polygon.
///
/// Only the first clipped piece counts; a ray that starts outside yields 0.
fn crossing<O: ContainmentOracle + ?Sized>(
    oracle: &O,
    origin: Vector2<f64>,
    dir_angle: f64,
    tiny: f64,
    extension: f64,
) -> f64 {
    let dir = increment(dir_angle, 1.0);
    oracle
        .intersect_ray(origin, dir, tiny, extension)
        .first()
        .map_or(0.0, |piece| distance(origin, piece.end))
}

/// Achievable side and extension direction for base `p1 → p2`; `None` if the
/// interior side cannot be resolved.
pub(crate) fn extend_perpendicular<O: ContainmentOracle + ?Sized>(
    oracle: &O,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    extension: f64,
    tiny: f64,
) -> Option<(f64, f64)> {
    let dir = interior_direction(oracle, p1, p2, tiny)?;
    let left = crossing(oracle, p1, dir, tiny, extension);
    let right = crossing(oracle, p2, dir, tiny, extension);
    Some((left.min(right), dir))
}

/// Re-run the interior check and ray clipping for a winning base.
///
/// Fails with `AmbiguousOrientation` if neither rotation resolves, which means
/// search and reconstruction disagree numerically.
pub(crate) fn rederive<O: ContainmentOracle + ?Sized>(
    oracle: &O,
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    extension: f64,
    tiny: f64,
) -> Result<(f64, f64), RectError> {
    extend_perpendicular(oracle, p1, p2, extension, tiny).ok_or(RectError::AmbiguousOrientation {
        x1: p1.x,
        y1: p1.y,
        x2: p2.x,
        y2: p2.y,
    })
}
