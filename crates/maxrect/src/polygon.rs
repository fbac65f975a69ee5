//! Simple polygon ring (no holes) with the validation the search relies on.
//!
//! Conventions
//! - Vertices are stored without a repeated closing vertex; the last vertex is
//!   implicitly joined to the first.
//! - Orientation is preserved as given (CW or CCW); nothing downstream depends on it.
//! - Self-intersection is not checked. The oracle assumes a simple ring and
//!   callers are expected to supply one.

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::error::RectError;
use crate::kernel::{cross, distance, shoelace_area};

/// Validated simple polygon.
///
/// Invariants:
/// - At least 3 vertices, no two consecutive vertices coincide (within `eps_dedup`).
/// - All coordinates are finite.
/// - Non-zero perimeter and non-zero enclosed area.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Validate a ring with default tolerances.
    pub fn new(verts: Vec<Vector2<f64>>) -> Result<Self, RectError> {
        Self::with_cfg(verts, GeomCfg::default())
    }

    /// Convenience constructor from `(x, y)` tuples.
    pub fn from_xy(pts: &[(f64, f64)]) -> Result<Self, RectError> {
        Self::new(pts.iter().map(|&(x, y)| Vector2::new(x, y)).collect())
    }

    /// Validate a ring: drop the closing vertex and consecutive duplicates, then
    /// reject anything that cannot enclose area.
    pub fn with_cfg(mut verts: Vec<Vector2<f64>>, cfg: GeomCfg) -> Result<Self, RectError> {
        if verts.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(RectError::degenerate("non-finite vertex coordinate"));
        }
        verts.dedup_by(|a, b| (*a - *b).norm() <= cfg.eps_dedup);
        while verts.len() > 1 {
            let first = verts[0];
            let last = verts[verts.len() - 1];
            if (first - last).norm() <= cfg.eps_dedup {
                verts.pop();
            } else {
                break;
            }
        }
        if verts.len() < 3 {
            return Err(RectError::degenerate(format!(
                "need at least 3 distinct vertices, got {}",
                verts.len()
            )));
        }
        let poly = Self { verts };
        let perimeter = poly.perimeter();
        if !(perimeter > 0.0) {
            return Err(RectError::degenerate("zero-length perimeter"));
        }
        let ext = poly.extension_length();
        if poly.signed_area().abs() <= cfg.eps_boundary * ext * ext {
            return Err(RectError::degenerate("vertices are collinear (zero area)"));
        }
        Ok(poly)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Edges `(v_k, v_{k+1})`, including the wrap-around edge back to `v_0`.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        let n = self.verts.len();
        (0..n).map(move |k| (self.verts[k], self.verts[(k + 1) % n]))
    }

    /// Axis-aligned bounds `(min, max)`.
    pub fn bounds(&self) -> (Vector2<f64>, Vector2<f64>) {
        let init = (
            Vector2::new(f64::INFINITY, f64::INFINITY),
            Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        self.verts.iter().fold(init, |(lo, hi), p| {
            (
                Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        })
    }

    /// Diagonal of the bounding box: an upper bound on any segment inside the polygon,
    /// hence on any achievable rectangle side.
    pub fn extension_length(&self) -> f64 {
        let (lo, hi) = self.bounds();
        distance(lo, hi)
    }

    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| distance(a, b)).sum()
    }

    /// Shoelace area, positive for CCW rings.
    pub fn signed_area(&self) -> f64 {
        shoelace_area(&self.verts)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// True if every turn has the same sign (collinear vertices allowed) and the
    /// ring winds exactly once.
    ///
    /// The winding check rejects star polygons like the pentagram, whose turns
    /// all agree in sign but whose total turning is 4π.
    pub fn is_convex(&self) -> bool {
        let n = self.verts.len();
        let scale = self.extension_length();
        let eps = 1e-12 * scale * scale;
        let mut sign = 0.0f64;
        let mut turning = 0.0f64;
        for k in 0..n {
            let a = self.verts[k];
            let b = self.verts[(k + 1) % n];
            let c = self.verts[(k + 2) % n];
            let z = cross(a, b, c);
            if z.abs() > eps {
                if sign == 0.0 {
                    sign = z.signum();
                } else if z.signum() != sign {
                    return false;
                }
            }
            let u = b - a;
            let v = c - b;
            turning += (u.x * v.y - u.y * v.x).atan2(u.dot(&v));
        }
        (turning.abs() - std::f64::consts::TAU).abs() < 1e-6
    }
}
