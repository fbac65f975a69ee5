//! Containment oracle: the point/segment/ray queries the rectangle search asks of a polygon.
//!
//! Purpose
//! - Isolate every "is this inside?" decision behind one trait so search code
//!   never touches polygon internals.
//! - Fix the ordering of multi-part ray clips (closest part first), so the
//!   convex variant's "first part" rule is a contract, not an accident.
//!
//! Implementation (`GeoOracle`)
//! - Strict point containment uses `geo::Contains`, minus an `eps` band around
//!   the boundary so near-boundary queries never count as interior.
//! - Segment coverage and ray clipping split the query segment at every edge
//!   contact (`geo::line_intersection`) and classify each sub-segment by its
//!   midpoint. Between two consecutive contacts a sub-segment cannot cross the
//!   boundary, so one midpoint decides the whole piece. Vertices within `eps`
//!   of the query count as contacts too, so a query running along an edge a
//!   hair outside it still splits at the edge's end.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Contains, Coord, EuclideanDistance, Line, LineString, Point};
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::polygon::Polygon;

/// A connected part of a ray inside the polygon, ordered along the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayPiece {
    pub start: Vector2<f64>,
    pub end: Vector2<f64>,
}

/// Queries the search needs. Implementations must be deterministic.
pub trait ContainmentOracle {
    /// Strict interior containment; points on the boundary return false.
    fn contains_point(&self, p: Vector2<f64>) -> bool;

    /// True if no point of segment `p1`–`p2` lies outside the polygon
    /// (touching or running along the boundary is allowed).
    fn contains_segment(&self, p1: Vector2<f64>, p2: Vector2<f64>) -> bool;

    /// Clip the segment `origin + dir·s`, `s ∈ [start, max_len]`, against the polygon.
    ///
    /// `dir` must be a unit vector. Pieces are ordered by distance from `origin`
    /// and each runs start→end in the ray direction.
    fn intersect_ray(
        &self,
        origin: Vector2<f64>,
        dir: Vector2<f64>,
        start: f64,
        max_len: f64,
    ) -> Vec<RayPiece>;
}

/// Oracle backed by `geo` for a single simple polygon.
#[derive(Clone, Debug)]
pub struct GeoOracle {
    poly: geo::Polygon<f64>,
    edges: Vec<Line<f64>>,
    eps: f64,
}

impl GeoOracle {
    pub fn new(polygon: &Polygon) -> Self {
        Self::with_cfg(polygon, GeomCfg::default())
    }

    pub fn with_cfg(polygon: &Polygon, cfg: GeomCfg) -> Self {
        let ring: Vec<Coord<f64>> = polygon.vertices().iter().map(|v| to_coord(*v)).collect();
        let edges = polygon
            .edges()
            .map(|(a, b)| Line::new(to_coord(a), to_coord(b)))
            .collect();
        Self {
            poly: geo::Polygon::new(LineString::new(ring), vec![]),
            edges,
            eps: cfg.eps_boundary * polygon.extension_length(),
        }
    }

    /// Absolute boundary tolerance in polygon units.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// True if `p` is within `eps` of some edge.
    pub fn on_boundary(&self, p: Vector2<f64>) -> bool {
        let pt = Point::new(p.x, p.y);
        self.edges
            .iter()
            .any(|e| pt.euclidean_distance(e) <= self.eps)
    }

    /// Interior or boundary (closed polygon membership).
    pub fn covers_point(&self, p: Vector2<f64>) -> bool {
        self.on_boundary(p) || self.poly.contains(&Point::new(p.x, p.y))
    }

    /// Sorted, deduplicated parameters `t ∈ [0, 1]` at which `a + t(b - a)` meets an edge.
    ///
    /// Always contains 0 and 1.
    fn split_params(&self, a: Vector2<f64>, b: Vector2<f64>) -> Vec<f64> {
        let ab = b - a;
        let len2 = ab.norm_squared();
        let mut ts = vec![0.0, 1.0];
        if len2 <= 0.0 {
            return ts;
        }
        let seg = Line::new(to_coord(a), to_coord(b));
        let param = |c: Coord<f64>| ((Vector2::new(c.x, c.y) - a).dot(&ab) / len2).clamp(0.0, 1.0);
        for e in &self.edges {
            match line_intersection(seg, *e) {
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    ts.push(param(intersection));
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    ts.push(param(intersection.start));
                    ts.push(param(intersection.end));
                }
                None => {}
            }
        }
        // vertices grazing the segment within eps (near-collinear runs miss them above)
        for e in &self.edges {
            let v = Vector2::new(e.start.x, e.start.y);
            let t = ((v - a).dot(&ab) / len2).clamp(0.0, 1.0);
            if (a + ab * t - v).norm() <= self.eps {
                ts.push(t);
            }
        }
        ts.sort_by(f64::total_cmp);
        let tol = self.eps / len2.sqrt();
        ts.dedup_by(|x, y| (*x - *y).abs() <= tol);
        ts
    }
}

impl ContainmentOracle for GeoOracle {
    fn contains_point(&self, p: Vector2<f64>) -> bool {
        self.poly.contains(&Point::new(p.x, p.y)) && !self.on_boundary(p)
    }

    fn contains_segment(&self, p1: Vector2<f64>, p2: Vector2<f64>) -> bool {
        if !self.covers_point(p1) || !self.covers_point(p2) {
            return false;
        }
        let ts = self.split_params(p1, p2);
        ts.windows(2).all(|w| {
            let m = p1 + (p2 - p1) * (0.5 * (w[0] + w[1]));
            self.covers_point(m)
        })
    }

    fn intersect_ray(
        &self,
        origin: Vector2<f64>,
        dir: Vector2<f64>,
        start: f64,
        max_len: f64,
    ) -> Vec<RayPiece> {
        let a = origin + dir * start;
        let b = origin + dir * max_len;
        if !(max_len > start) {
            return Vec::new();
        }
        let ts = self.split_params(a, b);
        let at = |t: f64| a + (b - a) * t;
        let mut pieces: Vec<RayPiece> = Vec::new();
        let mut open: Option<Vector2<f64>> = None;
        for w in ts.windows(2) {
            let inside = self.covers_point(at(0.5 * (w[0] + w[1])));
            match (inside, open) {
                (true, None) => open = Some(at(w[0])),
                (false, Some(s)) => {
                    pieces.push(RayPiece { start: s, end: at(w[0]) });
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(s) = open {
            pieces.push(RayPiece { start: s, end: b });
        }
        pieces
    }
}

#[inline]
fn to_coord(v: Vector2<f64>) -> Coord<f64> {
    Coord { x: v.x, y: v.y }
}
