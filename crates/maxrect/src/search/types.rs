//! Data types for the rectangle search: variant selection, knobs, result, cancellation.
//!
//! Kept small and explicit to make `convex`, `general`, and the driver in
//! `mod.rs` easy to read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::kernel::{distance, increment};

/// Which search algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Single interior-side check plus perpendicular ray clipping. Correct only
    /// for convex polygons.
    Convex,
    /// Segment sweep with a full containment test per step; any simple polygon.
    General,
    /// `Convex` when the polygon is convex, else `General`.
    Auto,
}

impl Variant {
    /// Reference spacing for each variant, in polygon units (tuned for ~unit-sized inputs).
    pub fn default_point_gap(self) -> f64 {
        match self {
            Variant::Convex => 0.015,
            Variant::General | Variant::Auto => 0.026,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Convex => "convex",
            Variant::General => "general",
            Variant::Auto => "auto",
        }
    }
}

/// Search configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchCfg {
    pub variant: Variant,
    /// Arc-length spacing of the boundary sample; the accuracy/cost knob.
    pub point_gap: f64,
    /// General variant: how many sweep steps to back off from the first failing
    /// position. `1` reports the last position that passed containment.
    pub step_back: u32,
    /// General variant: bisection rounds between the last passing and first
    /// failing sweep position. `0` keeps the plain stepped result.
    pub refine_bisections: u32,
    /// Shard the outer loop across the rayon pool.
    pub parallel: bool,
    pub geom: GeomCfg,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self::for_variant(Variant::Auto)
    }
}

impl SearchCfg {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            point_gap: variant.default_point_gap(),
            step_back: 1,
            refine_bisections: 12,
            parallel: true,
            geom: GeomCfg::default(),
        }
    }

    pub fn with_point_gap(mut self, point_gap: f64) -> Self {
        self.point_gap = point_gap;
        self
    }
}

/// Cooperative cancellation flag, polled once per outer-loop point.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Best rectangle found by a search.
///
/// The rectangle has base `point1`–`point2` and extends `side` along `angle`
/// (perpendicular to the base).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleSolution {
    /// Resolved variant (never `Auto`).
    pub variant: Variant,
    pub area: f64,
    pub side: f64,
    pub angle: f64,
    pub point1: Vector2<f64>,
    pub point2: Vector2<f64>,
    pub point_gap: f64,
    /// Boundary sample size the search enumerated.
    pub samples: usize,
}

impl RectangleSolution {
    #[inline]
    pub fn base_length(&self) -> f64 {
        distance(self.point1, self.point2)
    }

    /// Corners in construction order `(p1, p2, p1 + h, p2 + h)`; not a winding order.
    pub fn raw_corners(&self) -> [Vector2<f64>; 4] {
        let h = increment(self.angle, self.side);
        [self.point1, self.point2, self.point1 + h, self.point2 + h]
    }
}

/// One evaluated orientation of a candidate pair.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
    pub side: f64,
    pub angle: f64,
    pub p1: Vector2<f64>,
    pub p2: Vector2<f64>,
}

/// Best candidate plus its position in the sequential enumeration order.
///
/// `key = (i, j, orientation)` with `i < j`; orientation 0 is `i→j`, 1 is `j→i`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Best {
    pub area: f64,
    pub key: (usize, usize, u8),
    pub cand: Candidate,
}

impl Best {
    /// Larger area wins; exact ties go to the earlier key (first found).
    pub fn pick(a: Option<Best>, b: Option<Best>) -> Option<Best> {
        match (a, b) {
            (Some(x), Some(y)) => {
                if y.area > x.area || (y.area == x.area && y.key < x.key) {
                    Some(y)
                } else {
                    Some(x)
                }
            }
            (x, None) => x,
            (None, y) => y,
        }
    }
}
