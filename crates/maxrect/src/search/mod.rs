//! Largest inscribed rectangle by exhaustive search over boundary-sample pairs.
//!
//! Purpose
//! - Every unordered pair of boundary samples is a candidate base edge. Each
//!   pair is tried in both orientations (`i→j`, then `j→i`), so both sides of a
//!   chord get a chance; the perpendicular side is found by the variant.
//! - A pair is skipped when even the extension length as side could not beat
//!   the best area so far (`d <= best / extension_length`).
//!
//! Determinism
//! - The winner is the largest area; exact ties go to the earliest key
//!   `(i, j, orientation)` in sequential order. The parallel scan reduces with
//!   the same rule, so serial and parallel runs return identical solutions.
//! - The shared floor used by parallel rows only prunes; it never selects.
//!
//! Cost is O(n²) pairs for n = perimeter / point_gap samples, times the
//! variant's per-pair work (two ray clips, or a segment sweep).

pub(crate) mod convex;
mod general;
mod types;


use std::sync::atomic::{AtomicU64, Ordering};

use nalgebra::Vector2;
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

use crate::error::RectError;
use crate::kernel::distance;
use crate::oracle::{ContainmentOracle, GeoOracle};
use crate::polygon::Polygon;
use crate::sample::resample_boundary;

use general::Sweep;
use types::{Best, Candidate};

pub use types::{CancelToken, RectangleSolution, SearchCfg, Variant};

/// Largest axis-free rectangle inscribed in `polygon`, with default knobs.
///
/// Runs the parallel scan against a `GeoOracle` built from `polygon`.
/// Knobs come from `SearchCfg::for_variant`, so the general variant refines
/// each sweep's last step with 12 bisection rounds; use `find_rectangle_with`
/// and `refine_bisections = 0` for the plain last-passing-step side.
pub fn find_rectangle(
    polygon: &Polygon,
    point_gap: f64,
    variant: Variant,
) -> Result<RectangleSolution, RectError> {
    let cfg = SearchCfg::for_variant(variant).with_point_gap(point_gap);
    let oracle = GeoOracle::with_cfg(polygon, cfg.geom);
    find_rectangle_with(polygon, &oracle, &cfg, &CancelToken::new())
}

/// Full-control entry point: caller-provided oracle, knobs, and cancellation.
///
/// `oracle` must describe the same region as `polygon`; the polygon supplies
/// the boundary samples and the extension length.
pub fn find_rectangle_with<O>(
    polygon: &Polygon,
    oracle: &O,
    cfg: &SearchCfg,
    cancel: &CancelToken,
) -> Result<RectangleSolution, RectError>
where
    O: ContainmentOracle + Sync + ?Sized,
{
    if cfg.step_back == 0 {
        return Err(RectError::invalid("step_back must be >= 1"));
    }
    let variant = resolve_variant(polygon, cfg.variant);
    let samples = resample_boundary(polygon, cfg.point_gap)?;
    // the sample closes onto v0; enumerate each position once
    let pts = &samples[..samples.len() - 1];
    let ext = polygon.extension_length();
    let tiny = cfg.point_gap / ext;

    let _span = debug_span!(
        "find_rectangle",
        variant = variant.name(),
        samples = pts.len(),
        point_gap = cfg.point_gap
    )
    .entered();

    let mode = match variant {
        Variant::General => Mode::General(Sweep::new(
            tiny,
            ext,
            cfg.step_back,
            cfg.refine_bisections,
        )),
        _ => Mode::Convex,
    };
    let searcher = Searcher {
        oracle,
        pts,
        ext,
        tiny,
        eps: cfg.geom.eps_boundary * ext,
        mode,
    };
    let best = if cfg.parallel {
        searcher.scan_parallel(cancel)?
    } else {
        searcher.scan_serial(cancel)?
    };
    let Some(best) = best else {
        return Err(RectError::NoFeasibleRectangle {
            samples: pts.len(),
            point_gap: cfg.point_gap,
        });
    };

    let Candidate {
        mut side,
        mut angle,
        p1,
        p2,
    } = best.cand;
    if variant == Variant::Convex {
        (side, angle) = convex::rederive(oracle, p1, p2, ext, tiny)?;
    }
    let area = distance(p1, p2) * side;
    debug!(area, side, key = ?best.key, "search finished");
    Ok(RectangleSolution {
        variant,
        area,
        side,
        angle,
        point1: p1,
        point2: p2,
        point_gap: cfg.point_gap,
        samples: pts.len(),
    })
}

fn resolve_variant(polygon: &Polygon, requested: Variant) -> Variant {
    let convex = polygon.is_convex();
    match requested {
        Variant::Auto if convex => Variant::Convex,
        Variant::Auto => Variant::General,
        Variant::Convex if !convex => {
            warn!("convex variant on a non-convex polygon; the rectangle may leave the polygon");
            Variant::Convex
        }
        v => v,
    }
}

#[derive(Clone, Copy, Debug)]
enum Mode {
    Convex,
    General(Sweep),
}

struct Searcher<'a, O: ?Sized> {
    oracle: &'a O,
    pts: &'a [Vector2<f64>],
    ext: f64,
    tiny: f64,
    /// Pairs closer than this are coincident.
    eps: f64,
    mode: Mode,
}

impl<O: ContainmentOracle + Sync + ?Sized> Searcher<'_, O> {
    fn scan_serial(&self, cancel: &CancelToken) -> Result<Option<Best>, RectError> {
        (0..self.pts.len()).try_fold(None, |acc: Option<Best>, i| {
            if cancel.is_cancelled() {
                return Err(RectError::Cancelled);
            }
            let floor = acc.map_or(0.0, |b| b.area);
            Ok(Best::pick(acc, self.scan_row(i, floor, None)))
        })
    }

    fn scan_parallel(&self, cancel: &CancelToken) -> Result<Option<Best>, RectError> {
        let shared = SharedFloor::default();
        (0..self.pts.len())
            .into_par_iter()
            .map(|i| {
                if cancel.is_cancelled() {
                    return Err(RectError::Cancelled);
                }
                Ok(self.scan_row(i, shared.get(), Some(&shared)))
            })
            .try_reduce(|| None, |a, b| Ok(Best::pick(a, b)))
    }

    /// Best candidate among pairs `(i, j)`, `j > i`.
    ///
    /// `floor` (and `shared`, when given) only prune; candidates are kept by
    /// strict improvement over the row's own best.
    fn scan_row(&self, i: usize, floor: f64, shared: Option<&SharedFloor>) -> Option<Best> {
        let mut floor = floor;
        let mut best: Option<Best> = None;
        let p = self.pts[i];
        for j in (i + 1)..self.pts.len() {
            let q = self.pts[j];
            let d = distance(p, q);
            if d <= self.eps {
                continue;
            }
            if let Some(s) = shared {
                floor = floor.max(s.get());
            }
            floor = floor.max(best.map_or(0.0, |b| b.area));
            if d <= floor / self.ext {
                continue;
            }
            if let Mode::General(_) = self.mode {
                if !self.oracle.contains_segment(p, q) {
                    continue;
                }
            }
            for (orientation, (a, b)) in [(0u8, (p, q)), (1u8, (q, p))] {
                let Some(cand) = self.evaluate(a, b) else {
                    continue;
                };
                let area = d * cand.side;
                if area > 0.0 && best.map_or(true, |cur| area > cur.area) {
                    best = Some(Best {
                        area,
                        key: (i, j, orientation),
                        cand,
                    });
                    if let Some(s) = shared {
                        s.raise(area);
                    }
                }
            }
        }
        best
    }

    fn evaluate(&self, p1: Vector2<f64>, p2: Vector2<f64>) -> Option<Candidate> {
        let (side, angle) = match self.mode {
            Mode::Convex => convex::extend_perpendicular(self.oracle, p1, p2, self.ext, self.tiny)?,
            Mode::General(sweep) => sweep.run(self.oracle, p1, p2),
        };
        Some(Candidate {
            side,
            angle,
            p1,
            p2,
        })
    }
}

/// Best area seen by any row, stored as `f64` bits. Only ever increases.
#[derive(Debug, Default)]
struct SharedFloor(AtomicU64);

impl SharedFloor {
    #[inline]
    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn raise(&self, area: f64) {
        let mut cur = self.0.load(Ordering::Relaxed);
        while f64::from_bits(cur) < area {
            match self.0.compare_exchange_weak(
                cur,
                area.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }
}
