//! General variant: sweep the base segment perpendicular to itself until it
//! stops being contained.
//!
//! Nothing here assumes convexity: every sweep position is a full segment
//! containment query, so reflex corners and notches are respected.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;

use crate::kernel::{azimuth, increment};
use crate::oracle::ContainmentOracle;

/// Sweep knobs derived once per search.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sweep {
    /// Step length (`point_gap / extension_length`).
    pub tiny: f64,
    /// Hard cap on sweep positions, `ceil(extension_length / tiny)`.
    pub max_steps: usize,
    pub step_back: u32,
    pub refine_bisections: u32,
}

impl Sweep {
    pub fn new(tiny: f64, extension: f64, step_back: u32, refine_bisections: u32) -> Self {
        Self {
            tiny,
            max_steps: (extension / tiny).ceil() as usize,
            step_back,
            refine_bisections,
        }
    }

    /// Side reachable by translating base `p1 → p2` towards its +90° side.
    ///
    /// Pre: the base itself is contained (the caller's eligibility test).
    /// Returns `(side, extension angle)`; the side is 0 when the first step
    /// already leaves the polygon.
    pub fn run<O: ContainmentOracle + ?Sized>(
        &self,
        oracle: &O,
        p1: Vector2<f64>,
        p2: Vector2<f64>,
    ) -> (f64, f64) {
        let angle = azimuth(p1, p2) + FRAC_PI_2;
        let dir = increment(angle, 1.0);
        let fits = |offset: f64| oracle.contains_segment(p1 + dir * offset, p2 + dir * offset);

        // count = number of translations performed while the segment was still inside,
        // i.e. positions 0..count passed and position `count` failed (or hit the cap)
        let mut count = 1usize;
        while count <= self.max_steps && fits(count as f64 * self.tiny) {
            count += 1;
        }
        let mut last = (count - 1) as f64 * self.tiny;
        if count <= self.max_steps {
            let mut fail = count as f64 * self.tiny;
            for _ in 0..self.refine_bisections {
                let mid = 0.5 * (last + fail);
                if fits(mid) {
                    last = mid;
                } else {
                    fail = mid;
                }
            }
        }
        let back = self.step_back.saturating_sub(1) as f64 * self.tiny;
        ((last - back).max(0.0), angle)
    }
}
