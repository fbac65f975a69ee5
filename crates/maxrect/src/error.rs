//! Errors surfaced by polygon validation, resampling, and the rectangle search.

use thiserror::Error;

/// Failure kinds of the rectangle search pipeline.
///
/// All variants are deterministic given identical inputs; retrying never helps.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RectError {
    /// Fewer than 3 distinct vertices, zero perimeter, or zero enclosed area.
    #[error("degenerate polygon: {reason}")]
    DegeneratePolygon { reason: String },
    /// A tunable was out of range (e.g. `point_gap <= 0` or non-finite).
    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },
    /// The search finished without any candidate of positive area.
    #[error("no feasible rectangle found ({samples} boundary samples, point_gap={point_gap})")]
    NoFeasibleRectangle { samples: usize, point_gap: f64 },
    /// The convex interior check failed in both rotation directions while
    /// re-deriving the winning pair.
    #[error("could not resolve interior side for base ({x1}, {y1}) -> ({x2}, {y2})")]
    AmbiguousOrientation { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// The caller raised the cancel token.
    #[error("search cancelled")]
    Cancelled,
}

impl RectError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegeneratePolygon {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}
