//! Tolerance defaults shared by the polygon, oracle, and search modules.

/// Geometry configuration (tolerances).
///
/// `eps_boundary` is relative: the oracle multiplies it by the polygon's
/// extension length so "on the boundary" means the same thing at every scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Relative distance under which a point counts as lying on an edge.
    pub eps_boundary: f64,
    /// Absolute distance under which consecutive vertices are merged.
    pub eps_dedup: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_boundary: 1e-9,
            eps_dedup: 1e-12,
        }
    }
}
