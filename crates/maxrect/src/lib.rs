//! Largest inscribed rectangle of a simple polygon.
//!
//! Pipeline
//! - `polygon`: validated vertex ring, bounds, extension length, convexity.
//! - `sample`: boundary resampling at fixed arc-length spacing (`point_gap`).
//! - `oracle`: point/segment/ray containment queries behind a trait.
//! - `search`: exhaustive pair search, convex and general variants, serial or
//!   rayon-parallel, with cancellation.
//! - `reconstruct`: rectangle corners in winding order.
//!
//! Accuracy is controlled by `point_gap` alone: halving it never lowers the
//! reported area and roughly quadruples the work.
//!
//! API Policy
//! - `find_rectangle` is the entry point for callers that just want an answer;
//!   `find_rectangle_with` exposes the oracle, knobs, and cancellation.

pub mod cfg;
pub mod error;
pub mod kernel;
pub mod oracle;
pub mod polygon;
pub mod rand;
pub mod reconstruct;
pub mod sample;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::GeomCfg;
pub use error::RectError;
pub use nalgebra::Vector2 as Vec2;
pub use oracle::{ContainmentOracle, GeoOracle, RayPiece};
pub use polygon::Polygon;
pub use reconstruct::reconstruct_corners;
pub use sample::resample_boundary;
pub use search::{
    find_rectangle, find_rectangle_with, CancelToken, RectangleSolution, SearchCfg, Variant,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
    pub use crate::{
        find_rectangle, find_rectangle_with, reconstruct_corners, CancelToken, ContainmentOracle,
        GeoOracle, GeomCfg, Polygon, RectError, RectangleSolution, SearchCfg, Variant,
    };
    pub use nalgebra::Vector2 as Vec2;
}
