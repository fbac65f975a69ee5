//! Rectangle corners from a search result, in boundary (winding) order.

use nalgebra::Vector2;

use crate::kernel::distance;
use crate::search::RectangleSolution;

/// The four corners of `solution`, ordered so consecutive corners share an edge.
///
/// Raw construction order is `(p1, p2, p1 + h, p2 + h)`, which crosses over
/// itself; see [`order_corners`].
pub fn reconstruct_corners(solution: &RectangleSolution) -> [Vector2<f64>; 4] {
    order_corners(solution.raw_corners())
}

/// Reorder rectangle corners into a closed non-self-intersecting ring.
///
/// Sort by distance from the first corner: the first corner stays first, the
/// diagonal partner is always farthest, and the two adjacent corners fall in
/// between. Taking sorted positions `(0, 1, 3, 2)` walks first → adjacent →
/// diagonal → other adjacent.
pub fn order_corners(corners: [Vector2<f64>; 4]) -> [Vector2<f64>; 4] {
    let first = corners[0];
    let mut sorted = corners;
    sorted.sort_by(|a, b| distance(first, *a).total_cmp(&distance(first, *b)));
    [sorted[0], sorted[1], sorted[3], sorted[2]]
}
