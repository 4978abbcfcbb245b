//! Convex-hull fallback
use super::SimplifyParams;
use crate::models::Point;
use crate::utils::geometry::convex_hull;

const MIN_HULL: usize = 4;
const MAX_HULL: usize = 8;

/// Hull of the raw contour when it has 4..=8 vertices
pub fn corners(contour: &[Point], _params: &SimplifyParams) -> Option<Vec<Point>> {
    let hull = convex_hull(contour);
    (MIN_HULL..=MAX_HULL).contains(&hull.len()).then_some(hull)
}
