//! Turning a simplifier's vertex list into exactly four corners
use crate::detector::contour::order_vertices;
use crate::models::Point;
use crate::utils::geometry::{convex_hull, corner_strength, remove_near_duplicates};

/// Squared merge distance when the strategy returned at most 4 vertices
pub const MERGE_DISTANCE_SQ: f64 = 1.0;
/// Squared merge distance when more than 4 vertices must be reduced
pub const MERGE_DISTANCE_SQ_REDUCED: f64 = 64.0;

/// Near-duplicate vertex merge, coarser when the list is longer than 4
pub fn merge_corners(vertices: &[Point]) -> Vec<Point> {
    let threshold = if vertices.len() <= 4 {
        MERGE_DISTANCE_SQ
    } else {
        MERGE_DISTANCE_SQ_REDUCED
    };
    remove_near_duplicates(vertices, threshold)
}

/// Keep the 4 sharpest convex-hull vertices, in traversal order
pub fn reduce_to_quad(vertices: &[Point]) -> Option<[Point; 4]> {
    let hull = convex_hull(vertices);
    let n = hull.len();
    if n < 4 {
        return None;
    }
    if n == 4 {
        return order_vertices(&hull).try_into().ok();
    }

    let mut ranked: Vec<(usize, f64)> = (0..n)
        .map(|i| (i, corner_strength(hull[(i + n - 1) % n], hull[i], hull[(i + 1) % n])))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let selected: Vec<Point> = ranked.iter().take(4).map(|&(i, _)| hull[i]).collect();
    order_vertices(&selected).try_into().ok()
}

/// Merge near-duplicates, then reduce to 4 corners when needed
pub fn to_quadrilateral(vertices: &[Point]) -> Option<[Point; 4]> {
    let merged = merge_corners(vertices);
    match merged.len() {
        0..=3 => None,
        4 => merged.try_into().ok(),
        _ => reduce_to_quad(&merged),
    }
}
