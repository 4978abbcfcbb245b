//! Polygon simplification: contour to a small vertex list.
//!
//! Strategies are plain functions tried in a fixed order until one returns
//! a usable vertex list:
//!
//! 1. moment-based canonical-frame box
//! 2. line-pair intersection
//! 3. curvature peaks
//! 4. multi-tolerance Douglas-Peucker
//! 5. convex hull
//!
//! Vertex lists longer than 4 are reduced by [`quadrilateral::to_quadrilateral`].

use crate::models::Point;

pub mod curvature;
pub mod douglas_peucker;
pub mod hough;
pub mod hull;
pub mod moments;
pub mod quadrilateral;

/// Inputs shared by all strategies
#[derive(Debug, Clone, Copy)]
pub struct SimplifyParams {
    /// Douglas-Peucker tolerance as a fraction of the perimeter
    pub epsilon: f64,
    /// Skewness cap for the moment strategy
    pub max_skewness: f64,
}

/// A strategy maps a contour to a vertex list, or declines
pub type Strategy = fn(&[Point], &SimplifyParams) -> Option<Vec<Point>>;

/// Strategies in the order they are tried
pub const STRATEGIES: [(&str, Strategy); 5] = [
    ("moments", moments::corners),
    ("hough", hough::corners),
    ("curvature", curvature::corners),
    ("douglas_peucker", douglas_peucker::simplify_multi),
    ("hull", hull::corners),
];

/// Output of the first strategy that produced 4 or more vertices
#[derive(Debug, Clone)]
pub struct Simplified {
    /// Raw vertices, before merging and reduction
    pub vertices: Vec<Point>,
    /// Index into [`STRATEGIES`]
    pub strategy: usize,
}

impl Simplified {
    /// Name of the strategy that produced the vertices
    pub fn strategy_name(&self) -> &'static str {
        STRATEGIES[self.strategy].0
    }
}

/// Run the strategy chain on an ordered contour
pub fn simplify(contour: &[Point], params: &SimplifyParams) -> Option<Simplified> {
    if contour.len() < 4 {
        return None;
    }
    STRATEGIES
        .iter()
        .enumerate()
        .find_map(|(index, (name, strategy))| {
            let vertices = strategy(contour, params).filter(|v| v.len() >= 4)?;
            log::trace!("simplify: {} produced {} vertices", name, vertices.len());
            Some(Simplified {
                vertices,
                strategy: index,
            })
        })
}
