//! Rectangle classification and parameter fitting.
//!
//! A contour becomes a [`RectangleCandidate`] when its simplified
//! quadrilateral passes every gate in [`classify`]: area range, parallel
//! opposite sides, anti-circularity, near-right corners, rectangularity and
//! centro-symmetry. Rejection is silent.

use crate::config::{RectangleConfig, RectangleThresholds};
use crate::detector::simplify::moments::ShapeMoments;
use crate::detector::simplify::quadrilateral::to_quadrilateral;
use crate::detector::simplify::{SimplifyParams, simplify};
use crate::models::{Point, PointF, RectangleCandidate};
use crate::utils::geometry::{
    AREA_EPSILON, area_centroid, bounding_box, convex_hull, corner_angle, perimeter, polygon_area,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// Side pairs closer than this (pixels) are treated as equal length
const LENGTH_TIE: f64 = 1.0;

/// Unit vector of `b - a`, `None` for a zero-length edge
fn unit_edge(a: Point, b: Point) -> Option<PointF> {
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    (len > AREA_EPSILON).then(|| PointF::new(dx / len, dy / len))
}

/// Opposite edges within `tolerance` of parallel (|cos| near 1)
pub fn opposite_sides_parallel(quad: &[Point; 4], tolerance: f64) -> bool {
    let edges: Option<Vec<PointF>> = (0..4).map(|i| unit_edge(quad[i], quad[(i + 1) % 4])).collect();
    let Some(e) = edges else {
        return false;
    };
    [(0, 2), (1, 3)].iter().all(|&(i, j)| {
        let dot = e[i].x * e[j].x + e[i].y * e[j].y;
        (dot.abs() - 1.0).abs() < tolerance
    })
}

/// perimeter^2 / (4*PI*area) of the contour's convex hull: 1.0 for a disk,
/// 4/PI for a square
pub fn circularity_index(contour: &[Point]) -> Option<f64> {
    let hull = convex_hull(contour);
    let area = polygon_area(&hull);
    if area < AREA_EPSILON {
        return None;
    }
    Some(perimeter(&hull).powi(2) / (4.0 * PI * area))
}

/// Polygon area over its axis-aligned bounding-box area
pub fn rectangularity(polygon: &[Point]) -> f64 {
    let Some((lo, hi)) = bounding_box(polygon) else {
        return 0.0;
    };
    let box_area = (hi.x - lo.x) as f64 * (hi.y - lo.y) as f64;
    if box_area < AREA_EPSILON {
        return 0.0;
    }
    polygon_area(polygon) / box_area
}

fn corner_angles_ok(quad: &[Point; 4], thresholds: &RectangleThresholds) -> bool {
    let mut right = 0;
    let mut total_deviation = 0.0;
    for i in 0..4 {
        let Some(angle) = corner_angle(quad[(i + 3) % 4], quad[i], quad[(i + 1) % 4]) else {
            return false;
        };
        let deviation = (angle - FRAC_PI_2).abs();
        if deviation < thresholds.corner_angle_tolerance {
            right += 1;
        }
        total_deviation += deviation;
    }
    right >= thresholds.min_right_angles && total_deviation / 4.0 <= thresholds.max_mean_angle_deviation
}

/// True when `quad`, simplified from `contour`, passes every rectangle gate
pub fn classify(quad: &[Point; 4], contour: &[Point], config: &RectangleConfig) -> bool {
    let t = &config.thresholds;

    let area = polygon_area(quad);
    if area < config.min_area || area > config.max_area {
        log::trace!("rectangle: area {:.1} out of range", area);
        return false;
    }

    if !opposite_sides_parallel(quad, t.parallel_tolerance) {
        log::trace!("rectangle: opposite sides not parallel");
        return false;
    }

    let area_ratio = polygon_area(contour) / area;
    if area_ratio > t.max_area_ratio {
        log::trace!("rectangle: contour/polygon area ratio {:.2}", area_ratio);
        return false;
    }
    match circularity_index(contour) {
        Some(index) if index >= t.min_circularity_index => {}
        index => {
            log::trace!("rectangle: too circular ({:?})", index);
            return false;
        }
    }

    if !corner_angles_ok(quad, t) {
        log::trace!("rectangle: corner angles off");
        return false;
    }

    if rectangularity(quad) < t.min_rectangularity {
        log::trace!("rectangle: rectangularity below floor");
        return false;
    }

    match ShapeMoments::from_points(contour) {
        Some(m) if m.skewness() <= t.max_skewness => true,
        _ => {
            log::trace!("rectangle: contour is not centro-symmetric");
            false
        }
    }
}

/// Center, extents and angle of an accepted quadrilateral.
///
/// The center is the shoelace centroid of the original contour. Width is
/// the longer opposite-edge pair (the more horizontal one on a tie) and the
/// angle is the direction of that pair, folded into the right half-plane.
pub fn fit_rectangle(quad: &[Point; 4], contour: &[Point]) -> Option<RectangleCandidate> {
    let center = area_centroid(contour)?.round();

    let edge = |i: usize| {
        let (a, b) = (quad[i], quad[(i + 1) % 4]);
        PointF::new((b.x - a.x) as f64, (b.y - a.y) as f64)
    };
    let norm = |v: PointF| (v.x * v.x + v.y * v.y).sqrt();
    let (e0, e1, e2, e3) = (edge(0), edge(1), edge(2), edge(3));

    let pair_a = (norm(e0) + norm(e2)) / 2.0;
    let pair_b = (norm(e1) + norm(e3)) / 2.0;
    // Opposite edges run in opposite directions around the loop
    let dir_a = PointF::new(e0.x - e2.x, e0.y - e2.y);
    let dir_b = PointF::new(e1.x - e3.x, e1.y - e3.y);

    let horizontal = |v: PointF| {
        let n = norm(v);
        if n < AREA_EPSILON { 0.0 } else { v.x.abs() / n }
    };
    let a_is_width = if (pair_a - pair_b).abs() <= LENGTH_TIE {
        horizontal(dir_a) >= horizontal(dir_b)
    } else {
        pair_a > pair_b
    };
    let (width, height, mut dir) = if a_is_width {
        (pair_a, pair_b, dir_a)
    } else {
        (pair_b, pair_a, dir_b)
    };

    if dir.x < 0.0 || (dir.x == 0.0 && dir.y < 0.0) {
        dir = PointF::new(-dir.x, -dir.y);
    }

    let (width, height) = (width.round() as i32, height.round() as i32);
    if width <= 0 || height <= 0 {
        return None;
    }

    Some(RectangleCandidate {
        center,
        width,
        height,
        angle: dir.y.atan2(dir.x),
    })
}

/// Full rectangle path for one ordered contour. Returns the candidate and
/// the name of the simplification strategy that produced its corners.
pub fn detect_in_contour(
    contour: &[Point],
    config: &RectangleConfig,
) -> Option<(RectangleCandidate, &'static str)> {
    let params = SimplifyParams {
        epsilon: config.approx_epsilon,
        max_skewness: config.thresholds.max_skewness,
    };
    let simplified = simplify(contour, &params)?;
    let quad = to_quadrilateral(&simplified.vertices)?;

    if !classify(&quad, contour, config) {
        return None;
    }
    let rect = fit_rectangle(&quad, contour)?;
    Some((rect, simplified.strategy_name()))
}
